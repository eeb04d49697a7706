use std::path::PathBuf;

use animintro_ui_intro::{
    AssetResolver, BUNDLED_LOGO, BundledAssets, DirectoryAssets,
    IntroSettings,
};
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "titre";
const DEFAULT_TITLE_SIZE: f32 = 80.0;

/// Persisted host configuration for the intro screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SettingsData {
    title: String,
    title_size: f32,
    logo_name: String,
    /// Directory searched for `logo_name`; the bundled set is used if unset.
    assets_dir: Option<PathBuf>,
    image_url: Option<String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            title_size: DEFAULT_TITLE_SIZE,
            logo_name: BUNDLED_LOGO.to_string(),
            assets_dir: None,
            image_url: None,
        }
    }
}

impl SettingsData {
    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn intro_settings(&self) -> IntroSettings {
        let settings = IntroSettings::new(
            self.title.clone(),
            self.title_size,
            self.logo_name.clone(),
        );

        match &self.image_url {
            Some(url) if !url.trim().is_empty() => {
                settings.with_image_url(url.trim())
            },
            _ => settings,
        }
    }

    pub(crate) fn asset_resolver(&self) -> Box<dyn AssetResolver> {
        match &self.assets_dir {
            Some(dir) => Box::new(DirectoryAssets::new(dir.clone())),
            None => Box::new(BundledAssets::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    #[cfg(test)]
    pub(crate) fn set_image_url(&mut self, url: Option<String>) {
        self.image_url = url;
    }
}

#[cfg(test)]
mod tests {
    use animintro_ui_intro::DEFAULT_IMAGE_URL;

    use super::*;

    #[test]
    fn given_default_settings_when_building_intro_then_uses_stock_values() {
        let intro = SettingsData::default().intro_settings();

        assert_eq!(intro.title, DEFAULT_TITLE);
        assert_eq!(intro.title_size, DEFAULT_TITLE_SIZE);
        assert_eq!(intro.logo_name, BUNDLED_LOGO);
        assert_eq!(intro.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn given_custom_url_when_building_intro_then_overrides_default() {
        let mut settings = SettingsData::default();
        settings.set_image_url(Some(String::from(" http://localhost/a.png ")));

        assert_eq!(settings.intro_settings().image_url, "http://localhost/a.png");
    }

    #[test]
    fn given_blank_url_when_building_intro_then_keeps_default() {
        let mut settings = SettingsData::default();
        settings.set_image_url(Some(String::from("  ")));

        assert_eq!(settings.intro_settings().image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn given_partial_json_when_parsing_then_missing_fields_use_defaults() {
        let parsed: SettingsData =
            serde_json::from_str(r#"{ "title": "hello" }"#).expect("json");

        assert_eq!(parsed.title(), "hello");
        assert_eq!(parsed.title_size, DEFAULT_TITLE_SIZE);
        assert_eq!(parsed.logo_name, BUNDLED_LOGO);
        assert!(parsed.assets_dir.is_none());
    }

    #[test]
    fn given_bundled_logo_name_when_resolving_without_dir_then_found() {
        let settings = SettingsData::default();

        assert!(settings.asset_resolver().resolve(BUNDLED_LOGO).is_ok());
    }
}
