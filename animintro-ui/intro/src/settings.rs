use std::time::Duration;

/// Remote picture shown behind the title mask.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/id/34/3872/2592";

const DEFAULT_TITLE_ANIMATION: Duration = Duration::from_secs(2);
const DEFAULT_REVEAL_DELAY: Duration = Duration::from_secs(2);
const DEFAULT_DISMISS_TRANSITION: Duration = Duration::from_millis(500);

/// Construction-time parameters of an [`IntroScreen`](crate::IntroScreen).
///
/// Only `title`, `title_size` and `logo_name` are required; everything else
/// has defaults matching the stock intro layout.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroSettings {
    pub title: String,
    pub title_size: f32,
    pub logo_name: String,
    pub image_url: String,
    pub layout: LayoutSettings,
    pub timing: TimingSettings,
}

impl IntroSettings {
    pub fn new(
        title: impl Into<String>,
        title_size: f32,
        logo_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            title_size,
            logo_name: logo_name.into(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            layout: LayoutSettings::default(),
            timing: TimingSettings::default(),
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_timing(mut self, timing: TimingSettings) -> Self {
        self.timing = timing;
        self
    }

    /// Final title size with malformed values collapsed to zero.
    pub fn target_title_size(&self) -> f32 {
        if self.title_size.is_finite() && self.title_size > 0.0 {
            self.title_size
        } else {
            0.0
        }
    }
}

/// Geometry of the masked title and the reveal overlay, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Vertical shift of the title relative to the screen centre.
    pub title_offset_y: f32,
    pub logo_width: f32,
    pub button_icon_width: f32,
    /// Vertical shift of the "GO!" button relative to the screen centre.
    pub button_offset_y: f32,
    pub button_padding: f32,
    pub button_radius: f32,
    pub button_text_size: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            title_offset_y: -100.0,
            logo_width: 77.0,
            button_icon_width: 30.0,
            button_offset_y: 200.0,
            button_padding: 15.0,
            button_radius: 18.0,
            button_text_size: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    /// Duration of the linear title growth from zero to the target size.
    pub title_animation: Duration,
    /// Delay between image load and the button reveal.
    pub reveal_delay: Duration,
    /// Fade-out played after the button is pressed.
    pub dismiss_transition: Duration,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            title_animation: DEFAULT_TITLE_ANIMATION,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            dismiss_transition: DEFAULT_DISMISS_TRANSITION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_settings_then_uses_stock_defaults() {
        let settings = IntroSettings::new("hello", 80.0, "Logo");

        assert_eq!(settings.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(settings.timing.reveal_delay, Duration::from_secs(2));
        assert_eq!(
            settings.timing.dismiss_transition,
            Duration::from_millis(500)
        );
        assert_eq!(settings.layout.title_offset_y, -100.0);
        assert_eq!(settings.layout.logo_width, 77.0);
    }

    #[test]
    fn given_malformed_title_size_when_resolving_target_then_clamps_to_zero() {
        assert_eq!(IntroSettings::new("a", -4.0, "x").target_title_size(), 0.0);
        assert_eq!(
            IntroSettings::new("a", f32::NAN, "x").target_title_size(),
            0.0
        );
        assert_eq!(
            IntroSettings::new("a", f32::INFINITY, "x").target_title_size(),
            0.0
        );
        assert_eq!(IntroSettings::new("a", 42.0, "x").target_title_size(), 42.0);
    }
}
