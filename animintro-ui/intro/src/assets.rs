use std::collections::HashMap;
use std::path::{Path, PathBuf};

use iced::widget::{image, svg};

use crate::error::{IntroError, Result};
use crate::icons;

/// Name of the logo shipped with this crate.
pub const BUNDLED_LOGO: &str = "Logo";

const RASTER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Image handle resolved from an asset name.
#[derive(Debug, Clone)]
pub enum AssetImage {
    Raster(image::Handle),
    Vector(svg::Handle),
}

impl AssetImage {
    pub fn from_svg_bytes(bytes: &'static [u8]) -> Self {
        Self::Vector(svg::Handle::from_memory(bytes))
    }

    /// The logo shipped with this crate.
    pub fn bundled_logo() -> Self {
        Self::from_svg_bytes(icons::LOGO)
    }

    /// Glyph shown in place of a logo that could not be resolved.
    pub fn missing() -> Self {
        Self::from_svg_bytes(icons::MISSING_ASSET)
    }
}

/// Resolves asset names into images.
pub trait AssetResolver {
    fn resolve(&self, name: &str) -> Result<AssetImage>;
}

/// In-memory asset set, preloaded with [`BUNDLED_LOGO`].
#[derive(Debug, Clone)]
pub struct BundledAssets {
    images: HashMap<String, AssetImage>,
}

impl Default for BundledAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl BundledAssets {
    pub fn new() -> Self {
        let mut images = HashMap::new();
        images.insert(BUNDLED_LOGO.to_string(), AssetImage::bundled_logo());
        Self { images }
    }

    pub fn with_image(
        mut self,
        name: impl Into<String>,
        image: AssetImage,
    ) -> Self {
        self.images.insert(name.into(), image);
        self
    }
}

impl AssetResolver for BundledAssets {
    fn resolve(&self, name: &str) -> Result<AssetImage> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| IntroError::AssetNotFound(name.to_string()))
    }
}

/// Resolves `<root>/<name>.{png,jpg,jpeg,svg}` from disk.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for DirectoryAssets {
    fn resolve(&self, name: &str) -> Result<AssetImage> {
        if !is_plain_name(name) {
            return Err(IntroError::AssetNotFound(name.to_string()));
        }

        let vector = self.root.join(format!("{name}.svg"));
        if vector.is_file() {
            return Ok(AssetImage::Vector(svg::Handle::from_path(vector)));
        }

        RASTER_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
            .map(|path| AssetImage::Raster(image::Handle::from_path(path)))
            .ok_or_else(|| IntroError::AssetNotFound(name.to_string()))
    }
}

/// Resolve `name`, falling back to the missing-asset glyph.
pub(crate) fn resolve_or_placeholder(
    resolver: &dyn AssetResolver,
    name: &str,
) -> AssetImage {
    resolver.resolve(name).unwrap_or_else(|err| {
        log::warn!("intro logo unavailable: {err}");
        AssetImage::missing()
    })
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
}
