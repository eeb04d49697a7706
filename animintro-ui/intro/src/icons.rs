pub(crate) const LOGO: &[u8] = include_bytes!("../assets/logo.svg");
pub(crate) const LOAD_FAILED: &[u8] = include_bytes!("../assets/error.svg");
pub(crate) const MISSING_ASSET: &[u8] = include_bytes!("../assets/missing.svg");
