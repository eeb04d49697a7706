mod errors;
mod model;
mod storage;

pub(crate) use model::SettingsData;
pub(crate) use storage::load_initial_settings;
