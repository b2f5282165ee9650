use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".gestion_stock";
const CONFIG_DIR: &str = "config";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "GESTION_STOCK_HOME";

/// Returns the application data directory, defaulting to `~/.gestion_stock`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}
