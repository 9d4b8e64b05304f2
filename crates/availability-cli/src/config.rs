//! Layered configuration loading for the `avail` binary.

use std::path::{Path, PathBuf};

use availability_engine::TimeConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

/// Prefix for environment overrides, e.g. `AVAIL_TIMEZONE=Europe/Berlin`.
pub const ENV_PREFIX: &str = "AVAIL_";

/// Load the configuration: defaults, then the user config file, then an
/// explicit file, then `AVAIL_*` environment variables.
#[allow(clippy::result_large_err)]
pub fn load(config_path: Option<&Path>) -> Result<TimeConfig, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(TimeConfig::default()));

    if let Some(path) = default_config_file() {
        figment = figment.merge(Toml::file(path));
    }

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment.merge(Env::prefixed(ENV_PREFIX)).extract()
}

/// `<config dir>/availability/config.toml`, e.g. `~/.config/availability/config.toml`.
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("availability").join("config.toml"))
}
