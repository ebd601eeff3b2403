mod env;

pub use env::{env, env_millis, maybe_env, require_env};

use anyhow::{Context as _, Result};

/// The config trait shared by the page library, the logging setup and the CLI.
pub trait AppConfig: Sized {
    /// Names the config in load errors.
    const NAME: &'static str;

    fn from_environment() -> Result<Self>;

    /// [`AppConfig::from_environment`], with an error that says which config
    /// could not be loaded.
    fn load() -> Result<Self> {
        Self::from_environment().with_context(|| format!("invalid {} configuration", Self::NAME))
    }

    #[cfg(feature = "testing")]
    fn test_config() -> Result<Self> {
        Self::from_environment()
    }
}
