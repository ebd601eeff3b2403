use anyhow::{Context as _, bail};
use roehn_config::{AppConfig, env, maybe_env};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Filter directives when `ROEHN_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "info";
/// Test runs log the page library in detail and every timer that fires.
pub(crate) const TEST_DIRECTIVES: &str = "roehn_page=debug,roehn_timers=trace";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid log format `{0}`, expected `json` or `pretty`")]
pub struct InvalidLogFormat(String);

impl FromStr for LogFormat {
    type Err = InvalidLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(InvalidLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct SentryConfig {
    pub dsn: sentry::types::Dsn,
    /// Between 0 and 1.
    pub traces_sample_rate: f32,
}

impl SentryConfig {
    fn from_environment() -> anyhow::Result<Option<Self>> {
        let Some(dsn) = maybe_env("SENTRY_DSN")? else {
            return Ok(None);
        };

        let traces_sample_rate: f32 = env("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;
        if !(0.0..=1.0).contains(&traces_sample_rate) {
            bail!("SENTRY_TRACES_SAMPLE_RATE must be between 0 and 1, got {traces_sample_rate}");
        }

        Ok(Some(Self {
            dsn,
            traces_sample_rate,
        }))
    }
}

#[derive(Debug)]
pub struct Config {
    pub format: LogFormat,
    pub filter: EnvFilter,
    pub sentry: Option<SentryConfig>,
}

impl Config {
    /// `ROEHN_LOG` when set, else `default_directives`.
    pub(crate) fn filter_from_env(default_directives: &str) -> anyhow::Result<EnvFilter> {
        let directives: Option<String> = maybe_env("ROEHN_LOG")?;
        let directives = directives.as_deref().unwrap_or(default_directives);
        EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter `{directives}`"))
    }
}

impl AppConfig for Config {
    const NAME: &'static str = "logging";

    fn from_environment() -> anyhow::Result<Self> {
        Ok(Self {
            format: maybe_env("ROEHN_LOG_FORMAT")?.unwrap_or_default(),
            filter: Self::filter_from_env(DEFAULT_DIRECTIVES)?,
            sentry: SentryConfig::from_environment()?,
        })
    }

    #[cfg(any(test, feature = "testing"))]
    fn test_config() -> anyhow::Result<Self> {
        Ok(Self {
            format: LogFormat::Pretty,
            filter: Self::filter_from_env(TEST_DIRECTIVES)?,
            sentry: None,
        })
    }
}
