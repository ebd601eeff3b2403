use crate::{alert, nav};
use roehn_config::{AppConfig, env, env_millis};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Selects the navigation links that are candidates for the active marker.
    pub nav_selector: String,
    /// Class added to the navigation link of the current page.
    pub active_class: String,
    /// Selects the element alert banners are inserted into.
    pub alert_container: String,
    /// How long a banner stays on the page before it is removed.
    pub alert_dismiss_after: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nav_selector: nav::NAV_LINK_SELECTOR.into(),
            active_class: nav::ACTIVE_CLASS.into(),
            alert_container: alert::CONTAINER_SELECTOR.into(),
            alert_dismiss_after: alert::DISMISS_AFTER,
        }
    }
}

impl AppConfig for Config {
    const NAME: &'static str = "page";

    fn from_environment() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            nav_selector: env("ROEHN_NAV_SELECTOR", defaults.nav_selector)?,
            active_class: env("ROEHN_ACTIVE_CLASS", defaults.active_class)?,
            alert_container: env("ROEHN_ALERT_CONTAINER", defaults.alert_container)?,
            alert_dismiss_after: env_millis("ROEHN_ALERT_DISMISS_MS", defaults.alert_dismiss_after)?,
        })
    }

    #[cfg(any(test, feature = "testing"))]
    fn test_config() -> anyhow::Result<Self> {
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_delay_names_the_config() {
        unsafe { std::env::set_var("ROEHN_ALERT_DISMISS_MS", "5s") };
        let err = Config::load().unwrap_err();
        unsafe { std::env::remove_var("ROEHN_ALERT_DISMISS_MS") };

        assert_eq!(err.to_string(), "invalid page configuration");
        assert!(err.chain().any(|cause| cause.to_string()
            == "failed to parse configuration variable ROEHN_ALERT_DISMISS_MS"));
    }

    #[test]
    fn defaults() {
        let config = Config::test_config().unwrap();
        assert_eq!(config.nav_selector, ".nav-link");
        assert_eq!(config.active_class, "active");
        assert_eq!(config.alert_container, ".container");
        assert_eq!(config.alert_dismiss_after, Duration::from_millis(5000));
    }
}
