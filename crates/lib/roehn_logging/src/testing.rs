use crate::Config;
use roehn_config::AppConfig as _;

/// Route log output through the test harness, so it only shows for failing
/// tests. Uses the filter of [`Config::test_config`].
///
/// Safe to call from every test, only the first call installs a subscriber.
pub fn init() {
    let Ok(config) = Config::test_config() else {
        return;
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(config.filter)
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
