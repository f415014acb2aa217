//! The process-wide configuration can be installed exactly once. Kept in its
//! own test binary so no other test touches the instance first.

use sitetheme::{config, ConfigError, DateFormat, ThemeConfig};
use std::thread;

#[test]
fn install_once_then_read_everywhere() {
    let mut custom = ThemeConfig::default();
    custom.site.title = "Installed".to_string();
    custom.date.date_format = DateFormat::DayMonthYear;

    let installed = config::install(custom.clone()).unwrap();
    assert_eq!(installed, &custom);
    assert!(std::ptr::eq(installed, config::theme_config()));

    let mut other = ThemeConfig::default();
    other.site.title = "Second".to_string();
    assert!(matches!(config::install(other), Err(ConfigError::AlreadyInstalled)));

    let titles: Vec<String> = (0..4)
        .map(|_| thread::spawn(|| config::theme_config().site.title.clone()))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();
    assert!(titles.iter().all(|t| t == "Installed"));

    assert_eq!(config::theme_config().date.date_format, DateFormat::DayMonthYear);
    assert_eq!(config::theme_config().site.title, config::theme_config().site.title);
}
