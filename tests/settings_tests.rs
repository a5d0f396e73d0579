use rstest::rstest;
use std::fs;
use webfront::config::settings::{os_version, Settings, NAV_VERSION, SETTINGS_FILE};
use webfront::config::webfront::WebfrontPaths;

#[test]
fn test_valid_nav_version() {
    // Anything dotted passes as a release number
    assert!(NAV_VERSION.contains('.'));
}

#[test]
fn test_valid_os_version() {
    let os_list = ["windows", "macos", "linux", "freebsd"];
    let os_version = os_version().to_lowercase();
    assert!(os_list.iter().any(|os| os_version.contains(os)));
}

#[rstest]
#[case("log_filter = \"debug\"", "debug", "webfront.db")]
#[case("database_path = \"/tmp/nav.db\"", "info", "/tmp/nav.db")]
#[case("", "info", "webfront.db")]
fn test_settings_file(
    #[case] content: &str,
    #[case] log_filter: &str,
    #[case] database_path: &str,
) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(SETTINGS_FILE), content).unwrap();

    let settings = Settings::load_from(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(settings.log_filter, log_filter);
    assert_eq!(settings.database_path, database_path);
}

#[test]
fn test_webfront_paths_point_into_webfront_dir() {
    let dir = tempfile::tempdir().unwrap();
    let webfront = dir.path().join("webfront");
    fs::create_dir_all(&webfront).unwrap();
    for name in ["welcome-anonymous.txt", "welcome-registered.txt", "nav-links.conf"] {
        fs::write(webfront.join(name), "").unwrap();
    }

    let paths = WebfrontPaths::discover_in(&[dir.path().to_path_buf()]);
    assert_eq!(paths.welcome_anonymous, Some(webfront.join("welcome-anonymous.txt")));
    assert_eq!(paths.welcome_registered, Some(webfront.join("welcome-registered.txt")));
    assert_eq!(paths.nav_links, Some(webfront.join("nav-links.conf")));
}
