pub mod settings;
pub mod webfront;

use std::path::{Path, PathBuf};

/// Environment variable that, when set, is searched before any other location.
pub const CONFIG_DIR_ENV: &str = "NAV_CONFIG_DIR";

/// Directories searched for configuration files, in priority order.
pub fn config_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            locations.push(PathBuf::from(dir));
        }
    }
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("nav"));
    }
    locations.push(PathBuf::from("/etc/nav"));

    locations
}

/// First existing `relative` file under the standard config locations.
pub fn find_config_file(relative: impl AsRef<Path>) -> Option<PathBuf> {
    find_config_file_in(&config_locations(), relative)
}

pub fn find_config_file_in(locations: &[PathBuf], relative: impl AsRef<Path>) -> Option<PathBuf> {
    let relative = relative.as_ref();
    locations
        .iter()
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_first_location_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        for dir in [&first, &second] {
            fs::create_dir_all(dir.path().join("webfront")).unwrap();
            fs::write(dir.path().join("webfront").join("nav-links.conf"), "").unwrap();
        }

        let locations = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = find_config_file_in(&locations, Path::new("webfront").join("nav-links.conf"));
        assert_eq!(found, Some(first.path().join("webfront").join("nav-links.conf")));
    }

    #[test]
    fn test_falls_through_to_later_location() {
        let empty = tempfile::tempdir().unwrap();
        let populated = tempfile::tempdir().unwrap();
        fs::write(populated.path().join("webfront.toml"), "").unwrap();

        let locations = vec![empty.path().to_path_buf(), populated.path().to_path_buf()];
        assert_eq!(
            find_config_file_in(&locations, "webfront.toml"),
            Some(populated.path().join("webfront.toml"))
        );
    }

    #[test]
    fn test_directories_are_not_config_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("webfront")).unwrap();

        assert!(find_config_file_in(&[dir.path().to_path_buf()], "webfront").is_none());
        assert!(find_config_file_in(&[], "webfront.toml").is_none());
    }
}
