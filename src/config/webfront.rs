use super::find_config_file_in;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const WELCOME_ANONYMOUS: &str = "welcome-anonymous.txt";
pub const WELCOME_REGISTERED: &str = "welcome-registered.txt";
pub const NAV_LINKS: &str = "nav-links.conf";

/// Front page text and link files, each `None` when no location has it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebfrontPaths {
    pub welcome_anonymous: Option<PathBuf>,
    pub welcome_registered: Option<PathBuf>,
    pub nav_links: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

impl WebfrontPaths {
    pub fn discover() -> Self {
        Self::discover_in(&super::config_locations())
    }

    pub fn discover_in(locations: &[PathBuf]) -> Self {
        let lookup = |name: &str| find_config_file_in(locations, Path::new("webfront").join(name));
        Self {
            welcome_anonymous: lookup(WELCOME_ANONYMOUS),
            welcome_registered: lookup(WELCOME_REGISTERED),
            nav_links: lookup(NAV_LINKS),
        }
    }

    /// Welcome text for the front page.
    pub fn welcome_message(&self, registered: bool) -> Result<Option<String>> {
        let path = if registered {
            &self.welcome_registered
        } else {
            &self.welcome_anonymous
        };

        match path {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("reading {}", path.display())),
            None => Ok(None),
        }
    }

    pub fn nav_links(&self) -> Result<Vec<NavLink>> {
        match &self.nav_links {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Ok(parse_nav_links(&content))
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Parses `Title=URL` lines. Blank lines, `#` comments and lines without
/// a `=` are skipped.
pub fn parse_nav_links(content: &str) -> Vec<NavLink> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(title, url)| NavLink {
            title: title.trim().to_string(),
            url: url.trim().to_string(),
        })
        .filter(|link| !link.title.is_empty() && !link.url.is_empty())
        .collect()
}
