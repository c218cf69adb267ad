//! Light/dark preference, persisted as a single string flag.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the exact flag values are recognised.
impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Where the flag lives.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/portfolio-feeds/theme`, or a file in the working
    /// directory on platforms without a config dir.
    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .map(|dir| dir.join("portfolio-feeds").join("theme"))
            .unwrap_or_else(|| PathBuf::from(".portfolio-theme"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored preference; [`Theme::Light`] when absent or unrecognised.
    pub fn load(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|()| {
                warn!(path = %self.path.display(), value = raw.trim(), "unrecognised theme flag");
                Theme::default()
            }),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no stored theme");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, theme.as_str())
    }
}
