//! Prompt options.
//!
//! Options are plain data; with the `config` feature they can also be read from a TOML
//! file such as:
//!
//! ```toml
//! line-size = 10
//! start-in-search = false
//! disable-color = false
//! vim-keys = true
//! ```

use crate::error::{PromptError, Result};

/// Default number of visible rows.
pub const DEFAULT_LINE_SIZE: usize = 5;

/// Behaviour switches of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct Options {
    /// Rows of the list shown at once
    pub line_size: usize,
    /// Begin with the search input active
    pub start_in_search: bool,
    /// Render without colors
    pub disable_color: bool,
    /// Enable h/j/k/l navigation
    pub vim_keys: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_size: DEFAULT_LINE_SIZE,
            start_in_search: false,
            disable_color: false,
            vim_keys: true,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.line_size < 1 {
            return Err(PromptError::configuration(format!(
                "line size {} must be greater than 0",
                self.line_size
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
mod file {
    use super::Options;
    use crate::error::{PromptError, Result};
    use std::path::{Path, PathBuf};

    impl Options {
        /// Parse and validate options from TOML text.
        pub fn from_toml_str(text: &str) -> Result<Self> {
            let options: Options = toml::from_str(text)
                .map_err(|err| PromptError::configuration(err.to_string()))?;
            options.validate()?;
            Ok(options)
        }

        /// Read options from `path`.
        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|err| {
                PromptError::configuration(format!("cannot read {}: {err}", path.display()))
            })?;
            Self::from_toml_str(&text)
        }

        /// `<config dir>/listprompt/config.toml`, when the platform has a config dir.
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("listprompt").join("config.toml"))
        }

        /// Read the default config file, falling back to defaults when it does not exist.
        pub fn load_default() -> Result<Self> {
            match Self::default_path() {
                Some(path) if path.exists() => Self::load(path),
                _ => Ok(Self::default()),
            }
        }
    }
}
