//! @ai:module:intent Load defaults for tag rewriting from a TOML file
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, CONFIG_FILE_NAME
//! @ai:module:stateless true

use crate::case::CasePolicy;
use crate::error::{Error, Result};
use crate::request::{parse_list, TagRequest};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File picked up from the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".easytags.toml";

/// @ai:intent Defaults applied when the command line does not say otherwise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Tags added when none are given, as `name[:case]` items
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default = "default_case")]
    pub case: String,
    #[serde(default = "default_true")]
    pub nested: bool,
    #[serde(default)]
    pub gofmt: bool,
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: default_tags(),
            case: default_case(),
            nested: true,
            gofmt: false,
            skip_dirs: default_skip_dirs(),
        }
    }
}

fn default_tags() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_case() -> String {
    "snake".to_string()
}

fn default_true() -> bool {
    true
}

fn default_skip_dirs() -> Vec<String> {
    vec!["vendor".to_string(), "testdata".to_string()]
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// @ai:intent Load the explicit config, else the one in `dir`, else defaults
    /// @ai:effects fs:read
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            tracing::debug!("Using config {}", local.display());
            return Self::load(&local);
        }

        Ok(Self::default())
    }

    pub fn case_policy(&self) -> CasePolicy {
        self.case.parse::<CasePolicy>().unwrap_or_default()
    }

    /// @ai:intent Requests used when the command line names no tags
    /// @ai:effects pure
    pub fn default_requests(&self, case: &CasePolicy) -> Vec<TagRequest> {
        parse_list(&self.tags.join(","), case)
    }
}
