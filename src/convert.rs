//! Conversion from `.repos` distro descriptions to the rosinstall list format.
//!
//! ```yaml
//! repositories:
//!   ros_comm:
//!     type: git
//!     url: https://github.com/ros/ros_comm
//!     version: melodic-devel
//! ```
//!
//! becomes
//!
//! ```yaml
//! - git:
//!     local-name: ros_comm
//!     uri: https://github.com/ros/ros_comm.git
//!     version: melodic-devel
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A `.repos` document.
#[derive(Debug, Clone, Deserialize)]
pub struct ReposFile {
    #[serde(default)]
    pub repositories: BTreeMap<String, ReposEntry>,
}

/// One repository in a `.repos` document.
#[derive(Debug, Clone, Deserialize)]
pub struct ReposEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// The body of one rosinstall item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosinstallEntry {
    #[serde(rename = "local-name")]
    pub local_name: String,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A rosinstall item: `{<kind>: <entry>}`.
pub type RosinstallItem = BTreeMap<String, RosinstallEntry>;

fn with_git_suffix(url: &str) -> String {
    if url.ends_with(".git") {
        url.to_string()
    } else {
        format!("{}.git", url)
    }
}

/// Convert a parsed `.repos` document into rosinstall items, sorted by name.
pub fn to_rosinstall(repos: &ReposFile) -> Vec<RosinstallItem> {
    repos
        .repositories
        .iter()
        .map(|(name, entry)| {
            let mut item = RosinstallItem::new();
            item.insert(
                entry.kind.clone(),
                RosinstallEntry {
                    local_name: name.clone(),
                    uri: with_git_suffix(&entry.url),
                    version: entry.version.clone(),
                },
            );
            item
        })
        .collect()
}

/// Parse `.repos` content and render it as rosinstall YAML.
pub fn convert_str(content: &str) -> Result<String> {
    let repos: ReposFile = serde_yaml::from_str(content).map_err(|e| Error::ManifestParse {
        message: format!("Invalid .repos document: {}", e),
        hint: Some("Expected `repositories: {name: {type, url, version}}`".to_string()),
    })?;
    Ok(serde_yaml::to_string(&to_rosinstall(&repos))?)
}

/// Read a `.repos` file and render it as rosinstall YAML.
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    convert_str(&content)
}
