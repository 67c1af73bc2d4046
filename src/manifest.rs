//! # Manifest Loading
//!
//! A manifest lists the repositories to import. Two document shapes are
//! understood:
//!
//! - **rosinstall** (a YAML sequence): every item is a single-key mapping
//!   whose key is the VCS kind and whose value carries `local-name`, `uri`
//!   and `version`.
//!
//!   ```yaml
//!   - git:
//!       local-name: ros_comm
//!       uri: https://github.com/ros/ros_comm.git
//!       version: indigo-devel
//!   ```
//!
//! - **distro description** (a YAML mapping, `.repos` style): a
//!   `repositories` key mapping each name to `{type, url, version}`.
//!
//! - **keyed rosinstall** (a YAML mapping without `repositories`): each
//!   value is a rosinstall item, `name: {git: {local-name, uri, version}}`.
//!   The key stands in for a missing `local-name`.
//!
//! Only `git` entries are actionable. Everything else is kept as a
//! [`ManifestEntry::Skipped`] so the caller can report it. No schema
//! validation happens beyond these key lookups.
//!
//! Manifests are read from a file or produced by running an external
//! generator (`rosinstall_generator`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::{git, process};

/// One upstream git repository to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Unique key within a manifest; also the remote name and subtree path.
    pub local_name: String,
    /// Branch, tag or commit to merge.
    pub version: String,
    /// Fetch URL.
    pub uri: String,
}

impl Descriptor {
    pub fn new(
        local_name: impl Into<String>,
        version: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            local_name: local_name.into(),
            version: version.into(),
            uri: uri.into(),
        }
    }

    /// Revisions `version` may name once the remote has been fetched, in
    /// lookup order: a branch of the remote, a tag of the remote, then a
    /// commit id.
    ///
    /// The commit id is only tried when `version` looks like one, so an
    /// unknown branch name never resolves to a local ref of the aggregate.
    pub fn candidate_refs(&self) -> Vec<String> {
        let mut refs = vec![
            format!("refs/remotes/{}/{}", self.local_name, self.version),
            format!(
                "{}/{}",
                git::remote_tags_prefix(&self.local_name),
                self.version
            ),
        ];
        if looks_like_commit_id(&self.version) {
            refs.push(self.version.clone());
        }
        refs
    }
}

/// Full or abbreviated hexadecimal object name.
fn looks_like_commit_id(version: &str) -> bool {
    (7..=40).contains(&version.len()) && version.chars().all(|c| c.is_ascii_hexdigit())
}

/// A single manifest item, either actionable or skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    Git(Descriptor),
    Skipped {
        /// VCS kind marker of the entry, when it had one.
        kind: Option<String>,
        /// Repository name, when it could be read.
        name: Option<String>,
        reason: String,
    },
}

impl ManifestEntry {
    fn skipped(kind: Option<&str>, name: Option<String>, reason: impl Into<String>) -> Self {
        ManifestEntry::Skipped {
            kind: kind.map(str::to_string),
            name,
            reason: reason.into(),
        }
    }
}

/// Where a manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A rosinstall or distro description file on disk.
    File(PathBuf),
    /// Output of the external manifest generator.
    Generate {
        generator: String,
        distro: String,
        metapackage: String,
    },
}

impl ManifestSource {
    /// Read or generate the manifest and parse it.
    pub fn load(&self) -> Result<Vec<ManifestEntry>> {
        match self {
            ManifestSource::File(path) => {
                log::info!("Using passed rosinstall [{}] instead of generating", path.display());
                from_file(path)
            }
            ManifestSource::Generate {
                generator,
                distro,
                metapackage,
            } => {
                let content = generate(generator, distro, metapackage)?;
                parse(&content)
            }
        }
    }
}

/// Run the manifest generator for `distro`, restricted to `metapackage`
/// and its dependencies (`ALL` selects everything).
pub fn generate(generator: &str, distro: &str, metapackage: &str) -> Result<String> {
    log::info!(
        "Generating rosinstall for rosdistro: {} metapackage: {}",
        distro,
        metapackage
    );
    process::run_capture(
        generator,
        [
            "--upstream-development",
            "--deps",
            "--rosdistro",
            distro,
            metapackage,
        ],
        None,
    )
}

/// Parse a manifest file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestEntry>> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Parse manifest content in either supported shape.
///
/// When two git entries share a `local-name`, the first one wins and the
/// later one is reported as skipped.
pub fn parse(content: &str) -> Result<Vec<ManifestEntry>> {
    let document: Value = serde_yaml::from_str(content)?;

    let entries = match document {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| parse_rosinstall_item(item, None))
            .collect(),
        Value::Mapping(map) if map.contains_key("repositories") => parse_distro_description(map)?,
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, item)| parse_rosinstall_item(item, scalar_string(&key)))
            .collect(),
        _ => {
            return Err(Error::ManifestParse {
                message: "Expected a sequence of repositories or a mapping".to_string(),
                hint: Some(
                    "Use a rosinstall list (`- git: {...}`) or a `repositories:` mapping"
                        .to_string(),
                ),
            })
        }
    };

    Ok(dedupe(entries))
}

/// Returns only the actionable descriptors, in manifest order.
pub fn git_descriptors(entries: &[ManifestEntry]) -> Vec<&Descriptor> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            ManifestEntry::Git(descriptor) => Some(descriptor),
            ManifestEntry::Skipped { .. } => None,
        })
        .collect()
}

fn dedupe(entries: Vec<ManifestEntry>) -> Vec<ManifestEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|entry| match entry {
            ManifestEntry::Git(descriptor) if !seen.insert(descriptor.local_name.clone()) => {
                warn!(
                    "Duplicate local-name '{}' in manifest, keeping the first entry",
                    descriptor.local_name
                );
                ManifestEntry::skipped(
                    Some("git"),
                    Some(descriptor.local_name),
                    "duplicate local-name",
                )
            }
            other => other,
        })
        .collect()
}

/// Scalars such as `version: 1.0` arrive as numbers; treat them as text.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(scalar_string).filter(|s| !s.is_empty())
}

/// `{<kind>: {local-name, uri, version}}`, named `key` when it comes from a
/// keyed mapping.
fn parse_rosinstall_item(item: Value, key: Option<String>) -> ManifestEntry {
    let map = match item {
        Value::Mapping(map) => map,
        _ => return ManifestEntry::skipped(None, key, "entry is not a mapping"),
    };

    let Some((kind_key, value)) = map.into_iter().next() else {
        return ManifestEntry::skipped(None, key, "empty entry");
    };
    let Some(kind) = kind_key.as_str().map(str::to_string) else {
        return ManifestEntry::skipped(None, key, "entry kind is not a string");
    };

    let fields = match value {
        Value::Mapping(fields) => fields,
        _ => {
            return ManifestEntry::skipped(Some(&kind), key, "entry body is not a mapping");
        }
    };

    let name = field(&fields, "local-name").or(key);
    if kind != "git" {
        return ManifestEntry::skipped(Some(&kind), name, "not git");
    }

    descriptor_from(&kind, name, field(&fields, "uri"), field(&fields, "version"))
}

fn parse_distro_description(map: Mapping) -> Result<Vec<ManifestEntry>> {
    let repositories = match map.get("repositories") {
        Some(Value::Mapping(repositories)) => repositories,
        Some(Value::Null) => return Ok(Vec::new()),
        _ => {
            return Err(Error::ManifestParse {
                message: "`repositories` must be a mapping".to_string(),
                hint: Some("Expected `repositories: {name: {type, url, version}}`".to_string()),
            })
        }
    };

    let entries = repositories
        .iter()
        .map(|(key, value)| {
            let name = scalar_string(key);
            let Value::Mapping(fields) = value else {
                return ManifestEntry::skipped(None, name, "entry body is not a mapping");
            };
            match field(fields, "type") {
                Some(kind) if kind == "git" => {
                    descriptor_from(&kind, name, field(fields, "url"), field(fields, "version"))
                }
                Some(kind) => ManifestEntry::skipped(Some(&kind), name, "not git"),
                None => ManifestEntry::skipped(None, name, "missing type"),
            }
        })
        .collect();

    Ok(entries)
}

fn descriptor_from(
    kind: &str,
    name: Option<String>,
    uri: Option<String>,
    version: Option<String>,
) -> ManifestEntry {
    match (name, uri, version) {
        (Some(name), Some(uri), Some(version)) => {
            ManifestEntry::Git(Descriptor::new(name, version, uri))
        }
        (None, _, _) => ManifestEntry::skipped(Some(kind), None, "missing local-name"),
        (Some(name), None, _) => ManifestEntry::skipped(Some(kind), Some(name), "missing uri"),
        (Some(name), _, None) => {
            ManifestEntry::skipped(Some(kind), Some(name), "missing version")
        }
    }
}
