//! # Repository Aggregation Library
//!
//! This library merges many upstream git repositories (typically every
//! repository of a ROS distro) into one aggregate repository, each as a
//! subtree under its own directory, and then runs external statistics tools
//! against the result. It is driven by the `repo-aggregate` command-line
//! tool.
//!
//! ## Quick Example
//!
//! ```
//! use repo_aggregate::manifest::{self, git_descriptors};
//!
//! let rosinstall = r#"
//! - git:
//!     local-name: ros_comm
//!     uri: https://github.com/ros/ros_comm.git
//!     version: indigo-devel
//! - svn:
//!     local-name: legacy
//!     uri: https://example.org/svn/legacy
//! "#;
//!
//! let entries = manifest::parse(rosinstall).unwrap();
//! let descriptors = git_descriptors(&entries);
//! assert_eq!(descriptors.len(), 1);
//! assert_eq!(descriptors[0].version, "indigo-devel");
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the list of repositories to import, read from
//!   a rosinstall file, a `.repos` distro description, or generated by
//!   `rosinstall_generator`.
//! - **Aggregate repository (`repository`)**: bootstrapping and the subtree
//!   import of a single repository, behind the mockable `GitOperations` trait.
//! - **Orchestration (`orchestrator`)**: runs bootstrap, imports and analysis
//!   in order, collecting per-repository failures into the Import Outcome
//!   Map instead of aborting.
//! - **Analysis (`analysis`)**: `gitstats`, `cloc` and `sloccount` runs.
//! - **Processes (`process`, `git`)**: every external command, with typed
//!   failure classification.
//!
//! Two small helpers round this out: `convert` turns `.repos` files into
//! rosinstall lists, and `authors` summarizes yearly MergeStat author counts.

pub mod analysis;
pub mod authors;
pub mod config;
pub mod convert;
pub mod defaults;
pub mod error;
pub mod git;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod process;
pub mod repository;

#[cfg(test)]
mod manifest_proptest;
