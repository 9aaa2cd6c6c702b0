//! Target host surface.
//!
//! The [`Host`] trait is everything the check engine needs to know about the
//! machine under test: file metadata and content, system users, packages,
//! services and listening ports. [`LocalHost`] answers these questions for
//! the machine nodeverify runs on; tests substitute their own implementation.
//!
//! A `false`/`None` answer is an observation, not an error. Errors are
//! reserved for questions that could not be answered at all.

pub mod command;
pub mod local;
pub mod os_release;

pub use command::{run_query, QueryOutput};
pub use local::LocalHost;
pub use os_release::{detect_os_family, parse_os_release};

use crate::error::ProbeError;
use std::path::Path;

/// What kind of filesystem entry a path is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::File => write!(f, "file"),
            FileKind::Directory => write!(f, "directory"),
            FileKind::Other => write!(f, "special file"),
        }
    }
}

/// Metadata of an existing filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub kind: FileKind,
    /// Owning user name, or the numeric uid when it has no passwd entry.
    pub owner: Option<String>,
}

/// Read-only view of the machine under test.
pub trait Host {
    /// Metadata for `path`, or `None` if nothing exists there.
    fn file_info(&self, path: &Path) -> Result<Option<FileInfo>, ProbeError>;

    /// Content of the file at `path`, or `None` if it does not exist.
    fn read_file(&self, path: &Path) -> Result<Option<String>, ProbeError>;

    /// Whether a system user account exists.
    fn user_exists(&self, name: &str) -> Result<bool, ProbeError>;

    /// Whether an OS package is installed.
    fn package_installed(&self, name: &str) -> Result<bool, ProbeError>;

    /// Whether a service is running.
    fn service_running(&self, name: &str) -> Result<bool, ProbeError>;

    /// Whether something accepts TCP connections on `port`.
    fn port_listening(&self, port: u16) -> Result<bool, ProbeError>;
}
