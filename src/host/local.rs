//! The machine nodeverify runs on.
//!
//! All absolute paths are resolved under a configurable root, so a mounted
//! image can be verified as well as the live system. Package and service
//! queries always go to the live system's own tools.

use crate::error::ProbeError;
use crate::host::command::run_query;
use crate::host::{FileInfo, FileKind, Host};
use crate::profile::OsFamily;
use std::fs;
use std::io::ErrorKind;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// [`Host`] backed by the local filesystem and OS tools.
#[derive(Debug, Clone)]
pub struct LocalHost {
    root: PathBuf,
    os_family: Option<OsFamily>,
    address: String,
    connect_timeout: Duration,
    tool_dir: Option<PathBuf>,
}

impl LocalHost {
    /// Create a host view rooted at `root` (usually `/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            os_family: None,
            address: "127.0.0.1".to_string(),
            connect_timeout: Duration::from_secs(2),
            tool_dir: None,
        }
    }

    /// Set the OS family used to pick the package query tool.
    pub fn with_os_family(mut self, os_family: Option<OsFamily>) -> Self {
        self.os_family = os_family;
        self
    }

    /// Set the address probed by port checks.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Take the package and service query tools from `dir` instead of `PATH`.
    #[cfg(test)]
    fn with_tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_dir = Some(dir.into());
        self
    }

    fn tool(&self, name: &str) -> String {
        match &self.tool_dir {
            Some(dir) => dir.join(name).display().to_string(),
            None => name.to_string(),
        }
    }

    /// Get the filesystem root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a target path onto the local filesystem.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("/") {
            Ok(relative) => self.root.join(relative),
            Err(_) => self.root.join(path),
        }
    }

    /// `(name, uid)` pairs from the root's `/etc/passwd`.
    fn passwd_entries(&self) -> Result<Vec<(String, u32)>, ProbeError> {
        let path = self.resolve(Path::new("/etc/passwd"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(ProbeError::Unreadable { path, source }),
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .filter_map(|line| {
                let mut fields = line.split(':');
                let name = fields.next()?;
                let uid = fields.nth(1)?.parse().ok()?;
                Some((name.to_string(), uid))
            })
            .collect())
    }

    fn owner_name(&self, uid: u32) -> Result<String, ProbeError> {
        Ok(self
            .passwd_entries()?
            .into_iter()
            .find(|(_, id)| *id == uid)
            .map(|(name, _)| name)
            .unwrap_or_else(|| uid.to_string()))
    }

    #[cfg(unix)]
    fn owner_of(&self, metadata: &fs::Metadata) -> Result<Option<String>, ProbeError> {
        use std::os::unix::fs::MetadataExt;
        self.owner_name(metadata.uid()).map(Some)
    }

    #[cfg(not(unix))]
    fn owner_of(&self, _metadata: &fs::Metadata) -> Result<Option<String>, ProbeError> {
        Ok(None)
    }
}

/// Whether a dpkg `want ok status` triple describes an installed package.
///
/// A held package (`hold ok installed`) is installed too.
fn dpkg_status_installed(status: &str) -> bool {
    let words: Vec<&str> = status.split_whitespace().collect();
    matches!(
        words.as_slice(),
        ["install" | "hold", "ok", "installed"]
    )
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Host for LocalHost {
    fn file_info(&self, path: &Path) -> Result<Option<FileInfo>, ProbeError> {
        let full_path = self.resolve(path);
        let metadata = match fs::metadata(&full_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ProbeError::Unreadable {
                    path: full_path,
                    source,
                })
            }
        };

        let kind = if metadata.is_file() {
            FileKind::File
        } else if metadata.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        };

        Ok(Some(FileInfo {
            kind,
            owner: self.owner_of(&metadata)?,
        }))
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>, ProbeError> {
        let full_path = self.resolve(path);
        match fs::read(&full_path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ProbeError::Unreadable {
                path: full_path,
                source,
            }),
        }
    }

    fn user_exists(&self, name: &str) -> Result<bool, ProbeError> {
        Ok(self.passwd_entries()?.iter().any(|(user, _)| user == name))
    }

    fn package_installed(&self, name: &str) -> Result<bool, ProbeError> {
        let dpkg = self.os_family.as_ref().map(|f| f.uses_dpkg()).unwrap_or(false);
        if dpkg {
            let out = run_query(&self.tool("dpkg-query"), &["-W", "-f=${Status}", name])?;
            Ok(out.success && dpkg_status_installed(&out.stdout))
        } else {
            Ok(run_query(&self.tool("rpm"), &["-q", name])?.success)
        }
    }

    fn service_running(&self, name: &str) -> Result<bool, ProbeError> {
        Ok(run_query(&self.tool("systemctl"), &["is-active", "--quiet", name])?.success)
    }

    fn port_listening(&self, port: u16) -> Result<bool, ProbeError> {
        let addrs = (self.address.as_str(), port)
            .to_socket_addrs()
            .map_err(|e| ProbeError::Query {
                command: format!("resolve {}:{}", self.address, port),
                message: e.to_string(),
            })?;

        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.connect_timeout).is_ok() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
