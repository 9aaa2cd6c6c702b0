//! Assertion primitives.
//!
//! An [`Assertion`] is a declarative observation of the target host. It is
//! evaluated against a [`Target`] and yields an [`Outcome`]:
//! - `Match` / `Mismatch` for an expectation that was evaluated, each with a
//!   message describing what was observed
//! - `Err(ProbeError)` only when the observation itself could not be made
//!
//! Primitives are grouped by domain:
//! - [`filesystem`] - existence, kind, ownership, content
//! - [`system`] - users, packages, services, ports
//! - [`api`] - HTTP body and JSON value checks
//!
//! Any assertion can be negated with [`Assertion::negate`] and several can be
//! combined with [`Assertion::All`].
//!
//! # Example
//!
//! ```
//! use nodeverify::assertions::Assertion;
//!
//! let absent = Assertion::exists("/etc/init.d/elasticsearch").negate();
//! assert!(matches!(absent, Assertion::Not(_)));
//! ```

pub mod api;
pub mod filesystem;
pub mod system;

use crate::error::ProbeError;
use crate::host::Host;
use crate::http::{Api, Credentials, JsonPath};
use serde_json::Value;
use std::path::PathBuf;

/// Result of evaluating an assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Expectation met; describes what was observed.
    Match(String),
    /// Expectation not met; describes the discrepancy.
    Mismatch(String),
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Match(msg) | Outcome::Mismatch(msg) => msg,
        }
    }

    /// Swap match and mismatch.
    pub fn negate(self) -> Self {
        match self {
            Outcome::Match(msg) => Outcome::Mismatch(format!("unexpectedly: {}", msg)),
            Outcome::Mismatch(msg) => Outcome::Match(msg),
        }
    }
}

/// What assertions are evaluated against.
#[derive(Clone, Copy)]
pub struct Target<'a> {
    pub host: &'a dyn Host,
    pub api: &'a dyn Api,
}

impl<'a> Target<'a> {
    pub fn new(host: &'a dyn Host, api: &'a dyn Api) -> Self {
        Self { host, api }
    }
}

/// An authenticated GET against the cluster API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub credentials: Credentials,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            path: path.into(),
            credentials: credentials.clone(),
        }
    }
}

/// A single observable expectation.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    /// Something exists at the path.
    Exists { path: PathBuf },
    /// A regular file exists at the path.
    IsFile { path: PathBuf },
    /// A directory exists at the path.
    IsDirectory { path: PathBuf },
    /// The path is owned by the named user.
    OwnedBy { path: PathBuf, owner: String },
    /// The file content contains a literal.
    Contains { path: PathBuf, literal: String },
    /// The file content matches a regular expression.
    Matches { path: PathBuf, pattern: String },

    /// A system user account exists.
    UserExists { name: String },
    /// An OS package is installed.
    PackageInstalled { name: String },
    /// A service is running.
    ServiceRunning { name: String },
    /// A TCP port accepts connections.
    PortListening { port: u16 },

    /// The response body contains a literal.
    BodyContains { request: ApiRequest, literal: String },
    /// The response body matches a regular expression.
    BodyMatches { request: ApiRequest, pattern: String },
    /// The value at a JSON path equals `expected`.
    JsonEquals {
        request: ApiRequest,
        path: JsonPath,
        expected: Value,
    },
    /// A JSON path resolves.
    JsonHasPath { request: ApiRequest, path: JsonPath },

    /// Negation of the inner assertion.
    Not(Box<Assertion>),
    /// Every inner assertion must match.
    All(Vec<Assertion>),
}

impl Assertion {
    pub fn exists(path: impl Into<PathBuf>) -> Self {
        Self::Exists { path: path.into() }
    }

    pub fn is_file(path: impl Into<PathBuf>) -> Self {
        Self::IsFile { path: path.into() }
    }

    pub fn is_directory(path: impl Into<PathBuf>) -> Self {
        Self::IsDirectory { path: path.into() }
    }

    pub fn owned_by(path: impl Into<PathBuf>, owner: impl Into<String>) -> Self {
        Self::OwnedBy {
            path: path.into(),
            owner: owner.into(),
        }
    }

    pub fn contains(path: impl Into<PathBuf>, literal: impl Into<String>) -> Self {
        Self::Contains {
            path: path.into(),
            literal: literal.into(),
        }
    }

    pub fn matches(path: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self::Matches {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    pub fn body_contains(request: ApiRequest, literal: impl Into<String>) -> Self {
        Self::BodyContains {
            request,
            literal: literal.into(),
        }
    }

    pub fn body_matches(request: ApiRequest, pattern: impl Into<String>) -> Self {
        Self::BodyMatches {
            request,
            pattern: pattern.into(),
        }
    }

    pub fn json_equals(request: ApiRequest, path: JsonPath, expected: impl Into<Value>) -> Self {
        Self::JsonEquals {
            request,
            path,
            expected: expected.into(),
        }
    }

    /// Wrap this assertion in a negation.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate against the target.
    pub fn evaluate(&self, target: &Target<'_>) -> Result<Outcome, ProbeError> {
        match self {
            Assertion::Exists { path } => filesystem::exists(target.host, path),
            Assertion::IsFile { path } => filesystem::is_file(target.host, path),
            Assertion::IsDirectory { path } => filesystem::is_directory(target.host, path),
            Assertion::OwnedBy { path, owner } => filesystem::owned_by(target.host, path, owner),
            Assertion::Contains { path, literal } => {
                filesystem::contains(target.host, path, literal)
            }
            Assertion::Matches { path, pattern } => {
                filesystem::matches(target.host, path, pattern)
            }
            Assertion::UserExists { name } => system::user_exists(target.host, name),
            Assertion::PackageInstalled { name } => system::package_installed(target.host, name),
            Assertion::ServiceRunning { name } => system::service_running(target.host, name),
            Assertion::PortListening { port } => system::port_listening(target.host, *port),
            Assertion::BodyContains { request, literal } => {
                api::body_contains(target.api, request, literal)
            }
            Assertion::BodyMatches { request, pattern } => {
                api::body_matches(target.api, request, pattern)
            }
            Assertion::JsonEquals {
                request,
                path,
                expected,
            } => api::json_equals(target.api, request, path, expected),
            Assertion::JsonHasPath { request, path } => {
                api::json_has_path(target.api, request, path)
            }
            Assertion::Not(inner) => inner.evaluate(target).map(Outcome::negate),
            Assertion::All(inner) => evaluate_all(inner, target),
        }
    }
}

fn evaluate_all(assertions: &[Assertion], target: &Target<'_>) -> Result<Outcome, ProbeError> {
    let mut matched = Vec::new();
    let mut mismatched = Vec::new();

    for assertion in assertions {
        match assertion.evaluate(target)? {
            Outcome::Match(msg) => matched.push(msg),
            Outcome::Mismatch(msg) => mismatched.push(msg),
        }
    }

    if mismatched.is_empty() {
        Ok(Outcome::Match(matched.join("; ")))
    } else {
        Ok(Outcome::Mismatch(mismatched.join("; ")))
    }
}

/// Literal in quotes for messages.
pub(crate) fn quoted(text: &str) -> String {
    format!("'{}'", text)
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory host and API doubles shared by the assertion and check tests.

    use super::*;
    use crate::host::{FileInfo, FileKind};
    use crate::http::ApiResponse;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet, VecDeque};
    use std::path::Path;

    #[derive(Default)]
    pub struct FakeHost {
        pub files: HashMap<PathBuf, (FileKind, String, String)>,
        pub users: HashSet<String>,
        pub packages: HashSet<String>,
        pub services: HashSet<String>,
        pub ports: HashSet<u16>,
        pub broken: HashSet<PathBuf>,
    }

    impl FakeHost {
        pub fn file(mut self, path: &str, owner: &str, content: &str) -> Self {
            self.files.insert(
                PathBuf::from(path),
                (FileKind::File, owner.to_string(), content.to_string()),
            );
            self
        }

        pub fn dir(mut self, path: &str, owner: &str) -> Self {
            self.files.insert(
                PathBuf::from(path),
                (FileKind::Directory, owner.to_string(), String::new()),
            );
            self
        }

        pub fn broken(mut self, path: &str) -> Self {
            self.broken.insert(PathBuf::from(path));
            self
        }

        fn check_broken(&self, path: &Path) -> Result<(), ProbeError> {
            if self.broken.contains(path) {
                return Err(ProbeError::Unreadable {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Ok(())
        }
    }

    impl Host for FakeHost {
        fn file_info(&self, path: &Path) -> Result<Option<FileInfo>, ProbeError> {
            self.check_broken(path)?;
            Ok(self.files.get(path).map(|(kind, owner, _)| FileInfo {
                kind: *kind,
                owner: Some(owner.clone()),
            }))
        }

        fn read_file(&self, path: &Path) -> Result<Option<String>, ProbeError> {
            self.check_broken(path)?;
            Ok(self
                .files
                .get(path)
                .filter(|(kind, _, _)| *kind == FileKind::File)
                .map(|(_, _, content)| content.clone()))
        }

        fn user_exists(&self, name: &str) -> Result<bool, ProbeError> {
            Ok(self.users.contains(name))
        }

        fn package_installed(&self, name: &str) -> Result<bool, ProbeError> {
            Ok(self.packages.contains(name))
        }

        fn service_running(&self, name: &str) -> Result<bool, ProbeError> {
            Ok(self.services.contains(name))
        }

        fn port_listening(&self, port: u16) -> Result<bool, ProbeError> {
            Ok(self.ports.contains(&port))
        }
    }

    /// Replies per path; a queue is drained one reply per call and its last
    /// reply repeats. Unknown paths are transport errors.
    #[derive(Default)]
    pub struct FakeApi {
        pub replies: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
        pub calls: RefCell<Vec<(String, String)>>,
    }

    impl FakeApi {
        pub fn reply(self, path: &str, status: u16, body: &str) -> Self {
            self.replies
                .borrow_mut()
                .entry(path.to_string())
                .or_default()
                .push_back((status, body.to_string()));
            self
        }

        pub fn call_count(&self, path: &str) -> usize {
            self.calls.borrow().iter().filter(|(p, _)| p == path).count()
        }
    }

    impl Api for FakeApi {
        fn get(&self, path: &str, credentials: &Credentials) -> Result<ApiResponse, ProbeError> {
            self.calls
                .borrow_mut()
                .push((path.to_string(), credentials.username.clone()));
            let mut replies = self.replies.borrow_mut();
            let queue = replies.get_mut(path).ok_or_else(|| ProbeError::Transport {
                url: path.to_string(),
                message: "connection refused".to_string(),
            })?;
            let (status, body) = if queue.len() > 1 {
                queue.pop_front().unwrap_or_default()
            } else {
                queue.front().cloned().unwrap_or_default()
            };
            Ok(ApiResponse { status, body })
        }
    }
}
