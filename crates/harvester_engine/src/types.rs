use std::fmt;
use std::path::PathBuf;

use crate::persist::PersistError;

/// What a request is for; selects the timeout applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Page,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Downloading,
    Extracting,
    Writing,
    /// Somewhere in the per-page flow; used when the exact step is unknown.
    Processing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

impl FetchOutput {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub headers: Vec<(String, String)>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Persist,
    Panicked,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "HTTP status: {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Persist => write!(f, "write failed"),
            FailureKind::Panicked => write!(f, "worker panicked"),
        }
    }
}

/// Categorized failure of one page or one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub stage: Stage,
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(stage: Stage, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn fetch(err: FetchError) -> Self {
        Self::new(Stage::Downloading, err.kind, err.message)
    }

    pub(crate) fn status(status: u16) -> Self {
        Self::new(
            Stage::Downloading,
            FailureKind::HttpStatus(status),
            format!("server answered {status}"),
        )
    }

    pub(crate) fn persist(err: &PersistError) -> Self {
        Self::new(Stage::Writing, FailureKind::Persist, err.to_string())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FailureKind::HttpStatus(_) => write!(f, "{}", self.kind),
            kind => write!(f, "{kind}: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReport {
    pub url: String,
    pub result: Result<PathBuf, Failure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageOutcome {
    pub status: u16,
    /// Written only when harvesting full pages.
    pub page_artifact: Option<Result<PathBuf, Failure>>,
    pub resources: Vec<ResourceReport>,
    /// Resources dropped by the library filter, never fetched.
    pub skipped_common: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub url: String,
    pub result: Result<PageOutcome, Failure>,
}

impl PageReport {
    pub fn artifacts(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        let outcome = self.result.as_ref().ok();
        let page = outcome
            .and_then(|o| o.page_artifact.as_ref())
            .and_then(|r| r.as_ref().ok());
        let resources = outcome
            .into_iter()
            .flat_map(|o| o.resources.iter())
            .filter_map(|r| r.result.as_ref().ok());
        page.into_iter().chain(resources)
    }
}

/// Per-seed results of one run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub pages: Vec<PageReport>,
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages_ok(&self) -> usize {
        self.pages.iter().filter(|p| p.result.is_ok()).count()
    }

    pub fn pages_failed(&self) -> usize {
        self.pages.len() - self.pages_ok()
    }

    pub fn artifacts_written(&self) -> usize {
        self.pages.iter().map(|p| p.artifacts().count()).sum()
    }

    pub fn resources_failed(&self) -> usize {
        self.outcomes()
            .flat_map(|o| o.resources.iter())
            .filter(|r| r.result.is_err())
            .count()
    }

    pub fn resources_skipped(&self) -> usize {
        self.outcomes().map(|o| o.skipped_common.len()).sum()
    }

    fn outcomes(&self) -> impl Iterator<Item = &PageOutcome> + '_ {
        self.pages.iter().filter_map(|p| p.result.as_ref().ok())
    }
}
