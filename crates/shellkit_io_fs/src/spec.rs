//! Shell operation specification models and the crate error type.

use std::fmt;
use std::io;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Root handling used by lexical canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPathPlatform {
    /// Single `/` root; scheme-prefixed paths (`:/x`) keep their prefix.
    Posix,
    /// Drive-letter roots (`C:/`); no leading separator is forced.
    Windows,
}

impl EnumPathPlatform {
    /// Platform the crate was compiled for.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

/// Pattern interpretation for `find` name filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPatternMode {
    /// Case-insensitive shell wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression searched in the file name.
    Regex,
    /// Case-insensitive exact name comparison.
    Literal,
}

/// Terminal state of one [`crate::dispatch::dispatch`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumDispatchOutcome {
    /// Every matched entry was processed successfully.
    Success,
    /// More than one entry matched but the target is not an existing directory.
    InvalidTarget,
    /// Nothing matched the source pattern.
    NoMatch,
    /// All matches were attempted and at least one action failed.
    PartialFailure,
}

impl EnumDispatchOutcome {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// `true` when the dispatch stopped before running any action.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::NoMatch | Self::InvalidTarget)
    }

    /// Map the outcome onto [`ShellError`] for diagnostics.
    pub fn into_result(self, source: &str, target: &str) -> ShellResult<()> {
        match self {
            Self::Success => Ok(()),
            Self::NoMatch => Err(ShellError::NoMatch {
                pattern: source.to_string(),
            }),
            Self::InvalidTarget => Err(ShellError::InvalidTarget {
                target: target.to_string(),
            }),
            Self::PartialFailure => Err(ShellError::PartialFailure {
                pattern: source.to_string(),
            }),
        }
    }
}

impl fmt::Display for EnumDispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c_label = match self {
            Self::Success => "success",
            Self::InvalidTarget => "invalid target",
            Self::NoMatch => "no match",
            Self::PartialFailure => "partial failure",
        };
        f.write_str(c_label)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EntryModels

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDirEntry {
    /// File name without any directory part.
    pub name: String,
    /// Absolute path of the entry.
    pub path_abs: String,
    /// Directory, or a symlink resolving to one.
    pub if_is_dir: bool,
}

/// One successful transfer recorded by `cp`/`mv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTransformEntry {
    pub path_src: String,
    pub path_dst: String,
}

/// One failed entry action with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntryError {
    /// Source path of the failed entry.
    pub path: String,
    /// User-facing error text.
    pub exception: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Input options for `cp`.
#[derive(Debug, Clone, Default)]
pub struct SpecCopyOptions {
    /// Descend into matched directories.
    pub if_recursive: bool,
    /// Report every created directory and copied file.
    pub if_verbose: bool,
}

/// Input options for `rm`.
#[derive(Debug, Clone, Default)]
pub struct SpecRemoveOptions {
    /// Remove matched directories with their whole subtree.
    pub if_recursive: bool,
    /// Treat "nothing matched" as success.
    pub if_force: bool,
    /// Report every removed entry.
    pub if_verbose: bool,
}

/// Input options for `mkdir`.
#[derive(Debug, Clone, Default)]
pub struct SpecMkdirOptions {
    /// Create missing ancestors; an existing directory is not an error.
    pub if_parents: bool,
}

/// Input options for `find`.
#[derive(Debug, Clone)]
pub struct SpecFindOptions {
    /// Name filters applied to file basenames. `None` or empty keeps every file.
    pub patterns_name: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumPatternMode,
}

impl Default for SpecFindOptions {
    fn default() -> Self {
        Self {
            patterns_name: None,
            rule_pattern: EnumPatternMode::Glob,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

pub type ShellResult<T> = Result<T, ShellError>;

/// Failure of a shell operation.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A required argument is missing.
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{path}: No such file or directory")]
    NotFound { path: String },
    /// Nothing matched the source pattern.
    #[error("{pattern}: No such file or directory")]
    NoMatch { pattern: String },
    /// Several entries matched but the target cannot hold them.
    #[error("{target}: Target is not a directory")]
    InvalidTarget { target: String },
    /// Some matched entries could not be processed.
    #[error("{pattern}: Some entries could not be processed")]
    PartialFailure { pattern: String },
    #[error("{path}: Is a directory")]
    IsDirectory { path: String },
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    /// Host filesystem failure.
    #[error("{operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ShellError {
    pub(crate) fn io(operation: &'static str, path: &str, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
