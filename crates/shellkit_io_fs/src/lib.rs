//! `shellkit_io_fs`:
//! Unix-shell-style file operations over the host filesystem.
//!
//! Layout:
//! - `path`      : normalize / canonicalize / basename / dirname / realpath
//! - `pattern`   : case-insensitive wildcard matching and name filters
//! - `dispatch`  : one-level glob expansion + per-entry action
//! - `copy`      : recursive copy engine (`cp`)
//! - `rename`    : move engine (`mv`)
//! - `remove`    : `rm`
//! - `find`      : breadth-first file search
//! - `primitive` : `touch`, `mkdir`, `rmdir`, `cat`, `which`
//! - `spec`      : enums/options/errors
//! - `report`    : transformation log
//! - `util`      : listing and metadata helpers
//!
//! Arguments are `/`-separated strings. `cp`, `mv` and `rm` accept a last
//! path segment with wildcards (`src/*.txt`); parents are never expanded.

pub mod copy;
pub mod dispatch;
pub mod find;
pub mod path;
pub mod pattern;
pub mod primitive;
pub mod remove;
pub mod rename;
pub mod report;
pub mod spec;
mod util;

pub use copy::{cp, cp_with};
pub use dispatch::dispatch;
pub use find::find;
pub use path::{basename, canonical_path, canonical_path_for, dirname, normalize, realpath};
pub use pattern::is_wildcard_match;
pub use primitive::{cat, mkdir, rmdir, touch, which};
pub use remove::rm;
pub use rename::{mv, mv_with};
pub use report::ReportTransform;
pub use spec::{
    EnumDispatchOutcome, EnumPathPlatform, EnumPatternMode, ShellError, ShellResult,
    SpecCopyOptions, SpecDirEntry, SpecEntryError, SpecFindOptions, SpecMkdirOptions,
    SpecRemoveOptions, SpecTransformEntry,
};
