//! Lexical path handling: normalization, canonicalization, and the
//! `basename`/`dirname`/`realpath` family.
//!
//! Nothing here touches the filesystem except where the current working
//! directory is needed to absolutize a relative path.

use url::Url;

use crate::spec::EnumPathPlatform;

pub(crate) const SEPARATOR: char = '/';

/// URL scheme mapped onto `:`-prefixed resource paths.
const C_RESOURCE_SCHEME: &str = "qrc";

////////////////////////////////////////////////////////////////////////////////
// #region Normalize

/// Strip trailing separators.
///
/// An input made only of separators (the root, or the empty string) becomes
/// a single `/`.
///
/// ```
/// use shellkit_io_fs::normalize;
///
/// assert_eq!(normalize("/tmp/"), "/tmp");
/// assert_eq!(normalize("///"), "/");
/// ```
pub fn normalize(path: &str) -> String {
    if path.chars().all(|c| c == SEPARATOR) {
        return SEPARATOR.to_string();
    }
    path.trim_end_matches(SEPARATOR).to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Canonicalize

/// Lexically canonicalize an absolute path for the host platform.
///
/// See [`canonical_path_for`].
pub fn canonical_path(path: &str) -> String {
    canonical_path_for(path, EnumPathPlatform::host())
}

/// Resolve `.`/`..` segments and collapse repeated separators.
///
/// `..` at the root is dropped silently. Symlinks are not resolved.
///
/// - `Posix`: the result starts with `/` unless its first segment is a
///   scheme prefix ending in `:` (e.g. `:/icons/a.png`).
/// - `Windows`: no leading separator is forced, so `/C:/temp` becomes `C:/temp`.
pub fn canonical_path_for(path: &str, rule_platform: EnumPathPlatform) -> String {
    let mut l_segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                l_segments.pop();
            }
            _ => l_segments.push(segment),
        }
    }

    let c_joined = l_segments.join("/");
    let c_rooted = match rule_platform {
        EnumPathPlatform::Windows => c_joined,
        EnumPathPlatform::Posix => match l_segments.first() {
            Some(first) if first.ends_with(':') => c_joined,
            _ => format!("{SEPARATOR}{c_joined}"),
        },
    };
    normalize(&c_rooted)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ShellNames

/// Last non-empty segment of `path`; `/` when there is none.
pub fn basename(path: &str) -> String {
    path.split(SEPARATOR)
        .rev()
        .find(|s| !s.is_empty())
        .unwrap_or("/")
        .to_string()
}

/// Absolute parent directory of `path`, without a trailing separator.
pub fn dirname(path: &str) -> String {
    let c_path = canonical_path(&absolutize(&normalize(path)));
    match c_path.rfind(SEPARATOR) {
        None | Some(0) => SEPARATOR.to_string(),
        Some(n) => c_path[..n].to_string(),
    }
}

/// Absolute, lexically canonical form of `path`.
///
/// `file:` URLs become plain paths and `qrc:` URLs become `:`-prefixed
/// resource paths before the path is absolutized.
pub fn realpath(path: &str) -> String {
    let c_path = translate_url(path);
    canonical_path(&absolutize(&c_path))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Helpers

/// Map `file:` and resource URLs to plain paths. Anything else passes through.
pub(crate) fn translate_url(input: &str) -> String {
    let Ok(url) = Url::parse(input) else {
        return input.to_string();
    };
    match url.scheme() {
        "file" => match url.to_file_path() {
            Ok(path_file) => to_slash_string(&path_file),
            Err(_) => url.path().to_string(),
        },
        C_RESOURCE_SCHEME => format!(":{}", url.path()),
        _ => input.to_string(),
    }
}

pub(crate) fn is_absolute(path: &str) -> bool {
    if path.starts_with(SEPARATOR) || path.starts_with(':') {
        return true;
    }
    let raw = path.as_bytes();
    cfg!(windows) && raw.len() >= 2 && raw[0].is_ascii_alphabetic() && raw[1] == b':'
}

pub(crate) fn absolutize(path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    let path_cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    join_path(&to_slash_string(&path_cwd), path)
}

/// Join `name` under `parent`; an empty parent yields `name` unchanged.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        return name.to_string();
    }
    if parent.ends_with(SEPARATOR) {
        return format!("{parent}{name}");
    }
    format!("{parent}{SEPARATOR}{name}")
}

/// Split a normalized source into `(parent directory, last segment)`.
pub(crate) fn split_source(path: &str) -> (String, String) {
    match path.rfind(SEPARATOR) {
        None => (String::new(), path.to_string()),
        Some(0) => (SEPARATOR.to_string(), path[1..].to_string()),
        Some(n) => (path[..n].to_string(), path[n + 1..].to_string()),
    }
}

/// Shape a user argument the way `cp`/`mv`/`rm` consume it.
///
/// Relative arguments stay relative so logs echo what the caller passed.
pub(crate) fn prepare_argument(path: &str) -> String {
    let c_path = normalize(&translate_url(path));
    if is_absolute(&c_path) {
        return canonical_path(&c_path);
    }
    c_path
}

pub(crate) fn to_slash_string(path: &std::path::Path) -> String {
    let c_path = path.to_string_lossy();
    if cfg!(windows) {
        return c_path.replace('\\', "/");
    }
    c_path.into_owned()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
