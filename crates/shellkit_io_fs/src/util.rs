use std::fs;
use std::io;
use std::path::Path;

use crate::path::{absolutize, canonical_path, join_path};
use crate::spec::SpecDirEntry;

////////////////////////////////////////////////////////////////////////////////
// #region DirectoryListing

/// Immediate children of `path_dir`, sorted by name ignoring case.
///
/// An empty `path_dir` lists the current directory. Entries whose metadata
/// cannot be read are skipped with a warning.
pub(crate) fn list_directory(path_dir: &str) -> io::Result<Vec<SpecDirEntry>> {
    let path_listed = if path_dir.is_empty() { "." } else { path_dir };
    let mut l_entries = Vec::new();

    for res_entry in fs::read_dir(path_listed)? {
        let entry = match res_entry {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to read directory entry under {path_listed} ({e})");
                continue;
            }
        };

        let path_entry = entry.path();
        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to inspect {} ({e})", path_entry.display());
                continue;
            }
        };

        let c_name = entry.file_name().to_string_lossy().to_string();
        let b_is_dir =
            cfg_file_type.is_dir() || (cfg_file_type.is_symlink() && path_entry.is_dir());
        l_entries.push(SpecDirEntry {
            path_abs: absolutize(&join_path(path_dir, &c_name)),
            name: c_name,
            if_is_dir: b_is_dir,
        });
    }

    l_entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(l_entries)
}

pub(crate) fn is_existing_dir(path: &str) -> bool {
    !path.is_empty() && Path::new(path).is_dir()
}

pub(crate) fn has_children(path_dir: &str) -> bool {
    fs::read_dir(path_dir)
        .map(|mut iter| iter.next().is_some())
        .unwrap_or(false)
}

/// `true` when `path_dst` equals `path_src` or lies beneath it.
pub(crate) fn is_same_or_nested(path_src: &str, path_dst: &str) -> bool {
    let c_src = canonical_path(&absolutize(path_src));
    let c_dst = canonical_path(&absolutize(path_dst));
    Path::new(&c_dst).starts_with(Path::new(&c_src))
}

/// `true` when both paths name the same filesystem entry.
///
/// Lexically equal paths always match; otherwise both must exist and
/// resolve to the same canonical path.
pub(crate) fn is_same_file(path_src: &str, path_dst: &str) -> bool {
    if canonical_path(&absolutize(path_src)) == canonical_path(&absolutize(path_dst)) {
        return true;
    }
    match (fs::canonicalize(path_src), fs::canonicalize(path_dst)) {
        (Ok(path_real_src), Ok(path_real_dst)) => path_real_src == path_real_dst,
        _ => false,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy bytes, then permissions and timestamps; xattrs on Linux.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;
    apply_metadata(path_file_src, path_file_dst)?;
    Ok(())
}

fn apply_metadata(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_file_src, path_file_dst);
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            tracing::debug!(
                "Skipped xattr {:?} on {} ({e})",
                name,
                path_file_dst.display()
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
