use std::fs;

use crate::dispatch::expand_source;
use crate::path::prepare_argument;
use crate::spec::{ShellError, SpecRemoveOptions};

/// Remove the entries matching `path` (optionally ending in a wildcard segment).
///
/// Directories need `if_recursive`; without it they fail individually and
/// the remaining matches are still removed. `if_force` makes an empty match
/// succeed.
pub fn rm(path: &str, spec_rm_options: &SpecRemoveOptions) -> bool {
    if path.is_empty() {
        tracing::warn!("usage: rm(path)");
        return false;
    }

    let c_path = prepare_argument(path);
    let spec_matched = expand_source(&c_path);
    if spec_matched.l_entries.is_empty() {
        if spec_rm_options.if_force {
            return true;
        }
        tracing::warn!("rm: {}", ShellError::NoMatch { pattern: c_path });
        return false;
    }

    let mut n_failed = 0_usize;
    for entry in &spec_matched.l_entries {
        let c_entry = spec_matched.path_of(entry);
        let res_remove = if !entry.if_is_dir {
            fs::remove_file(&c_entry).map_err(|e| ShellError::io("rm", &c_entry, e))
        } else if spec_rm_options.if_recursive {
            fs::remove_dir_all(&c_entry).map_err(|e| ShellError::io("rm", &c_entry, e))
        } else {
            Err(ShellError::IsDirectory {
                path: c_entry.clone(),
            })
        };

        match res_remove {
            Ok(()) if spec_rm_options.if_verbose => tracing::info!("{c_entry}"),
            Ok(()) => {}
            Err(e) => {
                tracing::warn!("rm: {e}");
                n_failed += 1;
            }
        }
    }

    n_failed == 0
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::rm;
    use crate::path::to_slash_string;
    use crate::spec::SpecRemoveOptions;

    #[test]
    fn rm_single_and_glob() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());
        fs::write(tmp.path().join("tmp.txt"), "x").expect("write");
        fs::write(tmp.path().join("a.TXT"), "x").expect("write");
        fs::write(tmp.path().join("b.txt"), "x").expect("write");
        fs::write(tmp.path().join("keep.md"), "x").expect("write");

        let spec_rm_options = SpecRemoveOptions::default();
        assert!(rm(&format!("{c_root}/tmp.txt"), &spec_rm_options));
        assert!(!tmp.path().join("tmp.txt").exists());

        assert!(rm(&format!("{c_root}/*.txt"), &spec_rm_options));
        assert!(!tmp.path().join("a.TXT").exists());
        assert!(!tmp.path().join("b.txt").exists());
        assert!(tmp.path().join("keep.md").exists());
    }

    #[test]
    fn rm_directory_requires_recursive() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());
        fs::create_dir_all(tmp.path().join("tmp/sub")).expect("mkdir");
        fs::write(tmp.path().join("tmp/sub/a.txt"), "x").expect("write");

        assert!(!rm(&format!("{c_root}/tmp"), &SpecRemoveOptions::default()));
        assert!(tmp.path().join("tmp").is_dir());

        let spec_rm_options = SpecRemoveOptions {
            if_recursive: true,
            ..SpecRemoveOptions::default()
        };
        assert!(rm(&format!("{c_root}/tmp"), &spec_rm_options));
        assert!(!tmp.path().join("tmp").exists());
    }

    #[test]
    fn rm_directory_failure_keeps_removing_siblings() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());
        fs::create_dir(tmp.path().join("a_dir")).expect("mkdir");
        fs::write(tmp.path().join("b.txt"), "x").expect("write");

        assert!(!rm(&format!("{c_root}/*"), &SpecRemoveOptions::default()));
        assert!(tmp.path().join("a_dir").is_dir());
        assert!(!tmp.path().join("b.txt").exists());
    }

    #[test]
    fn rm_missing_respects_force() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());

        assert!(!rm(&format!("{c_root}/none"), &SpecRemoveOptions::default()));
        let spec_rm_options = SpecRemoveOptions {
            if_force: true,
            ..SpecRemoveOptions::default()
        };
        assert!(rm(&format!("{c_root}/none"), &spec_rm_options));
    }
}
