//! Single-entry operations mapped directly onto host filesystem calls.

use std::fs;
use std::io;
use std::path::Path;

use filetime::{FileTime, set_file_times};

use crate::path::{to_slash_string, translate_url};
use crate::spec::{ShellError, ShellResult, SpecMkdirOptions};

fn report(operation: &str, res: ShellResult<()>) -> bool {
    match res {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{operation}: {e}");
            false
        }
    }
}

/// Create an empty file, or bump the access and modification times of an
/// existing one.
pub fn touch(path: &str) -> bool {
    report("touch", try_touch(&translate_url(path)))
}

fn try_touch(path: &str) -> ShellResult<()> {
    if path.is_empty() {
        return Err(ShellError::Usage("touch(path)"));
    }
    let path_entry = Path::new(path);
    if path_entry.exists() {
        let file_time_now = FileTime::now();
        return set_file_times(path_entry, file_time_now, file_time_now)
            .map_err(|e| ShellError::io("touch", path, e));
    }
    fs::File::create(path_entry)
        .map(|_| ())
        .map_err(|e| ShellError::io("touch", path, e))
}

/// Create a directory.
pub fn mkdir(path: &str, spec_mkdir_options: &SpecMkdirOptions) -> bool {
    report("mkdir", try_mkdir(&translate_url(path), spec_mkdir_options))
}

fn try_mkdir(path: &str, spec_mkdir_options: &SpecMkdirOptions) -> ShellResult<()> {
    if path.is_empty() {
        return Err(ShellError::Usage("mkdir(path)"));
    }
    let res_create = if spec_mkdir_options.if_parents {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };
    res_create.map_err(|e| ShellError::io("mkdir", path, e))
}

/// Remove an empty directory.
pub fn rmdir(path: &str) -> bool {
    let c_path = translate_url(path);
    if c_path.is_empty() {
        return report("rmdir", Err(ShellError::Usage("rmdir(path)")));
    }
    let res_remove = fs::remove_dir(&c_path).map_err(|e| ShellError::io("rmdir", &c_path, e));
    report("rmdir", res_remove)
}

/// Contents of a UTF-8 text file.
pub fn cat(path: &str) -> ShellResult<String> {
    let c_path = translate_url(path);
    fs::read_to_string(&c_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ShellError::NotFound { path: c_path.clone() },
        _ => ShellError::io("cat", &c_path, e),
    })
}

/// First executable named `program` on the search path.
pub fn which(program: &str) -> Option<String> {
    match ::which::which(program) {
        Ok(path_found) => Some(to_slash_string(&path_found)),
        Err(e) => {
            tracing::debug!("which {program}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use filetime::{FileTime, set_file_times};
    use tempfile::TempDir;

    use super::{cat, mkdir, rmdir, touch, which};
    use crate::path::to_slash_string;
    use crate::spec::{ShellError, SpecMkdirOptions};

    #[test]
    fn touch_creates_then_updates() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("tmp.txt");
        let c_file = to_slash_string(&path_file);

        assert!(!path_file.exists());
        assert!(touch(&c_file));
        assert!(path_file.exists());

        let file_time_old = FileTime::from_unix_time(1_000_000_000, 0);
        set_file_times(&path_file, file_time_old, file_time_old).expect("set times");
        assert!(touch(&c_file));
        let stat = fs::metadata(&path_file).expect("metadata");
        assert!(FileTime::from_last_modification_time(&stat) > file_time_old);
    }

    #[test]
    fn mkdir_fails_on_existing_without_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let c_dir = to_slash_string(&tmp.path().join("tmp"));

        assert!(mkdir(&c_dir, &SpecMkdirOptions::default()));
        assert!(tmp.path().join("tmp").is_dir());
        assert!(!mkdir(&c_dir, &SpecMkdirOptions::default()));

        let spec_mkdir_options = SpecMkdirOptions { if_parents: true };
        assert!(mkdir(&c_dir, &spec_mkdir_options));
        assert!(mkdir(&format!("{c_dir}/a/b/c"), &spec_mkdir_options));
        assert!(tmp.path().join("tmp/a/b/c").is_dir());
    }

    #[test]
    fn rmdir_only_removes_empty_directories() {
        let tmp = TempDir::new().expect("tempdir");
        let path_dir = tmp.path().join("tmp");
        let c_dir = to_slash_string(&path_dir);
        fs::create_dir(&path_dir).expect("mkdir");

        assert!(rmdir(&c_dir));
        assert!(!path_dir.exists());

        fs::create_dir(&path_dir).expect("mkdir");
        fs::write(path_dir.join("a.txt"), "a").expect("write");
        assert!(!rmdir(&c_dir));
        assert!(path_dir.exists());
    }

    #[test]
    fn cat_reads_text_and_reports_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let path_file = tmp.path().join("a.txt");
        fs::write(&path_file, "hello\n").expect("write");

        assert_eq!(cat(&to_slash_string(&path_file)).expect("cat"), "hello\n");

        let err = cat(&to_slash_string(&tmp.path().join("none"))).expect_err("missing");
        assert!(matches!(err, ShellError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn which_finds_shell_and_rejects_unknown() {
        assert!(which("sh").is_some_and(|p| p.ends_with("/sh")));
        assert!(which("definitely-not-a-real-program-0x5f").is_none());
    }
}
