//! Bulk dispatch: expand a one-level glob source and run an action per match.

use crate::path::{is_absolute, join_path, normalize, split_source};
use crate::pattern::SpecWildcard;
use crate::spec::{EnumDispatchOutcome, SpecDirEntry};
use crate::util::{is_existing_dir, list_directory};

/// Entries of one directory level matching a source pattern.
#[derive(Debug, Clone)]
pub(crate) struct SpecMatchedEntries {
    /// Directory part of the source, empty for a bare name.
    pub(crate) path_dir_parent: String,
    /// Matches in listing order.
    pub(crate) l_entries: Vec<SpecDirEntry>,
}

impl SpecMatchedEntries {
    /// Path of `entry` as seen through the caller's source argument.
    pub(crate) fn path_of(&self, entry: &SpecDirEntry) -> String {
        join_path(&self.path_dir_parent, &entry.name)
    }
}

/// Resolve a relative `path` under `path_dir_base`; an empty base means the
/// current directory.
fn resolve_in(path_dir_base: &str, path: &str) -> String {
    if path_dir_base.is_empty() || is_absolute(path) {
        return path.to_string();
    }
    if path.is_empty() {
        return path_dir_base.to_string();
    }
    join_path(path_dir_base, path)
}

/// List the parent of `source` and keep the entries matching its last segment.
///
/// Only the last segment is treated as a pattern. A parent that cannot be
/// listed yields no matches.
pub(crate) fn expand_source(source: &str) -> SpecMatchedEntries {
    expand_source_in("", source)
}

fn expand_source_in(path_dir_base: &str, source: &str) -> SpecMatchedEntries {
    let (path_dir_parent, c_pattern) = split_source(&normalize(source));
    let wildcard = SpecWildcard::new(&c_pattern);

    let l_entries = match list_directory(&resolve_in(path_dir_base, &path_dir_parent)) {
        Ok(l_listed) => l_listed
            .into_iter()
            .filter(|e| wildcard.is_match(&e.name))
            .collect(),
        Err(e) => {
            tracing::debug!("Cannot list {path_dir_parent:?} for {source} ({e})");
            Vec::new()
        }
    };

    SpecMatchedEntries {
        path_dir_parent,
        l_entries,
    }
}

/// Run `fn_action(from, to, entry)` for every entry matching `source`.
///
/// `source` may end in a wildcard segment (`src/*.txt`). When `target` is an
/// existing directory each entry lands at `target/<name>`; otherwise `target`
/// is used as-is, which is only allowed for a single match.
///
/// A failing action does not stop the batch; the remaining entries are still
/// processed and the call reports [`EnumDispatchOutcome::PartialFailure`].
///
/// Arguments are expected to be canonicalized by the caller; only trailing
/// separators are stripped here.
pub fn dispatch<F>(source: &str, target: &str, fn_action: F) -> EnumDispatchOutcome
where
    F: FnMut(&str, &str, &SpecDirEntry) -> bool,
{
    dispatch_in("", source, target, fn_action)
}

/// [`dispatch`] with relative `source` and `target` resolved under
/// `path_dir_base` for filesystem access. Paths handed to `fn_action` keep
/// the caller's relative form.
pub(crate) fn dispatch_in<F>(
    path_dir_base: &str,
    source: &str,
    target: &str,
    mut fn_action: F,
) -> EnumDispatchOutcome
where
    F: FnMut(&str, &str, &SpecDirEntry) -> bool,
{
    let spec_matched = expand_source_in(path_dir_base, source);
    let c_target = normalize(target);

    if spec_matched.l_entries.is_empty() {
        tracing::debug!("dispatch {source}: no match");
        return EnumDispatchOutcome::NoMatch;
    }

    let b_target_is_dir = is_existing_dir(&resolve_in(path_dir_base, &c_target));
    if spec_matched.l_entries.len() > 1 && !b_target_is_dir {
        tracing::debug!(
            "dispatch {source}: {} matches but {c_target} is not a directory",
            spec_matched.l_entries.len()
        );
        return EnumDispatchOutcome::InvalidTarget;
    }

    tracing::debug!(
        "dispatch {source} -> {c_target}: {} matches (target_is_dir={b_target_is_dir})",
        spec_matched.l_entries.len()
    );

    let mut n_failed = 0_usize;
    for entry in &spec_matched.l_entries {
        let c_from = spec_matched.path_of(entry);
        let c_to = if b_target_is_dir {
            join_path(&c_target, &entry.name)
        } else {
            c_target.clone()
        };
        if !fn_action(&c_from, &c_to, entry) {
            n_failed += 1;
        }
    }

    if n_failed > 0 {
        tracing::debug!("dispatch {source}: {n_failed} action(s) failed");
        return EnumDispatchOutcome::PartialFailure;
    }
    EnumDispatchOutcome::Success
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{dispatch, dispatch_in, expand_source};
    use crate::path::to_slash_string;
    use crate::spec::EnumDispatchOutcome;

    fn make_tree(tmp: &TempDir) -> String {
        let c_root = to_slash_string(tmp.path());
        fs::create_dir_all(tmp.path().join("src/1")).expect("mkdir");
        fs::create_dir_all(tmp.path().join("src/2")).expect("mkdir");
        fs::create_dir_all(tmp.path().join("dst")).expect("mkdir");
        fs::write(tmp.path().join("src/1/1.txt"), "1").expect("write");
        c_root
    }

    #[test]
    fn dispatch_invokes_action_per_match_in_order() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = make_tree(&tmp);

        let mut l_calls = Vec::new();
        let outcome = dispatch(
            &format!("{c_root}/src/*"),
            &format!("{c_root}/dst"),
            |from, to, entry| {
                assert!(entry.if_is_dir);
                l_calls.push((from.to_string(), to.to_string()));
                true
            },
        );

        assert_eq!(outcome, EnumDispatchOutcome::Success);
        assert_eq!(
            l_calls,
            vec![
                (format!("{c_root}/src/1"), format!("{c_root}/dst/1")),
                (format!("{c_root}/src/2"), format!("{c_root}/dst/2")),
            ]
        );
    }

    #[test]
    fn dispatch_missing_source_is_no_match() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = make_tree(&tmp);

        let mut n_calls = 0;
        let outcome = dispatch(
            &format!("{c_root}/src/missing"),
            &format!("{c_root}/dst"),
            |_, _, _| {
                n_calls += 1;
                true
            },
        );
        assert_eq!(outcome, EnumDispatchOutcome::NoMatch);
        assert_eq!(n_calls, 0);

        let outcome = dispatch(
            &format!("{c_root}/no_such_dir/*"),
            &format!("{c_root}/dst"),
            |_, _, _| true,
        );
        assert_eq!(outcome, EnumDispatchOutcome::NoMatch);
    }

    #[test]
    fn dispatch_many_matches_need_directory_target() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = make_tree(&tmp);
        fs::write(tmp.path().join("plain.txt"), "x").expect("write");

        let mut n_calls = 0;
        let outcome = dispatch(
            &format!("{c_root}/src/*"),
            &format!("{c_root}/plain.txt"),
            |_, _, _| {
                n_calls += 1;
                true
            },
        );
        assert_eq!(outcome, EnumDispatchOutcome::InvalidTarget);
        assert_eq!(n_calls, 0);

        let outcome = dispatch(
            &format!("{c_root}/src/*"),
            &format!("{c_root}/not_there"),
            |_, _, _| true,
        );
        assert_eq!(outcome, EnumDispatchOutcome::InvalidTarget);
    }

    #[test]
    fn dispatch_single_match_keeps_non_directory_target() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = make_tree(&tmp);

        let mut l_targets = Vec::new();
        let outcome = dispatch(
            &format!("{c_root}/src/1/1.txt"),
            &format!("{c_root}/renamed.txt"),
            |_, to, _| {
                l_targets.push(to.to_string());
                true
            },
        );
        assert_eq!(outcome, EnumDispatchOutcome::Success);
        assert_eq!(l_targets, vec![format!("{c_root}/renamed.txt")]);
    }

    #[test]
    fn dispatch_continues_after_failed_action() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = make_tree(&tmp);

        let mut l_seen = Vec::new();
        let outcome = dispatch(
            &format!("{c_root}/src/*"),
            &format!("{c_root}/dst/"),
            |_, _, entry| {
                l_seen.push(entry.name.clone());
                entry.name != "1"
            },
        );
        assert_eq!(outcome, EnumDispatchOutcome::PartialFailure);
        assert_eq!(l_seen, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn dispatch_bare_pattern_keeps_entry_names() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());
        fs::write(tmp.path().join("b.txt"), "b").expect("write");
        fs::write(tmp.path().join("A.TXT"), "a").expect("write");
        fs::write(tmp.path().join("c.md"), "c").expect("write");
        fs::create_dir(tmp.path().join("dst")).expect("mkdir");

        let mut l_calls = Vec::new();
        let outcome = dispatch_in(&c_root, "*.txt", "dst", |from, to, entry| {
            assert_eq!(from, entry.name);
            assert_eq!(entry.path_abs, format!("{c_root}/{}", entry.name));
            l_calls.push((from.to_string(), to.to_string()));
            true
        });

        assert_eq!(outcome, EnumDispatchOutcome::Success);
        assert_eq!(
            l_calls,
            vec![
                ("A.TXT".to_string(), "dst/A.TXT".to_string()),
                ("b.txt".to_string(), "dst/b.txt".to_string()),
            ]
        );

        let mut l_targets = Vec::new();
        let outcome = dispatch_in(&c_root, "c.md", "renamed.md", |from, to, _| {
            assert_eq!(from, "c.md");
            l_targets.push(to.to_string());
            true
        });
        assert_eq!(outcome, EnumDispatchOutcome::Success);
        assert_eq!(l_targets, vec!["renamed.md".to_string()]);

        let outcome = dispatch_in(&c_root, "*.txt", "renamed.md", |_, _, _| true);
        assert_eq!(outcome, EnumDispatchOutcome::InvalidTarget);
    }

    #[test]
    fn dispatch_orders_mixed_case_names() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());
        fs::create_dir_all(tmp.path().join("src")).expect("mkdir");
        fs::create_dir_all(tmp.path().join("dst")).expect("mkdir");
        fs::write(tmp.path().join("src/B.txt"), "b").expect("write");
        fs::write(tmp.path().join("src/a.txt"), "a").expect("write");

        let mut l_names = Vec::new();
        let outcome = dispatch(
            &format!("{c_root}/src/*"),
            &format!("{c_root}/dst"),
            |_, _, entry| {
                l_names.push(entry.name.clone());
                true
            },
        );
        assert_eq!(outcome, EnumDispatchOutcome::Success);
        assert_eq!(l_names, vec!["a.txt".to_string(), "B.txt".to_string()]);
    }

    #[test]
    fn expand_source_matches_case_insensitively() {
        let tmp = TempDir::new().expect("tempdir");
        let c_root = to_slash_string(tmp.path());
        fs::write(tmp.path().join("Notes.TXT"), "n").expect("write");
        fs::write(tmp.path().join("other.md"), "o").expect("write");

        let spec_matched = expand_source(&format!("{c_root}/*.txt"));
        assert_eq!(spec_matched.path_dir_parent, c_root);
        assert_eq!(spec_matched.l_entries.len(), 1);
        assert_eq!(spec_matched.l_entries[0].name, "Notes.TXT");
    }
}
