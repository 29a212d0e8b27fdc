//! Breadth-first file search.

use std::collections::VecDeque;

use crate::path::{absolutize, canonical_path, normalize, translate_url};
use crate::pattern::SpecNameFilters;
use crate::spec::{ShellResult, SpecFindOptions};
use crate::util::list_directory;

/// Files under `root`, level by level, each level in name order.
///
/// Directories are descended but never returned. Hidden entries (names
/// starting with `.`) are neither returned nor descended. Results are
/// absolute when `root` is absolute and prefixed with `root` as given
/// otherwise. A root that cannot be listed yields an empty result.
pub fn find(root: &str, spec_find_options: &SpecFindOptions) -> ShellResult<Vec<String>> {
    let spec_filters = SpecNameFilters::from_raw(
        spec_find_options.patterns_name.as_deref(),
        spec_find_options.rule_pattern,
    )?;

    let c_root = normalize(&translate_url(root));
    let c_root_abs = canonical_path(&absolutize(&c_root));

    let mut queue_dirs = VecDeque::from([c_root_abs.clone()]);
    let mut l_found = Vec::new();

    while let Some(c_current) = queue_dirs.pop_front() {
        let l_entries = match list_directory(&c_current) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("find: cannot list {c_current} ({e})");
                continue;
            }
        };

        for entry in l_entries {
            if entry.name.starts_with('.') {
                continue;
            }
            if entry.if_is_dir {
                queue_dirs.push_back(entry.path_abs);
                continue;
            }
            if !spec_filters.is_match(&entry.name) {
                continue;
            }
            l_found.push(entry.path_abs);
        }
    }

    if c_root != c_root_abs {
        for c_found in l_found.iter_mut() {
            if let Some(c_rest) = c_found.strip_prefix(&c_root_abs) {
                *c_found = format!("{c_root}{c_rest}");
            }
        }
    }
    Ok(l_found)
}
