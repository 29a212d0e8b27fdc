//! Recursive copy engine built on [`dispatch`].

use std::fs;
use std::io;
use std::path::Path;

use crate::dispatch::dispatch;
use crate::path::{join_path, prepare_argument};
use crate::report::ReportTransform;
use crate::spec::{EnumDispatchOutcome, SpecCopyOptions, SpecDirEntry};
use crate::util::{copy_file_with_metadata, has_children, is_same_file, is_same_or_nested};

struct SpecCopyContext<'a, 'v> {
    spec_cp_options: &'a SpecCopyOptions,
    fn_verbose: Option<&'a mut (dyn FnMut(&str) + 'v)>,
    report_transform: &'a mut ReportTransform,
}

impl SpecCopyContext<'_, '_> {
    fn add_error(&mut self, path: &str, exception: String) {
        tracing::warn!("cp: {exception}");
        self.report_transform.add_error(path, exception);
    }

    fn notify(&mut self, path_src: &str, path_dst: &str) {
        if !self.spec_cp_options.if_verbose {
            return;
        }
        let c_line = format!("{path_src} -> {path_dst}");
        tracing::info!("{c_line}");
        if let Some(fn_verbose) = self.fn_verbose.as_mut() {
            fn_verbose(&c_line);
        }
    }
}

/// Copy `source` (optionally ending in a wildcard segment) to `target`.
///
/// Returns `true` only when every matched entry was copied. See [`cp_with`].
pub fn cp(source: &str, target: &str, spec_cp_options: &SpecCopyOptions) -> bool {
    cp_with(source, target, spec_cp_options, None, None)
}

/// Copy `source` to `target`, reporting progress and transfers.
///
/// - Several matches require `target` to be an existing directory; a single
///   match may be copied onto a new name.
/// - Existing destination files are replaced.
/// - Directories are skipped with an error unless `if_recursive` is set;
///   sibling entries are still copied.
/// - `fn_verbose` receives one `"<from> -> <to>"` line per created directory
///   and copied file when `if_verbose` is set.
/// - `report_transform` receives one entry per copied file, in copy order.
pub fn cp_with(
    source: &str,
    target: &str,
    spec_cp_options: &SpecCopyOptions,
    fn_verbose: Option<&mut dyn FnMut(&str)>,
    report_transform: Option<&mut ReportTransform>,
) -> bool {
    if source.is_empty() || target.is_empty() {
        tracing::warn!("usage: cp(source, target)");
        return false;
    }

    let mut report_local = ReportTransform::default();
    let mut spec_cp_ctx = SpecCopyContext {
        spec_cp_options,
        fn_verbose,
        report_transform: report_transform.unwrap_or(&mut report_local),
    };

    let c_source = prepare_argument(source);
    let c_target = prepare_argument(target);
    let outcome = dispatch(&c_source, &c_target, |from, to, entry| {
        copy_entry(from, to, entry, &mut spec_cp_ctx)
    });

    match outcome.into_result(&c_source, &c_target) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("cp: {e}");
            false
        }
    }
}

fn copy_entry(
    path_src: &str,
    path_dst: &str,
    entry: &SpecDirEntry,
    spec_cp_ctx: &mut SpecCopyContext<'_, '_>,
) -> bool {
    if entry.if_is_dir {
        copy_dir_entry(path_src, path_dst, spec_cp_ctx)
    } else {
        copy_file_entry(path_src, path_dst, spec_cp_ctx)
    }
}

fn copy_dir_entry(
    path_src: &str,
    path_dst: &str,
    spec_cp_ctx: &mut SpecCopyContext<'_, '_>,
) -> bool {
    if !spec_cp_ctx.spec_cp_options.if_recursive {
        spec_cp_ctx.add_error(path_src, format!("{path_src} is a directory (not copied)"));
        return false;
    }
    if is_same_or_nested(path_src, path_dst) {
        spec_cp_ctx.add_error(
            path_src,
            format!("cannot copy a directory, {path_src}, into itself, {path_dst}"),
        );
        return false;
    }

    match fs::create_dir(path_dst) {
        Ok(()) => spec_cp_ctx.notify(path_src, path_dst),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && Path::new(path_dst).is_dir() => {}
        Err(e) => {
            spec_cp_ctx.add_error(path_src, format!("{path_dst}: {e}"));
            return false;
        }
    }

    if !has_children(path_src) {
        return true;
    }

    let outcome = dispatch(&join_path(path_src, "*"), path_dst, |from, to, entry| {
        copy_entry(from, to, entry, spec_cp_ctx)
    });
    outcome == EnumDispatchOutcome::Success
}

fn copy_file_entry(
    path_src: &str,
    path_dst: &str,
    spec_cp_ctx: &mut SpecCopyContext<'_, '_>,
) -> bool {
    if is_same_file(path_src, path_dst) {
        spec_cp_ctx.add_error(path_src, format!("{path_src} and {path_dst} are the same file"));
        return false;
    }

    let path_file_dst = Path::new(path_dst);
    if fs::symlink_metadata(path_file_dst).is_ok()
        && let Err(e) = fs::remove_file(path_file_dst)
    {
        spec_cp_ctx.add_error(path_src, format!("cannot overwrite {path_dst}: {e}"));
        return false;
    }

    match copy_file_with_metadata(Path::new(path_src), path_file_dst) {
        Ok(()) => {
            spec_cp_ctx.report_transform.add_entry(path_src, path_dst);
            spec_cp_ctx.notify(path_src, path_dst);
            true
        }
        Err(e) => {
            spec_cp_ctx.add_error(path_src, format!("{path_src} -> {path_dst}: {e}"));
            false
        }
    }
}
