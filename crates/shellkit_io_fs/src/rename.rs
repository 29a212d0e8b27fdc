//! Move engine: one rename per matched entry.

use std::fs;

use crate::dispatch::dispatch;
use crate::path::prepare_argument;
use crate::report::ReportTransform;

/// Move `source` (optionally ending in a wildcard segment) to `target`.
pub fn mv(source: &str, target: &str) -> bool {
    mv_with(source, target, None)
}

/// Move `source` to `target`, recording each rename in `report_transform`.
///
/// Directories are renamed as whole subtrees. Target arity follows the same
/// rules as [`crate::cp_with`]. Renames across filesystems are not emulated.
pub fn mv_with(
    source: &str,
    target: &str,
    report_transform: Option<&mut ReportTransform>,
) -> bool {
    if source.is_empty() || target.is_empty() {
        tracing::warn!("usage: mv(source, target)");
        return false;
    }

    let mut report_local = ReportTransform::default();
    let report_transform = report_transform.unwrap_or(&mut report_local);

    let c_source = prepare_argument(source);
    let c_target = prepare_argument(target);
    let outcome = dispatch(&c_source, &c_target, |from, to, _| {
        match fs::rename(from, to) {
            Ok(()) => {
                report_transform.add_entry(from, to);
                true
            }
            Err(e) => {
                let c_message = format!("{from} -> {to}: {e}");
                tracing::warn!("mv: {c_message}");
                report_transform.add_error(from, c_message);
                false
            }
        }
    });

    match outcome.into_result(&c_source, &c_target) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("mv: {e}");
            false
        }
    }
}
