//! Transformation log shared by `cp` and `mv`.

use std::fmt;

use crate::spec::{SpecEntryError, SpecTransformEntry};

/// Caller-owned, append-only record of one or more `cp`/`mv` runs.
///
/// Engines only ever append to it: transfers land in `entries` in the order
/// they succeeded, failed entry actions land in `errors`. Passing the same
/// report to several calls accumulates their logs.
#[derive(Debug, Default, Clone)]
pub struct ReportTransform {
    entries: Vec<SpecTransformEntry>,
    errors: Vec<SpecEntryError>,
}

impl ReportTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful transfers in insertion order.
    pub fn entries(&self) -> &[SpecTransformEntry] {
        &self.entries
    }

    /// Failed entry actions in insertion order.
    pub fn errors(&self) -> &[SpecEntryError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// `(source, destination)` pairs in insertion order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|e| (e.path_src.clone(), e.path_dst.clone()))
            .collect()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} transferred={} errors={}",
            self.len(),
            self.error_count()
        )
    }

    pub(crate) fn add_entry(&mut self, path_src: &str, path_dst: &str) {
        self.entries.push(SpecTransformEntry {
            path_src: path_src.to_string(),
            path_dst: path_dst.to_string(),
        });
    }

    pub(crate) fn add_error(&mut self, path: &str, exception: String) {
        self.errors.push(SpecEntryError {
            path: path.to_string(),
            exception,
        });
    }
}

impl fmt::Display for ReportTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[TRANSFORM]"))
    }
}

impl<'a> IntoIterator for &'a ReportTransform {
    type Item = &'a SpecTransformEntry;
    type IntoIter = std::slice::Iter<'a, SpecTransformEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::ReportTransform;

    #[test]
    fn report_keeps_insertion_order_and_formats() {
        let mut report = ReportTransform::new();
        report.add_entry("src/b", "dst/b");
        report.add_entry("src/a", "dst/a");
        report.add_error("src/c", "denied".to_string());

        assert_eq!(
            report.to_pairs(),
            vec![
                ("src/b".to_string(), "dst/b".to_string()),
                ("src/a".to_string(), "dst/a".to_string()),
            ]
        );
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors()[0].path, "src/c");
        assert_eq!(report.format("[CP]"), "[CP] transferred=2 errors=1");
        assert_eq!(report.to_string(), "[TRANSFORM] transferred=2 errors=1");
        assert_eq!((&report).into_iter().count(), 2);
    }
}
