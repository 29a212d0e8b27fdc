//! Wildcard matching for dispatch sources and `find` name filters.

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};

use crate::spec::{EnumPatternMode, ShellError, ShellResult};

////////////////////////////////////////////////////////////////////////////////
// #region Wildcard

/// Whole-name, case-insensitive wildcard matcher for one pattern.
///
/// Supports `*`, `?` and `[...]` classes. A pattern that does not compile as
/// a glob (e.g. an unclosed `[`) degrades to a case-insensitive literal
/// comparison.
#[derive(Debug, Clone)]
pub(crate) struct SpecWildcard {
    pattern: String,
    matcher: Option<GlobMatcher>,
}

impl SpecWildcard {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            matcher: compile_glob(pattern).ok(),
        }
    }

    pub(crate) fn is_match(&self, name: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(name),
            None => name.to_lowercase() == self.pattern.to_lowercase(),
        }
    }
}

fn compile_glob(pattern: &str) -> ShellResult<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map_err(|e| ShellError::invalid_pattern(pattern, e))?;
    Ok(glob.compile_matcher())
}

/// `true` when `name` fully matches `pattern` (case-insensitive wildcards).
pub fn is_wildcard_match(name: &str, pattern: &str) -> bool {
    SpecWildcard::new(pattern).is_match(name)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NameFilters

#[derive(Debug, Clone)]
enum TypeNamePatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

/// Compiled `find` name filters. No filters match every name.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpecNameFilters {
    patterns: Option<TypeNamePatternSeq>,
}

impl SpecNameFilters {
    pub(crate) fn from_raw(
        patterns: Option<&[String]>,
        rule_pattern: EnumPatternMode,
    ) -> ShellResult<Self> {
        let Some(patterns) = patterns else {
            return Ok(Self::default());
        };
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let patterns = match rule_pattern {
            EnumPatternMode::Literal => TypeNamePatternSeq::Literal(
                patterns.iter().map(|p| p.to_lowercase()).collect(),
            ),
            EnumPatternMode::Glob => {
                let mut l_glob = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    l_glob.push(compile_glob(pattern)?);
                }
                TypeNamePatternSeq::Glob(l_glob)
            }
            EnumPatternMode::Regex => {
                let mut l_regex = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    let regex = RegexBuilder::new(pattern)
                        .build()
                        .map_err(|e| ShellError::invalid_pattern(pattern, e))?;
                    l_regex.push(regex);
                }
                TypeNamePatternSeq::Regex(l_regex)
            }
        };
        Ok(Self {
            patterns: Some(patterns),
        })
    }

    pub(crate) fn is_match(&self, name: &str) -> bool {
        match &self.patterns {
            None => true,
            Some(TypeNamePatternSeq::Literal(v)) => {
                let c_name = name.to_lowercase();
                v.iter().any(|p| *p == c_name)
            }
            Some(TypeNamePatternSeq::Glob(v)) => v.iter().any(|p| p.is_match(name)),
            Some(TypeNamePatternSeq::Regex(v)) => v.iter().any(|p| p.is_match(name)),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
