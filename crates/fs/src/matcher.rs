use std::time::SystemTime;

use logsweep_runtime::SweepConfig;
use log::error;
use regex::Regex;

const SECS_PER_HOUR: u64 = 3600;
const HOURS_PER_DAY: u64 = 24;

/// Why a file qualified for age evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule<'a> {
    Pattern(&'a str),
    Extension(&'a str),
}

/// Optional regular expression searched (unanchored) in a file's base name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Option<Regex>,
}

impl NamePattern {
    /// A blank pattern never matches and is not compiled.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = if is_blank(pattern) {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(NamePattern { regex })
    }

    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(name))
    }
}

/// Matching and age rules shared by every directory of a run.
#[derive(Debug, Clone)]
pub struct SweepRules {
    pattern: NamePattern,
    extensions: Vec<String>,
    min_age_days: u32,
    recursive: bool,
}

impl SweepRules {
    /// An invalid pattern is logged and treated as blank, so extension
    /// matching still applies.
    pub fn new(
        pattern: &str,
        extensions: Vec<String>,
        min_age_days: u32,
        recursive: bool,
    ) -> Self {
        let pattern = NamePattern::new(pattern).unwrap_or_else(|e| {
            error!("Invalid pattern '{pattern}', ignoring it: {e}");
            NamePattern { regex: None }
        });

        SweepRules {
            pattern,
            extensions,
            min_age_days,
            recursive,
        }
    }

    pub fn from_config(config: &SweepConfig) -> Self {
        Self::new(
            &config.pattern,
            config.extensions.clone(),
            config.min_age_days,
            config.recursive,
        )
    }

    #[inline]
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    #[inline]
    pub fn min_age_days(&self) -> u32 {
        self.min_age_days
    }

    /// Pattern is tried before extensions; `None` means the file is left alone.
    pub fn qualifies(&self, name: &str) -> Option<MatchRule<'_>> {
        if self.pattern.matches(name) {
            return self.pattern.as_str().map(MatchRule::Pattern);
        }
        ends_with_any(name, &self.extensions).map(MatchRule::Extension)
    }

    /// Inclusive threshold.
    #[inline]
    pub fn is_expired(&self, days_old: u64) -> bool {
        days_old >= u64::from(self.min_age_days)
    }
}

#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// First non-blank suffix `name` ends with, ignoring case.
pub fn ends_with_any<'a, S: AsRef<str>>(name: &str, suffixes: &'a [S]) -> Option<&'a str> {
    let upper = name.to_uppercase();
    suffixes
        .iter()
        .map(AsRef::as_ref)
        .find(|suffix| !is_blank(suffix) && upper.ends_with(&suffix.to_uppercase()))
}

/// Whole days since `modified`: elapsed hours are truncated first, then
/// divided by 24. Modification times in the future count as 0.
pub fn days_old(modified: SystemTime, now: SystemTime) -> u64 {
    let elapsed = now.duration_since(modified).unwrap_or_default();
    let hours = elapsed.as_secs() / SECS_PER_HOUR;
    hours / HOURS_PER_DAY
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
