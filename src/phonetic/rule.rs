//! Rewrite rules used by the phonetic normalizer.

use std::borrow::Cow;
use std::fmt;

use regex::{Captures, Regex, RegexBuilder};

use crate::error::Result;

/// What a rule writes in place of each match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Replace the match with a template. `${1}` expands to the first
    /// capture group, or to nothing when the group did not participate.
    Template(String),

    /// Replace the match with its first character. Used to collapse doubled
    /// letters without back-references.
    KeepFirst,
}

/// A single case-insensitive rewrite step.
///
/// Each application is one non-overlapping, left-to-right pass over the
/// input, like a global regex substitution.
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
}

impl RewriteRule {
    /// Create a rule replacing every match of `pattern` with `template`.
    pub fn template(name: &'static str, pattern: &str, template: &str) -> Result<Self> {
        Self::new(name, pattern, Rewrite::Template(template.to_string()))
    }

    /// Create a rule replacing every match of `pattern` with its first character.
    pub fn keep_first(name: &'static str, pattern: &str) -> Result<Self> {
        Self::new(name, pattern, Rewrite::KeepFirst)
    }

    /// Create a new rule. The pattern is always compiled case-insensitively.
    pub fn new(name: &'static str, pattern: &str, rewrite: Rewrite) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name,
            pattern,
            rewrite,
        })
    }

    /// Apply this rule once to `input`.
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match &self.rewrite {
            Rewrite::Template(template) => self.pattern.replace_all(input, template.as_str()),
            Rewrite::KeepFirst => self.pattern.replace_all(input, |caps: &Captures| {
                caps[0].chars().next().map(String::from).unwrap_or_default()
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn rewrite(&self) -> &Rewrite {
        &self.rewrite
    }
}

impl fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("rewrite", &self.rewrite)
            .finish()
    }
}
