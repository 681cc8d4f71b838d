//! File-name based pattern attribution.
//!
//! Screenshot names encode the scenario they were taken in
//! (e.g. `07_zoom_out_max.png`, `12_north_edge.png`), so tagging issues by name
//! shows which camera situations lose tile coverage.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::config::PatternRule;
use super::issues::Issue;

/// Maps a screenshot file name to the set of tags it carries.
pub trait PatternTagger {
    fn tags(&self, file_name: &str) -> BTreeSet<String>;
}

impl<F> PatternTagger for F
where
    F: Fn(&str) -> BTreeSet<String>,
{
    fn tags(&self, file_name: &str) -> BTreeSet<String> {
        self(file_name)
    }
}

/// Tags file names with every configured rule whose regex matches.
#[derive(Debug, Clone)]
pub struct RegexTagger {
    rules: Vec<(String, Regex)>,
}

impl RegexTagger {
    /// Compiles the rules case-insensitively.
    pub fn from_rules(rules: &[PatternRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                RegexBuilder::new(&rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (rule.tag.clone(), re))
                    .context(format!("Invalid pattern for tag '{}': {}", rule.tag, rule.pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
}

impl PatternTagger for RegexTagger {
    fn tags(&self, file_name: &str) -> BTreeSet<String> {
        self.rules
            .iter()
            .filter(|(_, re)| re.is_match(file_name))
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}

/// Number of issues carrying one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternCount {
    pub tag: String,
    pub label: String,
    pub count: usize,
}

/// Counts issues per tag.
///
/// Tags are independent: an issue tagged both `edge` and `zoom` counts toward
/// both. Configured rules come first in their configured order, tags without a
/// rule follow alphabetically and use the tag itself as label. Tags with no
/// issues are omitted.
pub fn count_patterns(issues: &[Issue], rules: &[PatternRule]) -> Vec<PatternCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for issue in issues {
        for tag in &issue.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut result = Vec::new();
    for rule in rules {
        if let Some(count) = counts.remove(rule.tag.as_str()) {
            result.push(PatternCount {
                tag: rule.tag.clone(),
                label: rule.label.clone(),
                count,
            });
        }
    }
    for (tag, count) in counts {
        result.push(PatternCount {
            tag: tag.to_string(),
            label: tag.to_string(),
            count,
        });
    }
    result
}
