use anyhow::bail;
use serde::{Deserialize, Serialize};

use super::collections::HashSet;
use crate::layout_engine::{
    BufferFetcher, Layout, MINIBUFFER_PATTERN, MasterPosition, Strategy, TileError,
};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Strategies in the order repeated invocations visit them.
    #[serde(default)]
    pub rotation: Vec<StrategySpec>,
    #[serde(default)]
    pub filter: FilterSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilterSettings {
    /// Panes whose display name matches any of these regexes are never tiled.
    #[serde(default = "default_ignore_names")]
    pub ignore_names: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            ignore_names: default_ignore_names(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct StrategySpec {
    pub name: String,
    pub layout: LayoutSpec,
    /// Fixed number of panes to tile. When absent the invocation's window
    /// count is used.
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSpec {
    Wide,
    Tall,
    Master { position: MasterPosition },
}

impl LayoutSpec {
    pub fn to_layout(self) -> Layout {
        match self {
            LayoutSpec::Wide => Layout::wide(),
            LayoutSpec::Tall => Layout::tall(),
            LayoutSpec::Master { position } => Layout::master(position),
        }
    }
}

impl StrategySpec {
    pub fn fetcher(&self) -> BufferFetcher {
        match self.count {
            Some(n) => BufferFetcher::FixedN(n),
            None => BufferFetcher::Argument,
        }
    }

    pub fn to_strategy(&self) -> Result<Strategy, TileError> {
        if let Some(reason) = self.problem() {
            return Err(TileError::InvalidStrategy {
                name: self.name.clone(),
                reason,
            });
        }
        Ok(Strategy::new(self.name.clone(), self.fetcher(), self.layout.to_layout()))
    }

    fn problem(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("name must not be empty".to_string());
        }
        if self.count == Some(0) {
            return Some("count must be at least 1".to_string());
        }
        None
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.rotation.is_empty() {
            issues.push("rotation must contain at least one strategy".to_string());
        }

        let mut seen = HashSet::default();
        for (index, spec) in self.rotation.iter().enumerate() {
            if let Some(problem) = spec.problem() {
                issues.push(format!("rotation entry {} ({:?}): {}", index, spec.name, problem));
            }
            if !seen.insert(spec.name.as_str()) {
                issues.push(format!("duplicate strategy name {:?} in rotation", spec.name));
            }
        }

        issues.extend(self.filter.validate());

        issues
    }
}

impl FilterSettings {
    pub fn validate(&self) -> Vec<String> {
        self.ignore_names
            .iter()
            .filter_map(|pattern| {
                regex::Regex::new(pattern)
                    .err()
                    .map(|e| format!("invalid ignore_names pattern {:?}: {}", pattern, e))
            })
            .collect()
    }
}

fn default_ignore_names() -> Vec<String> { vec![MINIBUFFER_PATTERN.to_string()] }

impl Default for Config {
    fn default() -> Self { Config::builtin() }
}

const LAYOUT_NAMES: &[&str] = &["wide", "tall", "master"];

impl Config {
    /// Built-in configuration shipped with the crate.
    pub fn builtin() -> Config {
        Self::parse(include_str!("../../tiler.default.toml"))
            .expect("built-in configuration parses")
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        match toml::from_str::<Config>(buf) {
            Ok(config) => Ok(config),
            Err(e) => {
                let msg = e.to_string();
                match Self::extract_unknown_variant(&msg)
                    .and_then(|(unknown, expected)| Self::suggest(&unknown, &expected))
                {
                    Some(suggestion) => bail!("{msg}\nDid you mean `{suggestion}`?"),
                    None => bail!("{msg}"),
                }
            }
        }
    }

    /// Splits serde's "unknown variant `x`, expected one of `a`, `b`" into
    /// the unknown token and the expected ones.
    fn extract_unknown_variant(err: &str) -> Option<(String, Vec<String>)> {
        let needle = "unknown variant `";
        let start = err.find(needle)? + needle.len();
        let end = start + err[start..].find('`')?;
        let unknown = err[start..end].to_string();

        let expected: Vec<String> = err[end + 1..]
            .split('`')
            .skip(1)
            .step_by(2)
            .filter(|token| *token != unknown)
            .map(str::to_string)
            .collect();
        let expected = if expected.is_empty() {
            LAYOUT_NAMES.iter().map(|s| s.to_string()).collect()
        } else {
            expected
        };
        Some((unknown, expected))
    }

    fn suggest(unknown: &str, candidates: &[String]) -> Option<String> {
        let unknown = unknown.to_lowercase();
        let threshold = (unknown.len() / 3).max(2);
        candidates
            .iter()
            .map(|c| (c, Self::levenshtein(&unknown, c)))
            .filter(|(_, d)| *d <= threshold)
            .min_by_key(|(_, d)| *d)
            .map(|(c, _)| c.clone())
    }

    fn levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut prev: Vec<usize> = (0..=b.len()).collect();
        for i in 1..=a.len() {
            let mut row = vec![i; b.len() + 1];
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                row[j] = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
            }
            prev = row;
        }
        prev[b.len()]
    }
}
