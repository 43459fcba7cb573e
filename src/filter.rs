// src/filter.rs
//! Filter predicate over canonical records: provider, minimum urgency, related symbols.

use std::collections::HashSet;

use crate::record::CanonicalRecord;

/// Immutable filter settings for one batch run. `Default` filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    symbols: Option<HashSet<String>>,
    provider: Option<String>,
    min_urgency: Option<i64>,
}

impl FilterConfig {
    /// Builds a config; symbols are uppercased, the provider lowercased, blanks dropped.
    pub fn new<I, S>(symbols: Option<I>, provider: Option<&str>, min_urgency: Option<i64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default().with_min_urgency(min_urgency);
        if let Some(symbols) = symbols {
            cfg = cfg.with_symbols(symbols);
        }
        if let Some(provider) = provider {
            cfg = cfg.with_provider(provider);
        }
        cfg
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        self.symbols = (!set.is_empty()).then_some(set);
        self
    }

    pub fn with_provider(mut self, provider: &str) -> Self {
        let p = provider.trim().to_lowercase();
        self.provider = (!p.is_empty()).then_some(p);
        self
    }

    pub fn with_min_urgency(mut self, min_urgency: Option<i64>) -> Self {
        self.min_urgency = min_urgency;
        self
    }

    pub fn symbols(&self) -> Option<&HashSet<String>> {
        self.symbols.as_ref()
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn min_urgency(&self) -> Option<i64> {
        self.min_urgency
    }

    /// True when no criterion is configured.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_none() && self.provider.is_none() && self.min_urgency.is_none()
    }

    /// Conjunction of all configured criteria, cheapest first.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        if let Some(provider) = &self.provider {
            if record.provider.to_lowercase() != *provider {
                return false;
            }
        }

        if let Some(min) = self.min_urgency {
            // Missing or non-integer urgency never passes a threshold.
            match record.urgency.as_level() {
                Some(level) if level >= min => {}
                _ => return false,
            }
        }

        if let Some(wanted) = &self.symbols {
            let hit = record
                .related_symbols
                .iter()
                .any(|s| wanted.contains(&s.symbol.to_uppercase()));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Free-function form of [`FilterConfig::matches`].
pub fn matches(record: &CanonicalRecord, config: &FilterConfig) -> bool {
    config.matches(record)
}
