//! Fuzzy search over the profile list.
//!
//! The searcher indexes every profile once: each searchable field is
//! lowercased and stored with a length norm (`1 / sqrt(token count)`), so
//! a hit in a short field weighs more than the same hit in a long one.
//! A query is matched against every field with [`bitap`]; a profile's score
//! is the product of its matched fields' scores, each raised to
//! `weight * norm`. Lower is better. Profiles with no matching field are
//! dropped.

pub mod bitap;

use bitap::BitapPattern;

use crate::profiles::Profile;

// =============================================================================
// OPTIONS
// =============================================================================

/// Tuning for approximate matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Highest accepted score; `0.0` requires a perfect match.
    pub threshold: f64,
    /// Where in the text a match is expected to start.
    pub location: usize,
    /// How quickly distance from `location` costs score.
    pub distance: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            location: 0,
            distance: 100,
        }
    }
}

/// A searchable field of a profile.
#[derive(Debug, Clone, Copy)]
pub struct SearchKey {
    pub name: &'static str,
    pub weight: f64,
    get: fn(&Profile) -> &str,
}

/// Profile name and account ID, weighted equally.
pub const DEFAULT_KEYS: [SearchKey; 2] = [
    SearchKey {
        name: "name",
        weight: 1.0,
        get: profile_name,
    },
    SearchKey {
        name: "account_id",
        weight: 1.0,
        get: account_id,
    },
];

fn profile_name(profile: &Profile) -> &str {
    &profile.name
}

fn account_id(profile: &Profile) -> &str {
    &profile.account_id
}

// =============================================================================
// SEARCHER
// =============================================================================

#[derive(Debug, Clone)]
struct IndexedField {
    text: Vec<char>,
    norm: f64,
}

/// One surviving profile with its combined score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
    /// Position in the original profile list.
    pub index: usize,
    pub score: f64,
}

/// Pre-indexed approximate search over a fixed profile list.
#[derive(Debug, Clone)]
pub struct FuzzySearcher {
    profiles: Vec<Profile>,
    /// Normalized so they sum to 1.
    weights: Vec<f64>,
    /// `index[profile][key]`, `None` for blank fields.
    index: Vec<Vec<Option<IndexedField>>>,
    options: SearchOptions,
}

impl FuzzySearcher {
    /// Index `profiles` with the default keys and options.
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self::with_options(profiles, &DEFAULT_KEYS, SearchOptions::default())
    }

    pub fn with_options(
        profiles: Vec<Profile>,
        keys: &[SearchKey],
        options: SearchOptions,
    ) -> Self {
        let total: f64 = keys.iter().map(|k| k.weight).sum();
        let weights = keys
            .iter()
            .map(|k| if total > 0.0 { k.weight / total } else { 0.0 })
            .collect();

        let index = profiles
            .iter()
            .map(|profile| keys.iter().map(|key| index_field((key.get)(profile))).collect())
            .collect();
        tracing::debug!(
            "indexed {} profiles on {:?}",
            profiles.len(),
            keys.iter().map(|key| key.name).collect::<Vec<_>>()
        );

        Self {
            profiles,
            weights,
            index,
            options,
        }
    }

    /// Every profile in original order.
    pub fn all(&self) -> Vec<&Profile> {
        self.profiles.iter().collect()
    }

    /// The indexed profile list.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles matching `term`, best first.
    ///
    /// An empty term returns everything in original order.
    pub fn search(&self, term: &str) -> Vec<&Profile> {
        if term.is_empty() {
            return self.all();
        }
        self.search_scored(term)
            .into_iter()
            .map(|m| &self.profiles[m.index])
            .collect()
    }

    /// Matches for a non-empty `term` with their scores, best first.
    /// Ties keep original order.
    pub fn search_scored(&self, term: &str) -> Vec<ScoredMatch> {
        let pattern = BitapPattern::new(term);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<ScoredMatch> = self
            .index
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                self.score_record(&pattern, fields)
                    .map(|score| ScoredMatch { index, score })
            })
            .collect();
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));

        tracing::debug!(
            "search {term:?}: {} of {} profiles matched",
            matches.len(),
            self.profiles.len()
        );
        matches
    }

    fn score_record(&self, pattern: &BitapPattern, fields: &[Option<IndexedField>]) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;

        for (field, weight) in fields.iter().zip(&self.weights) {
            let Some(field) = field else { continue };
            let result = pattern.search_in(&field.text, &self.options);
            if !result.is_match {
                continue;
            }
            matched = true;
            let score = if result.score == 0.0 {
                f64::EPSILON
            } else {
                result.score
            };
            total *= score.powf(weight * field.norm);
        }

        matched.then_some(total)
    }
}

fn index_field(value: &str) -> Option<IndexedField> {
    if value.trim().is_empty() {
        return None;
    }
    let tokens = value.split(' ').filter(|t| !t.is_empty()).count();
    Some(IndexedField {
        text: value.to_lowercase().chars().collect(),
        norm: field_norm(tokens),
    })
}

/// `1 / sqrt(tokens)`, rounded to three decimals.
fn field_norm(tokens: usize) -> f64 {
    let norm = 1.0 / (tokens.max(1) as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
