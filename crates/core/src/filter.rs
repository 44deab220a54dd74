//! Catalog filter: free-text search, region, theme and duration criteria.
//!
//! Criteria categories are combined with AND; selected themes are combined
//! with OR. Filtering never reorders the catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Destination, Region, Theme};
use crate::types::DayCount;

// ---------------------------------------------------------------------------
// Relevance weights
// ---------------------------------------------------------------------------

/// Score added when the term appears in the destination name.
pub const WEIGHT_NAME: u32 = 50;

/// Score added when the term appears in any theme label.
pub const WEIGHT_THEME: u32 = 20;

/// Score added when the term appears in the region name.
pub const WEIGHT_REGION: u32 = 10;

// ---------------------------------------------------------------------------
// Duration range
// ---------------------------------------------------------------------------

/// Inclusive stay-length bounds. A range with `min > max` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: DayCount,
    pub max: DayCount,
}

impl DurationRange {
    /// Accepts every stay length.
    pub const UNBOUNDED: DurationRange = DurationRange {
        min: 0,
        max: DayCount::MAX,
    };

    /// Initial position of the duration slider.
    pub const SLIDER_DEFAULT: DurationRange = DurationRange { min: 1, max: 5 };

    pub const fn new(min: DayCount, max: DayCount) -> Self {
        Self { min, max }
    }

    pub fn contains(self, days: DayCount) -> bool {
        self.min <= days && days <= self.max
    }

    pub fn is_unbounded(self) -> bool {
        self == Self::UNBOUNDED
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Active filter constraints, rebuilt from UI state on every change.
///
/// Empty region and theme sets mean "no restriction", not "exclude all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub regions: BTreeSet<Region>,
    pub themes: BTreeSet<Theme>,
    pub duration_range: DurationRange,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the term in normalized (trimmed, lowercased) form.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = normalize_text(term);
    }

    pub fn with_search_term(mut self, term: &str) -> Self {
        self.set_search_term(term);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.insert(region);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.themes.insert(theme);
        self
    }

    pub fn with_duration_range(mut self, range: DurationRange) -> Self {
        self.duration_range = range;
        self
    }

    /// Flip a region checkbox. Returns `true` if the region is now selected.
    pub fn toggle_region(&mut self, region: Region) -> bool {
        if self.regions.remove(&region) {
            false
        } else {
            self.regions.insert(region);
            true
        }
    }

    /// Flip a theme checkbox. Returns `true` if the theme is now selected.
    pub fn toggle_theme(&mut self, theme: Theme) -> bool {
        if self.themes.remove(&theme) {
            false
        } else {
            self.themes.insert(theme);
            true
        }
    }

    /// True when no criterion would exclude any destination.
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.regions.is_empty()
            && self.themes.is_empty()
            && self.duration_range.is_unbounded()
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Matching destinations plus the size of the catalog they came from.
///
/// An empty outcome is a valid "no matches" result, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub matches: Vec<Destination>,
    pub total: usize,
}

impl FilterOutcome {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Result-count line shown above the grid.
    pub fn summary(&self) -> String {
        format!("Showing {} of {} destinations", self.len(), self.total)
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Case-fold and trim text for comparison.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized text searched by the free-text term: name, region, themes and
/// description separated by spaces.
pub fn search_pool(destination: &Destination) -> String {
    normalize_text(&format!(
        "{} {} {} {}",
        destination.name,
        destination.region,
        destination.theme_labels(),
        destination.description
    ))
}

/// Plain substring containment; an empty term matches everything.
pub fn matches_search(destination: &Destination, term: &str) -> bool {
    let term = normalize_text(term);
    term.is_empty() || search_pool(destination).contains(&term)
}

pub fn matches_region(destination: &Destination, regions: &BTreeSet<Region>) -> bool {
    regions.is_empty() || regions.contains(&destination.region)
}

/// OR-match: any shared theme qualifies.
pub fn matches_themes(destination: &Destination, themes: &BTreeSet<Theme>) -> bool {
    themes.is_empty() || destination.themes.iter().any(|t| themes.contains(t))
}

pub fn matches_duration(destination: &Destination, range: DurationRange) -> bool {
    range.contains(destination.duration_days)
}

/// True when the destination passes every active criterion.
pub fn matches(destination: &Destination, criteria: &FilterCriteria) -> bool {
    matches_search(destination, &criteria.search_term)
        && matches_region(destination, &criteria.regions)
        && matches_themes(destination, &criteria.themes)
        && matches_duration(destination, criteria.duration_range)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Filter a slice of destinations, preserving order.
pub fn filter_destinations(
    destinations: &[Destination],
    criteria: &FilterCriteria,
) -> Vec<Destination> {
    destinations
        .iter()
        .filter(|d| matches(d, criteria))
        .cloned()
        .collect()
}

/// Filter the catalog, preserving catalog order.
pub fn filter(catalog: &Catalog, criteria: &FilterCriteria) -> FilterOutcome {
    FilterOutcome {
        matches: filter_destinations(catalog.as_slice(), criteria),
        total: catalog.len(),
    }
}

// ---------------------------------------------------------------------------
// Relevance
// ---------------------------------------------------------------------------

/// Weighted relevance of a destination for a search term.
///
/// Name, theme and region hits add [`WEIGHT_NAME`], [`WEIGHT_THEME`] and
/// [`WEIGHT_REGION`]. Descriptions do not contribute. An empty term scores 0.
pub fn relevance_score(destination: &Destination, term: &str) -> u32 {
    let term = normalize_text(term);
    if term.is_empty() {
        return 0;
    }

    let mut score = 0;
    if normalize_text(&destination.name).contains(&term) {
        score += WEIGHT_NAME;
    }
    if destination
        .themes
        .iter()
        .any(|t| normalize_text(t.as_str()).contains(&term))
    {
        score += WEIGHT_THEME;
    }
    if normalize_text(destination.region.as_str()).contains(&term) {
        score += WEIGHT_REGION;
    }
    score
}

/// Order destinations by descending relevance. Equal scores keep their
/// incoming order.
pub fn rank_by_relevance(destinations: &[Destination], term: &str) -> Vec<Destination> {
    let mut ranked = destinations.to_vec();
    ranked.sort_by_key(|d| std::cmp::Reverse(relevance_score(d, term)));
    ranked
}
