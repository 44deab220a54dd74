//! Destination catalog: regions, themes, and the built-in destination table.
//!
//! The catalog is assembled once at startup and never mutated afterwards.
//! Every other module borrows destinations from it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DayCount, DestinationId};

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// Island group a destination belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Luzon,
    Visayas,
    Mindanao,
    Palawan,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Luzon,
        Region::Visayas,
        Region::Mindanao,
        Region::Palawan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Luzon => "Luzon",
            Self::Visayas => "Visayas",
            Self::Mindanao => "Mindanao",
            Self::Palawan => "Palawan",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    /// Case-insensitive lookup by display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown region '{needle}'. Must be one of: {}",
                    Self::ALL.map(Region::as_str).join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Experience tag attached to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Theme {
    Mountain,
    Culture,
    History,
    Beach,
    Nature,
    Party,
    Surf,
    Adventure,
    City,
    Diving,
    #[serde(rename = "Eco-tourism")]
    EcoTourism,
    Scenery,
    Rural,
}

impl Theme {
    pub const ALL: [Theme; 13] = [
        Theme::Mountain,
        Theme::Culture,
        Theme::History,
        Theme::Beach,
        Theme::Nature,
        Theme::Party,
        Theme::Surf,
        Theme::Adventure,
        Theme::City,
        Theme::Diving,
        Theme::EcoTourism,
        Theme::Scenery,
        Theme::Rural,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mountain => "Mountain",
            Self::Culture => "Culture",
            Self::History => "History",
            Self::Beach => "Beach",
            Self::Nature => "Nature",
            Self::Party => "Party",
            Self::Surf => "Surf",
            Self::Adventure => "Adventure",
            Self::City => "City",
            Self::Diving => "Diving",
            Self::EcoTourism => "Eco-tourism",
            Self::Scenery => "Scenery",
            Self::Rural => "Rural",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::Validation(format!("Unknown theme '{needle}'")))
    }
}

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub region: Region,
    pub themes: Vec<Theme>,
    /// Minimum recommended stay.
    pub duration_days: DayCount,
    pub description: String,
}

impl Destination {
    pub fn has_theme(&self, theme: Theme) -> bool {
        self.themes.contains(&theme)
    }

    /// Theme labels joined with single spaces, as shown on result cards.
    pub fn theme_labels(&self) -> String {
        self.themes
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The fixed, ordered destination table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Build a catalog, rejecting rows that break the catalog invariants.
    ///
    /// Ids must be unique and positive, names non-empty, theme sets non-empty
    /// and stay lengths at least one day.
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(destinations.len());
        for d in &destinations {
            if d.id == 0 {
                return Err(CoreError::Validation(format!(
                    "Destination '{}' must have a positive id",
                    d.name
                )));
            }
            if !seen.insert(d.id) {
                return Err(CoreError::Conflict(format!(
                    "Duplicate destination id {}",
                    d.id
                )));
            }
            if d.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Destination {} has an empty name",
                    d.id
                )));
            }
            if d.themes.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Destination '{}' must have at least one theme",
                    d.name
                )));
            }
            if d.duration_days == 0 {
                return Err(CoreError::Validation(format!(
                    "Destination '{}' must have a stay of at least one day",
                    d.name
                )));
            }
        }
        Ok(Self { destinations })
    }

    /// A catalog with no destinations.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The ten built-in Philippine destinations.
    pub fn builtin() -> Self {
        let destinations = BUILTIN
            .iter()
            .map(|seed| Destination {
                id: seed.id,
                name: seed.name.to_string(),
                region: seed.region,
                themes: seed.themes.to_vec(),
                duration_days: seed.duration_days,
                description: seed.description.to_string(),
            })
            .collect();
        Self { destinations }
    }

    pub fn get(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Look up a destination by id, failing with `NotFound`.
    pub fn require(&self, id: DestinationId) -> Result<&Destination, CoreError> {
        self.get(id).ok_or(CoreError::NotFound {
            entity: "destination",
            id,
        })
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        let needle = name.trim().to_lowercase();
        self.destinations
            .iter()
            .find(|d| d.name.to_lowercase() == needle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }

    pub fn as_slice(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Shortest and longest stay in the catalog, or `None` when empty.
    pub fn duration_bounds(&self) -> Option<(DayCount, DayCount)> {
        let min = self.destinations.iter().map(|d| d.duration_days).min()?;
        let max = self.destinations.iter().map(|d| d.duration_days).max()?;
        Some((min, max))
    }
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

struct SeedDestination {
    id: DestinationId,
    name: &'static str,
    region: Region,
    themes: &'static [Theme],
    duration_days: DayCount,
    description: &'static str,
}

const BUILTIN: &[SeedDestination] = &[
    SeedDestination {
        id: 1,
        name: "Baguio City",
        region: Region::Luzon,
        themes: &[Theme::Mountain, Theme::Culture, Theme::History],
        duration_days: 2,
        description: "The Summer Capital of the Philippines, known for its cool climate, pine trees, and cultural sites.",
    },
    SeedDestination {
        id: 2,
        name: "Bohol Island",
        region: Region::Visayas,
        themes: &[Theme::Beach, Theme::Nature, Theme::History],
        duration_days: 3,
        description: "Home to the Chocolate Hills and the tiny Tarsiers, offering a mix of nature and relaxation.",
    },
    SeedDestination {
        id: 3,
        name: "Boracay Island",
        region: Region::Visayas,
        themes: &[Theme::Beach, Theme::Party],
        duration_days: 4,
        description: "Famous worldwide for its stunning White Beach and vibrant nightlife.",
    },
    SeedDestination {
        id: 4,
        name: "Siargao Island",
        region: Region::Mindanao,
        themes: &[Theme::Surf, Theme::Adventure, Theme::Nature],
        duration_days: 4,
        description: "The surfing capital of the Philippines, perfect for island hopping and adrenaline activities.",
    },
    SeedDestination {
        id: 5,
        name: "El Nido, Palawan",
        region: Region::Palawan,
        themes: &[Theme::Nature, Theme::Beach, Theme::Adventure],
        duration_days: 5,
        description: "Known for its stunning limestone cliffs, clear waters, and spectacular lagoons.",
    },
    SeedDestination {
        id: 6,
        name: "Cebu (City & South)",
        region: Region::Visayas,
        themes: &[Theme::City, Theme::History, Theme::Adventure],
        duration_days: 3,
        description: "A major economic hub offering historical sites and easy access to canyoneering and diving spots.",
    },
    SeedDestination {
        id: 7,
        name: "Coron, Palawan",
        region: Region::Palawan,
        themes: &[Theme::Nature, Theme::Diving],
        duration_days: 4,
        description: "A world-renowned diving location famous for sunken WWII wrecks and unique lakes.",
    },
    SeedDestination {
        id: 8,
        name: "Vigan City",
        region: Region::Luzon,
        themes: &[Theme::History, Theme::Culture],
        duration_days: 2,
        description: "A UNESCO World Heritage Site with preserved Spanish colonial architecture and cobblestone streets.",
    },
    SeedDestination {
        id: 9,
        name: "Davao City",
        region: Region::Mindanao,
        themes: &[Theme::City, Theme::EcoTourism],
        duration_days: 3,
        description: "The largest city in Mindanao, known for the Philippine Eagle and Mount Apo.",
    },
    SeedDestination {
        id: 10,
        name: "Batanes Islands",
        region: Region::Luzon,
        themes: &[Theme::Scenery, Theme::Rural],
        duration_days: 5,
        description: "A cluster of islands known for its unique culture, stone houses, and rolling hills.",
    },
];
