//! Destination statistics behind the dashboard charts.
//!
//! Produces chart-ready data only (rankings, radar axes, scatter points);
//! drawing is left to the renderer.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::DestinationId;

// ---------------------------------------------------------------------------
// Stats types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Five-axis rating, each score 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureScores {
    pub scenery: u8,
    pub nightlife: u8,
    pub culture: u8,
    pub affordability: u8,
    pub adventure: u8,
}

impl FeatureScores {
    /// Labeled axes in radar-chart order.
    pub fn axes(&self) -> [FeatureAxis; 5] {
        [
            FeatureAxis::new("Scenery", self.scenery),
            FeatureAxis::new("Nightlife", self.nightlife),
            FeatureAxis::new("Culture", self.culture),
            FeatureAxis::new("Affordability", self.affordability),
            FeatureAxis::new("Adventure", self.adventure),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureAxis {
    pub label: &'static str,
    pub score: u8,
}

impl FeatureAxis {
    fn new(label: &'static str, score: u8) -> Self {
        Self { label, score }
    }
}

/// Popularity and rating figures for one catalog destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DestinationStats {
    pub destination_id: DestinationId,
    /// Relative visitor volume (chart units).
    pub visitors: u32,
    /// Price level 1-5, rendered as dollar signs.
    pub affordability: u8,
    pub coordinates: Coordinates,
    pub features: FeatureScores,
}

// ---------------------------------------------------------------------------
// Chart outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularityEntry {
    pub destination_id: DestinationId,
    pub name: String,
    pub visitors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureProfile {
    pub destination_id: DestinationId,
    pub name: String,
    pub axes: [FeatureAxis; 5],
}

/// Row of the statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    pub destination_id: DestinationId,
    pub name: String,
    pub visitors: u32,
    pub affordability: String,
    pub themes: String,
}

/// Drawing surface for the geographic scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 40.0,
        }
    }
}

/// Projected scatter-plot marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub destination_id: DestinationId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Base marker radius before the popularity bonus.
pub const BASE_MARKER_RADIUS: f64 = 6.0;

/// Visitors per extra unit of marker radius.
pub const VISITORS_PER_RADIUS_UNIT: f64 = 20.0;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Destinations ordered by descending visitor volume; ties keep stats order.
///
/// Rows whose destination is not in the catalog are skipped.
pub fn popularity_ranking(catalog: &Catalog, stats: &[DestinationStats]) -> Vec<PopularityEntry> {
    let mut entries: Vec<PopularityEntry> = stats
        .iter()
        .filter_map(|s| {
            catalog.get(s.destination_id).map(|d| PopularityEntry {
                destination_id: d.id,
                name: d.name.clone(),
                visitors: s.visitors,
            })
        })
        .collect();
    entries.sort_by(|a, b| b.visitors.cmp(&a.visitors));
    entries
}

/// Radar-chart data for the destination with the given name.
pub fn feature_profile(
    catalog: &Catalog,
    stats: &[DestinationStats],
    name: &str,
) -> Option<FeatureProfile> {
    let destination = catalog.find_by_name(name)?;
    let row = stats.iter().find(|s| s.destination_id == destination.id)?;
    Some(FeatureProfile {
        destination_id: destination.id,
        name: destination.name.clone(),
        axes: row.features.axes(),
    })
}

/// Price level as repeated dollar signs ("$$$" for 3).
pub fn affordability_label(level: u8) -> String {
    "$".repeat(usize::from(level))
}

/// Statistics table rows in stats order.
pub fn table_rows(catalog: &Catalog, stats: &[DestinationStats]) -> Vec<StatsRow> {
    stats
        .iter()
        .filter_map(|s| {
            catalog.get(s.destination_id).map(|d| StatsRow {
                destination_id: d.id,
                name: d.name.clone(),
                visitors: s.visitors,
                affordability: affordability_label(s.affordability),
                themes: d
                    .themes
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join("/"),
            })
        })
        .collect()
}

/// Project coordinates onto the canvas.
///
/// Longitude maps to x; latitude is inverted for y so north is up. The
/// bounding box spans the padded canvas. A zero-width span collapses onto
/// the padded edge instead of dividing by zero.
pub fn project_coordinates(stats: &[DestinationStats], canvas: Canvas) -> Vec<MapPoint> {
    let Some(first) = stats.first() else {
        return Vec::new();
    };

    let (mut min_lat, mut max_lat) = (first.coordinates.lat, first.coordinates.lat);
    let (mut min_lng, mut max_lng) = (first.coordinates.lng, first.coordinates.lng);
    for s in stats {
        min_lat = min_lat.min(s.coordinates.lat);
        max_lat = max_lat.max(s.coordinates.lat);
        min_lng = min_lng.min(s.coordinates.lng);
        max_lng = max_lng.max(s.coordinates.lng);
    }

    let lng_span = max_lng - min_lng;
    let lat_span = max_lat - min_lat;
    let inner_width = canvas.width - 2.0 * canvas.padding;
    let inner_height = canvas.height - 2.0 * canvas.padding;

    stats
        .iter()
        .map(|s| {
            let x_ratio = if lng_span > 0.0 {
                (s.coordinates.lng - min_lng) / lng_span
            } else {
                0.0
            };
            let y_ratio = if lat_span > 0.0 {
                (max_lat - s.coordinates.lat) / lat_span
            } else {
                0.0
            };
            MapPoint {
                destination_id: s.destination_id,
                x: canvas.padding + x_ratio * inner_width,
                y: canvas.padding + y_ratio * inner_height,
                radius: BASE_MARKER_RADIUS + f64::from(s.visitors) / VISITORS_PER_RADIUS_UNIT,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

const fn row(
    destination_id: DestinationId,
    visitors: u32,
    affordability: u8,
    lat: f64,
    lng: f64,
    features: [u8; 5],
) -> DestinationStats {
    DestinationStats {
        destination_id,
        visitors,
        affordability,
        coordinates: Coordinates { lat, lng },
        features: FeatureScores {
            scenery: features[0],
            nightlife: features[1],
            culture: features[2],
            affordability: features[3],
            adventure: features[4],
        },
    }
}

const BUILTIN_STATS: [DestinationStats; 10] = [
    row(1, 60, 3, 16.4024, 120.5960, [4, 2, 5, 3, 3]),
    row(2, 64, 2, 9.8787, 124.2389, [5, 3, 4, 4, 3]),
    row(3, 88, 4, 11.9678, 121.9219, [5, 5, 2, 2, 4]),
    row(4, 70, 3, 9.8887, 126.0469, [4, 3, 2, 3, 5]),
    row(5, 55, 5, 11.2000, 119.4167, [5, 2, 3, 2, 4]),
    row(6, 95, 3, 10.3157, 123.8854, [3, 4, 4, 4, 2]),
    row(7, 50, 5, 11.9961, 120.2045, [5, 1, 3, 2, 5]),
    row(8, 30, 2, 17.5746, 120.3897, [3, 1, 5, 5, 1]),
    row(9, 45, 3, 7.1907, 125.4549, [4, 3, 4, 4, 3]),
    row(10, 25, 5, 20.4468, 121.9723, [5, 1, 4, 1, 3]),
];

/// Statistics for the built-in catalog, in catalog order.
pub fn builtin_stats() -> Vec<DestinationStats> {
    BUILTIN_STATS.to_vec()
}
