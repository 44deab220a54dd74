//! Itinerary builder: date validation, feasibility check, and leg layout.
//!
//! Legs are laid out back to back from the start date, in name order, with
//! one unassigned transition day between consecutive legs. The feasibility
//! check counts those transition days, so an accepted plan never runs past
//! the end date.

use std::cmp::Ordering;

use serde::Serialize;

use crate::catalog::Destination;
use crate::dates::TripDate;
use crate::types::DayCount;

/// Unassigned travel days inserted between two consecutive legs.
pub const TRANSITION_DAYS: DayCount = 1;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a plan request is rejected, checked in declaration order.
///
/// `Display` renders the message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItineraryError {
    #[error("Please select both a start and end date for your trip.")]
    MissingDates,

    #[error("The start date must be before the end date.")]
    InvalidRange { start: TripDate, end: TripDate },

    #[error("Please select at least one destination.")]
    NoDestinationsSelected,

    #[error(
        "Your selected destinations require {required_days} days, but your trip only lasts \
         {available_days} days. Please adjust your dates or destinations."
    )]
    InsufficientDuration {
        required_days: DayCount,
        available_days: DayCount,
    },
}

// ---------------------------------------------------------------------------
// Itinerary types
// ---------------------------------------------------------------------------

/// One destination's contiguous stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryLeg {
    /// Zero-based position in the itinerary.
    pub index: usize,
    pub destination: Destination,
    pub arrival_date: TripDate,
    /// Last day of the stay (inclusive).
    pub departure_date: TripDate,
}

impl ItineraryLeg {
    /// One-based position, as printed on itinerary cards.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }

    pub fn stay_days(&self) -> DayCount {
        self.arrival_date.inclusive_days(self.departure_date)
    }
}

/// A generated schedule plus summary totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub start_date: TripDate,
    pub end_date: TripDate,
    pub legs: Vec<ItineraryLeg>,
    /// Calendar days in `[start_date, end_date]`, both ends counted.
    pub total_duration_days: DayCount,
    /// Sum of the selected stay lengths, without transition days.
    pub total_required_days: DayCount,
    pub transition_days: DayCount,
    pub destination_count: usize,
}

impl Itinerary {
    /// Departure date of the final leg.
    pub fn last_departure(&self) -> Option<TripDate> {
        self.legs.last().map(|leg| leg.departure_date)
    }

    /// Days of the window left over after all stays and transitions.
    pub fn spare_days(&self) -> DayCount {
        self.total_duration_days
            .saturating_sub(self.total_required_days.saturating_add(self.transition_days))
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Days a set of stays consumes, including transitions between legs.
pub fn required_days(selections: &[Destination]) -> DayCount {
    sum_stay_days(selections).saturating_add(transition_days_for(selections.len()))
}

/// Sum of stay lengths, saturating at `DayCount::MAX`.
fn sum_stay_days(selections: &[Destination]) -> DayCount {
    selections
        .iter()
        .map(|d| d.duration_days)
        .fold(0, DayCount::saturating_add)
}

fn transition_days_for(leg_count: usize) -> DayCount {
    let gaps = DayCount::try_from(leg_count.saturating_sub(1)).unwrap_or(DayCount::MAX);
    gaps.saturating_mul(TRANSITION_DAYS)
}

/// Case-insensitive name collation; exact name then id break ties so the
/// order is total and reproducible.
///
/// Case folding is Unicode `to_lowercase` followed by code-point order, not
/// a locale collation: an accented initial sorts after `z` (`"Éden"` after
/// `"Zamboanga"`).
fn compare_destinations(a: &Destination, b: &Destination) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Build an itinerary from raw date-input values.
///
/// `None`, empty and unparseable dates all count as missing.
pub fn plan(
    start: Option<&str>,
    end: Option<&str>,
    selections: &[Destination],
) -> Result<Itinerary, ItineraryError> {
    let start = start.and_then(TripDate::parse);
    let end = end.and_then(TripDate::parse);
    match (start, end) {
        (Some(start), Some(end)) => plan_dates(start, end, selections),
        _ => Err(ItineraryError::MissingDates),
    }
}

/// Build an itinerary from already-parsed dates.
pub fn plan_dates(
    start: TripDate,
    end: TripDate,
    selections: &[Destination],
) -> Result<Itinerary, ItineraryError> {
    if start >= end {
        return Err(ItineraryError::InvalidRange { start, end });
    }

    if selections.is_empty() {
        return Err(ItineraryError::NoDestinationsSelected);
    }

    let available_days = start.inclusive_days(end);
    let required = required_days(selections);
    if required > available_days {
        return Err(ItineraryError::InsufficientDuration {
            required_days: required,
            available_days,
        });
    }

    let mut ordered = selections.to_vec();
    ordered.sort_by(compare_destinations);

    let mut cursor = start;
    let mut legs = Vec::with_capacity(ordered.len());
    for (index, destination) in ordered.into_iter().enumerate() {
        let arrival_date = cursor;
        let departure_date = arrival_date.add_days(destination.duration_days.saturating_sub(1));
        cursor = departure_date.add_days(1 + TRANSITION_DAYS);
        legs.push(ItineraryLeg {
            index,
            destination,
            arrival_date,
            departure_date,
        });
    }

    Ok(Itinerary {
        start_date: start,
        end_date: end,
        total_duration_days: available_days,
        total_required_days: sum_stay_days(selections),
        transition_days: transition_days_for(legs.len()),
        destination_count: legs.len(),
        legs,
    })
}
