//! Integration tests for [`PlannerSession`] driven through its event stream.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use tokio::time::sleep;
use wayfarer_core::catalog::{Catalog, Region};
use wayfarer_core::filter::DurationRange;
use wayfarer_core::selection::SelectionChange;
use wayfarer_session::{PlannerConfig, PlannerSession, SessionBus, SessionEvent};

fn config(debounce_ms: u64) -> PlannerConfig {
    PlannerConfig {
        search_debounce: Duration::from_millis(debounce_ms),
        ..PlannerConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Test: a full visit
// ---------------------------------------------------------------------------

/// Search, pick from the results, plan, and export; the renderer sees one
/// event per visible change, in order.
#[tokio::test(start_paused = true)]
async fn search_select_plan_export() {
    let mut session = PlannerSession::new(Catalog::builtin(), &config(300));
    let mut rx = session.subscribe();

    session.set_search_term("pala");
    session.set_search_term("palawan");
    let results = match rx.recv().await.expect("results") {
        SessionEvent::ResultsUpdated { outcome } => outcome,
        other => panic!("unexpected event: {other:?}"),
    };
    let ids: Vec<_> = results.matches.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![5, 7]);

    for id in ids {
        assert_eq!(session.toggle_destination(id).expect("toggle"), SelectionChange::Added);
        assert_matches!(
            rx.recv().await.expect("selection"),
            SessionEvent::SelectionChanged { destination_id, .. } if destination_id == id
        );
    }

    let itinerary = session
        .generate_itinerary(Some("2025-05-01"), Some("2025-05-10"))
        .expect("5 + 4 + 1 fits in 10");
    assert_eq!(itinerary.legs[0].destination.name, "Coron, Palawan");
    assert_eq!(itinerary.spare_days(), 0);
    assert_matches!(
        rx.recv().await.expect("itinerary"),
        SessionEvent::ItineraryGenerated { .. }
    );

    let json = session.export_json().expect("serialize").expect("payload");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[1]["destination"], "El Nido, Palawan");
    assert_eq!(parsed[1]["startDate"], "May 6, 2025");
    assert_eq!(parsed[1]["endDate"], "May 10, 2025");
}

// ---------------------------------------------------------------------------
// Test: configuration
// ---------------------------------------------------------------------------

/// A configured initial duration range applies from the first render and
/// survives a reset.
#[tokio::test]
async fn configured_initial_range_is_the_reset_target() {
    let config = PlannerConfig {
        initial_duration_range: DurationRange::new(3, 4),
        ..PlannerConfig::default()
    };
    let mut session = PlannerSession::new(Catalog::builtin(), &config);
    assert_eq!(session.refresh().len(), 6);

    session.set_duration_range(DurationRange::UNBOUNDED);
    assert_eq!(session.results().len(), 10);

    assert_eq!(session.reset_filters().len(), 6);
}

/// The debounce delay comes from config.
#[tokio::test(start_paused = true)]
async fn custom_debounce_delay() {
    let mut session = PlannerSession::new(Catalog::builtin(), &config(50));
    let mut rx = session.subscribe();

    session.set_search_term("surf");
    sleep(Duration::from_millis(60)).await;
    assert_matches!(
        rx.try_recv(),
        Ok(SessionEvent::ResultsUpdated { ref outcome }) if outcome.len() == 1
    );
}

// ---------------------------------------------------------------------------
// Test: shared bus
// ---------------------------------------------------------------------------

/// Sessions can publish on a bus owned by the caller.
#[tokio::test]
async fn shared_bus_receives_session_events() {
    let bus = Arc::new(SessionBus::default());
    let mut rx = bus.subscribe();
    let mut session =
        PlannerSession::new(Catalog::builtin(), &PlannerConfig::default()).with_bus(Arc::clone(&bus));

    let outcome = session.toggle_region(Region::Mindanao);
    assert_eq!(outcome.summary(), "Showing 2 of 10 destinations");
    assert_matches!(
        rx.recv().await.expect("event"),
        SessionEvent::ResultsUpdated { outcome } if outcome.len() == 2
    );
}
