//! Planner session: the state behind one visit to the planner page.
//!
//! Search-box input is debounced; checkbox, slider and button actions apply
//! immediately. Every filter pass is published as
//! [`SessionEvent::ResultsUpdated`].

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use wayfarer_core::catalog::{Catalog, Destination, Region, Theme};
use wayfarer_core::error::CoreError;
use wayfarer_core::export;
use wayfarer_core::filter::{
    filter, rank_by_relevance, DurationRange, FilterCriteria, FilterOutcome,
};
use wayfarer_core::itinerary::{plan, Itinerary, ItineraryError};
use wayfarer_core::selection::{SelectionChange, SelectionState};
use wayfarer_core::types::DestinationId;

use crate::bus::{SessionBus, SessionEvent};
use crate::config::PlannerConfig;
use crate::debounce::Debouncer;

/// Run one filter pass and publish its outcome.
fn run_filter(catalog: &Catalog, criteria: &FilterCriteria, bus: &SessionBus) -> FilterOutcome {
    let outcome = filter(catalog, criteria);
    tracing::debug!(
        matches = outcome.len(),
        total = outcome.total,
        search = %criteria.search_term,
        "Filter recomputed",
    );
    bus.publish(SessionEvent::ResultsUpdated {
        outcome: outcome.clone(),
    });
    outcome
}

pub struct PlannerSession {
    catalog: Arc<Catalog>,
    /// Latest criteria; read by the debounced search at fire time.
    criteria: Arc<watch::Sender<FilterCriteria>>,
    initial_criteria: FilterCriteria,
    selection: SelectionState,
    bus: Arc<SessionBus>,
    debouncer: Debouncer,
    last_itinerary: Option<Itinerary>,
}

impl PlannerSession {
    pub fn new(catalog: Catalog, config: &PlannerConfig) -> Self {
        let initial_criteria =
            FilterCriteria::new().with_duration_range(config.initial_duration_range);
        let (criteria, _) = watch::channel(initial_criteria.clone());
        Self {
            catalog: Arc::new(catalog),
            criteria: Arc::new(criteria),
            initial_criteria,
            selection: SelectionState::new(),
            bus: Arc::new(SessionBus::default()),
            debouncer: Debouncer::new(config.search_debounce),
            last_itinerary: None,
        }
    }

    /// Publish on a shared bus instead of a private one.
    pub fn with_bus(mut self, bus: Arc<SessionBus>) -> Self {
        self.bus = bus;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.bus.subscribe()
    }

    /// Observe criteria changes as they happen (before any debounce).
    pub fn watch_criteria(&self) -> watch::Receiver<FilterCriteria> {
        self.criteria.subscribe()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.borrow().clone()
    }

    /// Filter with the current criteria without publishing.
    pub fn results(&self) -> FilterOutcome {
        filter(&self.catalog, &self.criteria.borrow())
    }

    /// Current results ordered best match first for the search term.
    ///
    /// Without a term every score is zero and catalog order is kept.
    pub fn best_matches(&self) -> Vec<Destination> {
        let criteria = self.criteria.borrow();
        let outcome = filter(&self.catalog, &criteria);
        rank_by_relevance(&outcome.matches, &criteria.search_term)
    }

    /// Filter now and publish, e.g. for the initial render.
    pub fn refresh(&mut self) -> FilterOutcome {
        self.debouncer.cancel();
        let current = self.criteria();
        run_filter(&self.catalog, &current, &self.bus)
    }

    // -- filter controls -----------------------------------------------------

    /// Record a keystroke in the search box; results follow after the quiet
    /// period.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_search_term(&mut self, raw: &str) {
        self.criteria.send_modify(|c| c.set_search_term(raw));

        let catalog = Arc::clone(&self.catalog);
        let criteria = Arc::clone(&self.criteria);
        let bus = Arc::clone(&self.bus);
        self.debouncer.schedule(move || {
            let current = criteria.borrow().clone();
            run_filter(&catalog, &current, &bus);
        });
    }

    /// True while a typed search term is waiting to be applied.
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn clear_search(&mut self) -> FilterOutcome {
        self.criteria.send_modify(|c| c.search_term.clear());
        self.refresh()
    }

    pub fn toggle_region(&mut self, region: Region) -> FilterOutcome {
        self.criteria.send_modify(|c| {
            c.toggle_region(region);
        });
        self.refresh()
    }

    pub fn toggle_theme(&mut self, theme: Theme) -> FilterOutcome {
        self.criteria.send_modify(|c| {
            c.toggle_theme(theme);
        });
        self.refresh()
    }

    pub fn set_duration_range(&mut self, range: DurationRange) -> FilterOutcome {
        self.criteria.send_modify(|c| c.duration_range = range);
        self.refresh()
    }

    /// Restore the criteria the session started with.
    pub fn reset_filters(&mut self) -> FilterOutcome {
        self.criteria.send_replace(self.initial_criteria.clone());
        self.refresh()
    }

    // -- selection -----------------------------------------------------------

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Toggle a catalog destination in or out of the selection.
    pub fn toggle_destination(&mut self, id: DestinationId) -> Result<SelectionChange, CoreError> {
        let destination = self.catalog.require(id)?;
        let change = self.selection.toggle(destination);
        tracing::debug!(destination_id = id, ?change, selected = self.selection.len(), "Selection toggled");

        self.bus.publish(SessionEvent::SelectionChanged {
            destination_id: id,
            change,
            selected: self.selection.ids(),
        });
        Ok(change)
    }

    /// Deselect everything, publishing one `Removed` change per destination.
    pub fn clear_selection(&mut self) {
        for id in self.selection.ids() {
            self.selection.remove(id);
            self.bus.publish(SessionEvent::SelectionChanged {
                destination_id: id,
                change: SelectionChange::Removed,
                selected: self.selection.ids(),
            });
        }
        tracing::debug!("Selection cleared");
    }

    // -- itinerary -----------------------------------------------------------

    /// Build an itinerary for the current selection.
    ///
    /// A rejected request also discards the previous itinerary, so there is
    /// nothing to export until a plan succeeds again.
    pub fn generate_itinerary(
        &mut self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Itinerary, ItineraryError> {
        match plan(start, end, self.selection.destinations()) {
            Ok(itinerary) => {
                tracing::info!(
                    destinations = itinerary.destination_count,
                    total_days = itinerary.total_duration_days,
                    required_days = itinerary.total_required_days,
                    start = %itinerary.start_date,
                    end = %itinerary.end_date,
                    "Itinerary generated",
                );
                self.last_itinerary = Some(itinerary.clone());
                self.bus.publish(SessionEvent::ItineraryGenerated {
                    itinerary: itinerary.clone(),
                });
                Ok(itinerary)
            }
            Err(error) => {
                tracing::warn!(?error, "Itinerary rejected");
                self.last_itinerary = None;
                self.bus.publish(SessionEvent::ItineraryRejected {
                    message: error.to_string(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    pub fn last_itinerary(&self) -> Option<&Itinerary> {
        self.last_itinerary.as_ref()
    }

    /// Export payload of the last successful itinerary, if any.
    pub fn export_json(&self) -> Result<Option<String>, CoreError> {
        self.last_itinerary
            .as_ref()
            .map(export::export_json)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::time::{sleep, Instant};

    use super::*;

    fn session() -> PlannerSession {
        PlannerSession::new(Catalog::builtin(), &PlannerConfig::default())
    }

    fn ids(outcome: &FilterOutcome) -> Vec<DestinationId> {
        outcome.matches.iter().map(|d| d.id).collect()
    }

    // -- filtering -----------------------------------------------------------

    #[test]
    fn starts_with_full_catalog_under_slider_default() {
        let session = session();
        assert_eq!(session.criteria().duration_range, DurationRange::SLIDER_DEFAULT);
        assert_eq!(session.results().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn typed_search_is_debounced() {
        let mut session = session();
        let mut rx = session.subscribe();

        session.set_search_term("b");
        sleep(Duration::from_millis(100)).await;
        session.set_search_term("be");
        sleep(Duration::from_millis(100)).await;
        session.set_search_term("Beach");
        let last_keystroke = Instant::now();
        assert!(session.has_pending_search());

        let event = rx.recv().await.expect("results event");
        assert!(last_keystroke.elapsed() >= Duration::from_millis(300));
        assert_matches!(event, SessionEvent::ResultsUpdated { ref outcome } if ids(outcome) == vec![2, 3, 5]);
        assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn checkbox_applies_immediately_with_pending_term() {
        let mut session = session();
        let mut rx = session.subscribe();

        session.set_search_term("island");
        let outcome = session.toggle_region(Region::Visayas);
        assert_eq!(ids(&outcome), vec![2, 3]);
        assert!(!session.has_pending_search());

        sleep(Duration::from_secs(1)).await;
        assert_matches!(rx.try_recv(), Ok(SessionEvent::ResultsUpdated { .. }));
        assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_search_restores_results() {
        let mut session = session();
        session.set_search_term("coron");
        sleep(Duration::from_millis(400)).await;
        assert_eq!(ids(&session.results()), vec![7]);

        let outcome = session.clear_search();
        assert_eq!(outcome.len(), 10);
        assert!(session.criteria().search_term.is_empty());
    }

    #[tokio::test]
    async fn best_matches_rank_by_relevance() {
        let mut session = session();
        let unranked: Vec<_> = session.best_matches().iter().map(|d| d.id).collect();
        assert_eq!(unranked, (1..=10).collect::<Vec<_>>());

        session.set_search_term("City");
        assert_eq!(ids(&session.results()), vec![1, 6, 8, 9]);
        let ranked: Vec<_> = session.best_matches().iter().map(|d| d.id).collect();
        assert_eq!(ranked, vec![6, 9, 1, 8]);
    }

    #[test]
    fn reset_restores_initial_criteria() {
        let mut session = session();
        session.toggle_theme(Theme::Diving);
        session.set_duration_range(DurationRange::new(5, 5));
        assert!(session.results().is_empty());

        let outcome = session.reset_filters();
        assert_eq!(outcome.len(), 10);
        assert_eq!(session.criteria(), FilterCriteria::new().with_duration_range(DurationRange::SLIDER_DEFAULT));
    }

    #[test]
    fn criteria_watchers_see_changes() {
        let mut session = session();
        let rx = session.watch_criteria();
        session.toggle_region(Region::Mindanao);
        assert!(rx.borrow().regions.contains(&Region::Mindanao));
    }

    // -- selection -----------------------------------------------------------

    #[test]
    fn toggle_destination_publishes_selection() {
        let mut session = session();
        let mut rx = session.subscribe();

        assert_eq!(session.toggle_destination(4).expect("toggle"), SelectionChange::Added);
        assert_eq!(session.toggle_destination(9).expect("toggle"), SelectionChange::Added);
        assert_eq!(session.toggle_destination(4).expect("toggle"), SelectionChange::Removed);
        assert_eq!(session.selection().ids(), vec![9]);

        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            last = Some(event);
        }
        assert_matches!(
            last,
            Some(SessionEvent::SelectionChanged { destination_id: 4, change: SelectionChange::Removed, ref selected }) if selected == &vec![9]
        );
    }

    #[test]
    fn clear_selection_publishes_removals() {
        let mut session = session();
        session.toggle_destination(3).expect("Boracay");
        session.toggle_destination(8).expect("Vigan");
        let mut rx = session.subscribe();

        session.clear_selection();
        assert!(session.selection().is_empty());

        let removed: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|event| match event {
                SessionEvent::SelectionChanged {
                    destination_id,
                    change: SelectionChange::Removed,
                    selected,
                } => (destination_id, selected),
                other => panic!("unexpected event: {other:?}"),
            })
            .collect();
        assert_eq!(removed, vec![(3, vec![8]), (8, vec![])]);
    }

    #[test]
    fn unknown_destination_is_not_found() {
        let mut session = session();
        assert_matches!(
            session.toggle_destination(99),
            Err(CoreError::NotFound { entity: "destination", id: 99 })
        );
        assert!(session.selection().is_empty());
    }

    // -- itinerary -----------------------------------------------------------

    #[test]
    fn generate_and_export() {
        let mut session = session();
        session.toggle_destination(2).expect("Bohol");
        session.toggle_destination(1).expect("Baguio");

        let itinerary = session
            .generate_itinerary(Some("2025-01-01"), Some("2025-01-06"))
            .expect("fits");
        assert_eq!(itinerary.legs[0].destination.id, 1);

        let json = session.export_json().expect("serialize").expect("payload");
        assert!(json.contains("\"startDate\": \"January 4, 2025\""));
    }

    #[test]
    fn rejection_clears_export_and_publishes_message() {
        let mut session = session();
        let mut rx = session.subscribe();
        session.toggle_destination(5).expect("El Nido");
        session
            .generate_itinerary(Some("2025-01-01"), Some("2025-01-10"))
            .expect("fits");
        assert!(session.export_json().expect("serialize").is_some());

        let err = session
            .generate_itinerary(Some("2025-01-01"), Some("2025-01-03"))
            .unwrap_err();
        assert_eq!(
            err,
            ItineraryError::InsufficientDuration {
                required_days: 5,
                available_days: 3,
            }
        );
        assert!(session.last_itinerary().is_none());
        assert!(session.export_json().expect("serialize").is_none());

        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            last = Some(event);
        }
        assert_matches!(
            last,
            Some(SessionEvent::ItineraryRejected { ref message, .. }) if message.contains("require 5 days")
        );
    }

    #[test]
    fn generate_without_selection() {
        let mut session = session();
        assert_eq!(
            session.generate_itinerary(Some("2025-01-01"), Some("2025-01-06")),
            Err(ItineraryError::NoDestinationsSelected)
        );
    }
}
