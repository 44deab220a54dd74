//! `wayfarer-app` -- command-line walk through one planner visit.
//!
//! Applies filters, selects destinations, generates an itinerary and prints
//! the export payload, with session events rendered as they arrive.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default          | Description                           |
//! |--------------------------|----------|------------------|---------------------------------------|
//! | `WAYFARER_SEARCH`        | no       | --               | Free-text search term                 |
//! | `WAYFARER_REGIONS`       | no       | --               | Comma-separated regions, e.g. `Luzon,Palawan` |
//! | `WAYFARER_THEMES`        | no       | --               | Comma-separated themes                |
//! | `WAYFARER_DESTINATIONS`  | no       | all results      | Comma-separated destination ids       |
//! | `WAYFARER_START`         | no       | today            | Trip start, `YYYY-MM-DD`              |
//! | `WAYFARER_END`           | no       | tightest fit     | Trip end, `YYYY-MM-DD`                |
//! | `WAYFARER_EMAIL`         | no       | --               | Register this email before planning   |
//! | `WAYFARER_USERNAME`      | no       | `traveler`       | Username for the registration         |
//! | `WAYFARER_PASSWORD`      | no       | --               | Password for the registration         |
//!
//! Session tuning (`WAYFARER_SEARCH_DEBOUNCE_MS` etc.) is read by
//! [`PlannerConfig::from_env`].

use std::time::Duration;

use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wayfarer_accounts::{MemoryStore, RegisterRequest, UserManager};
use wayfarer_core::catalog::{Catalog, Region, Theme};
use wayfarer_core::dashboard::{builtin_stats, popularity_ranking};
use wayfarer_core::dates::TripDate;
use wayfarer_core::export::export_file_name;
use wayfarer_core::itinerary::required_days;
use wayfarer_core::types::DestinationId;
use wayfarer_session::{PlannerConfig, PlannerSession, SessionEvent};

/// Extra wait after the debounce delay before reading search results.
const SEARCH_SETTLE: Duration = Duration::from_millis(50);

/// Comma-separated list from the environment; unset or blank yields nothing.
fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn render(event: &SessionEvent) {
    match event {
        SessionEvent::ResultsUpdated { outcome } => {
            println!("{}", outcome.summary());
            for destination in &outcome.matches {
                println!(
                    "  [{}] {} ({}, {} days) {}",
                    destination.id,
                    destination.name,
                    destination.region,
                    destination.duration_days,
                    destination.theme_labels(),
                );
            }
        }
        SessionEvent::SelectionChanged {
            destination_id,
            change,
            selected,
        } => {
            println!("Selection {change:?}: {destination_id} -> {selected:?}");
        }
        SessionEvent::ItineraryGenerated { itinerary } => {
            println!(
                "Itinerary: {} to {} ({} days, {} destinations)",
                itinerary.start_date.readable(),
                itinerary.end_date.readable(),
                itinerary.total_duration_days,
                itinerary.destination_count,
            );
            for leg in &itinerary.legs {
                println!(
                    "  {}. {}: {} - {}",
                    leg.ordinal(),
                    leg.destination.name,
                    leg.arrival_date.readable(),
                    leg.departure_date.readable(),
                );
            }
        }
        SessionEvent::ItineraryRejected { message, .. } => {
            println!("Cannot generate itinerary: {message}");
        }
    }
}

fn register_visitor(config: &PlannerConfig) -> anyhow::Result<()> {
    let Some(email) = env_value("WAYFARER_EMAIL") else {
        return Ok(());
    };
    let username = env_value("WAYFARER_USERNAME").unwrap_or_else(|| "traveler".to_string());
    let password = env_value("WAYFARER_PASSWORD").unwrap_or_default();

    let users =
        UserManager::new(MemoryStore::new()).with_min_password_length(config.min_password_length);
    let result = users
        .register(RegisterRequest::new(username, email, password))
        .context("Registration failed")?;
    println!("{}", result.message);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer_app=info,wayfarer_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = PlannerConfig::from_env();
    tracing::info!(
        debounce_ms = u64::try_from(config.search_debounce.as_millis()).unwrap_or(u64::MAX),
        min_duration = config.initial_duration_range.min,
        max_duration = config.initial_duration_range.max,
        "Loaded planner configuration",
    );

    register_visitor(&config)?;

    // --- Session + renderer ---
    let mut session = PlannerSession::new(Catalog::builtin(), &config);
    let mut events = session.subscribe();
    let renderer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => render(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Renderer lagged behind session events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    session.refresh();

    // --- Filters ---
    for raw in env_list("WAYFARER_REGIONS") {
        let region: Region = raw.parse()?;
        session.toggle_region(region);
    }
    for raw in env_list("WAYFARER_THEMES") {
        let theme: Theme = raw.parse()?;
        session.toggle_theme(theme);
    }
    if let Some(term) = env_value("WAYFARER_SEARCH") {
        session.set_search_term(&term);
        tokio::time::sleep(config.search_debounce + SEARCH_SETTLE).await;

        println!("Best matches for '{term}':");
        for destination in session.best_matches().iter().take(3) {
            println!("  [{}] {}", destination.id, destination.name);
        }
    }

    // --- Selection ---
    let picks: Vec<DestinationId> = match env_value("WAYFARER_DESTINATIONS") {
        Some(_) => env_list("WAYFARER_DESTINATIONS")
            .iter()
            .map(|raw| {
                raw.parse::<DestinationId>()
                    .with_context(|| format!("Invalid destination id '{raw}'"))
            })
            .collect::<anyhow::Result<_>>()?,
        None => session.results().matches.iter().map(|d| d.id).collect(),
    };
    for id in picks {
        session.toggle_destination(id)?;
    }

    // --- Itinerary ---
    let today = TripDate::from(chrono::Local::now().date_naive());
    let start = env_value("WAYFARER_START").unwrap_or_else(|| today.to_string());
    let end = env_value("WAYFARER_END").unwrap_or_else(|| {
        let fit = required_days(session.selection().destinations()).max(2);
        TripDate::parse(&start)
            .unwrap_or(today)
            .add_days(fit - 1)
            .to_string()
    });

    if session
        .generate_itinerary(Some(start.as_str()), Some(end.as_str()))
        .is_ok()
    {
        if let Some(json) = session.export_json()? {
            println!("{}", export_file_name(today));
            println!("{json}");
        }
    }

    // --- Dashboard ---
    println!("Most visited:");
    for entry in popularity_ranking(session.catalog(), &builtin_stats())
        .iter()
        .take(3)
    {
        println!("  {} ({})", entry.name, entry.visitors);
    }

    drop(session);
    renderer.await.context("Renderer task failed")?;

    Ok(())
}
