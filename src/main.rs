use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use padelscout::config::PadelScoutConfig;
use padelscout::geocode::{Geocoder, OpenMeteoGeocoder};
use padelscout::tournament::{
    SearchCriteria, SearchSession, SortKey, TenUpClient, TenUpQuery,
};
use padelscout::PadelScoutError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(app_err) = err.downcast_ref::<PadelScoutError>() {
                eprintln!("{}", app_err.user_message());
            } else {
                eprintln!("{err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = PadelScoutConfig::load().with_context(|| "Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(place) = args.next() else {
        eprintln!("Usage: padelscout <place> [radius_km] [query]");
        return Err(PadelScoutError::validation("missing place argument").into());
    };
    let radius_km: u32 = match args.next() {
        Some(raw) => raw
            .parse()
            .map_err(|_| PadelScoutError::validation(format!("invalid radius '{raw}'")))?,
        None => config.defaults.radius_km,
    };
    let text_query = args.next();

    let geocoder = OpenMeteoGeocoder::new(&config);
    let place = geocoder.geocode(&place).await?;
    println!(
        "Searching tournaments within {radius_km}km of {} ({:.4}, {:.4})",
        place.display_name, place.coordinates.latitude, place.coordinates.longitude
    );

    let client = TenUpClient::new(&config);
    let mut session = SearchSession::new();
    let generation = session.begin_search();

    let query = TenUpQuery {
        center: place.coordinates,
        radius_km,
        date_start: None,
        date_end: None,
        level_code: None,
    };
    let batch = client
        .search(&query)
        .await
        .map_err(PadelScoutError::from)?;
    session.install(generation, batch);

    let criteria = SearchCriteria {
        text_query,
        center: Some(place.coordinates),
        radius_km: Some(f64::from(radius_km)),
        ..Default::default()
    };
    let Some(outcome) = session.view(&criteria, SortKey::Date) else {
        // Unreachable once install succeeded; keep the initial-state wording
        println!("No search has completed yet.");
        return Ok(());
    };

    println!(
        "{} of {} tournaments match:",
        outcome.matched, outcome.total
    );
    for tournament in outcome.results.iter().take(config.defaults.max_results as usize) {
        let title = tournament.title.as_deref().unwrap_or("(untitled)");
        let club = tournament.club_name.as_deref().unwrap_or("-");
        let when = tournament
            .dates
            .start
            .map(|d| d.to_string())
            .unwrap_or_else(|| "date unknown".to_string());
        let distance = tournament.resolved_distance_km(Some(place.coordinates));
        if distance.is_finite() {
            println!("  - {title} | {club} | {when} | {distance:.1} km");
        } else {
            println!("  - {title} | {club} | {when}");
        }
    }

    if !outcome.timeline.is_empty() {
        println!("Timeline:");
        for bucket in &outcome.timeline {
            println!(
                "  {} ({} tournament{}) at {:.2}",
                bucket.day,
                bucket.count,
                if bucket.count == 1 { "" } else { "s" },
                bucket.position
            );
        }
    }

    Ok(())
}
