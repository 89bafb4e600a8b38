//! End-to-end tests for the aggregation pipeline: raw JSON batch in,
//! filtered/sorted list and timeline buckets out.

use chrono::NaiveDate;

use padelscout::tournament::{
    Coordinates, RawTournament, SearchCriteria, SearchSession, SortKey,
};

const PARIS: Coordinates = Coordinates {
    latitude: 48.8566,
    longitude: 2.3522,
};

fn sample_batch() -> Vec<RawTournament> {
    let json = r#"[
        {
            "originalId": "101", "code": "SPR",
            "libelle": "Open de Printemps", "club": "Padel Club Versailles",
            "ville": "Versailles", "codePostal": "78000",
            "lat": 48.8049, "lng": 2.1204,
            "dateDebut": {"date": "2024-06-10"}, "dateFin": {"date": "2024-06-12"},
            "epreuves": [{"categorie": {"code": "P100"}, "nature": "H"}],
            "inscriptionEnLigne": "true"
        },
        {
            "originalId": "101", "code": "SPR",
            "libelle": "Open de Printemps (doublon)"
        },
        {
            "originalId": "102", "code": "ETE",
            "libelle": "Été Padel Tour", "club": "Lyon Padel",
            "ville": "Lyon", "codePostal": "69003",
            "lat": 45.7640, "lng": 4.8357,
            "dateDebut": "2024-06-10",
            "epreuves": [{"categorie": "P250", "nature": {"code": "DM"}}]
        },
        {
            "originalId": "103", "code": "AUT",
            "libelle": "Automne Indoor", "club": "Paris Padel",
            "ville": "Paris", "codePostal": "75012",
            "distance": "4 km",
            "dateDebut": "2024-06-20",
            "epreuves": [{"categorie": {"code": "P100"}}]
        },
        {
            "originalId": "104", "code": "SD",
            "libelle": "Tournoi sans date", "ville": "Paris"
        }
    ]"#;
    serde_json::from_str(json).unwrap()
}

fn searched_session() -> SearchSession {
    let mut session = SearchSession::new();
    let generation = session.begin_search();
    assert!(session.install(generation, sample_batch()));
    session
}

#[test]
fn full_pipeline_dedups_filters_sorts_and_buckets() {
    let session = searched_session();

    let criteria = SearchCriteria {
        center: Some(PARIS),
        max_distance_km: Some(100.0),
        ..Default::default()
    };
    let outcome = session.view(&criteria, SortKey::Distance).unwrap();

    // 5 raw records, one duplicate dropped
    assert_eq!(outcome.total, 4);
    // Lyon is ~392km away; the dateless Paris record has no venue
    // coordinates and no hint, so its distance is infinite
    assert_eq!(outcome.matched, 2);

    let titles: Vec<&str> = outcome
        .results
        .iter()
        .map(|t| t.title.as_deref().unwrap())
        .collect();
    // Automne's 4km hint is ignored in favor of the geodesic rule only when
    // venue coordinates exist; without them the hint applies
    assert_eq!(titles, vec!["Automne Indoor", "Open de Printemps"]);

    // Timeline covers exactly the distinct start days of the survivors
    let days: Vec<NaiveDate> = outcome.timeline.iter().map(|b| b.day).collect();
    assert_eq!(
        days,
        vec![
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
        ]
    );
    let counted: usize = outcome.timeline.iter().map(|b| b.count).sum();
    assert_eq!(counted, 2);
    assert_eq!(outcome.timeline[0].position, 0.0);
    assert_eq!(outcome.timeline[1].position, 1.0);
}

#[test]
fn title_sort_applies_french_collation() {
    let session = searched_session();
    let outcome = session.view(&SearchCriteria::default(), SortKey::Title).unwrap();

    let titles: Vec<&str> = outcome
        .results
        .iter()
        .map(|t| t.title.as_deref().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Automne Indoor",
            "Été Padel Tour",
            "Open de Printemps",
            "Tournoi sans date",
        ]
    );
}

#[test]
fn adding_constraints_never_grows_the_result_set() {
    let session = searched_session();

    let base = SearchCriteria {
        center: Some(PARIS),
        ..Default::default()
    };
    let narrowed = SearchCriteria {
        center: Some(PARIS),
        level_code: Some("P100".to_string()),
        date_start: Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
        ..Default::default()
    };

    let base_ids: Vec<String> = session
        .view(&base, SortKey::Date)
        .unwrap()
        .results
        .iter()
        .map(|t| t.identity.clone())
        .collect();
    let narrowed_ids: Vec<String> = session
        .view(&narrowed, SortKey::Date)
        .unwrap()
        .results
        .iter()
        .map(|t| t.identity.clone())
        .collect();

    assert!(narrowed_ids.len() <= base_ids.len());
    assert!(narrowed_ids.iter().all(|id| base_ids.contains(id)));
    // The dateless record passes the date bound (permissive policy) but
    // fails the level constraint
    assert_eq!(narrowed_ids, vec!["103|AUT".to_string()]);
}

#[test]
fn event_type_matches_either_dimension() {
    let session = searched_session();

    let by_nature = SearchCriteria {
        event_type_code: Some("DM".to_string()),
        ..Default::default()
    };
    let outcome = session.view(&by_nature, SortKey::Date).unwrap();
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.results[0].identity, "102|ETE");
}

#[test]
fn dateless_records_survive_filters_but_skip_the_timeline() {
    let session = searched_session();

    let criteria = SearchCriteria {
        date_start: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        date_end: Some(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()),
        ..Default::default()
    };
    let outcome = session.view(&criteria, SortKey::Date).unwrap();

    assert!(outcome
        .results
        .iter()
        .any(|t| t.identity == "104|SD"));
    let bucketed: usize = outcome.timeline.iter().map(|b| b.count).sum();
    assert_eq!(bucketed, outcome.matched - 1);
}

#[test]
fn criteria_changes_recompute_from_the_same_snapshot() {
    let session = searched_session();

    let all = session.view(&SearchCriteria::default(), SortKey::Date).unwrap();
    let some = session
        .view(
            &SearchCriteria {
                text_query: Some("paris".to_string()),
                ..Default::default()
            },
            SortKey::Date,
        )
        .unwrap();

    assert_eq!(all.total, some.total);
    assert!(some.matched < all.matched);
    // The earlier outcome is untouched by the later recomputation
    assert_eq!(all.matched, 4);
}
