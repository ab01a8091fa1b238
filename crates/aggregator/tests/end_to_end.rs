//! End-to-end tests for the aggregator.
//!
//! These tests run every strategy against a local HTTP server that mimics
//! SWAPI, going through the real reqwest-backed fetcher.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aggregator::{PersonAggregator, Strategy};
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use swapi_client::ClientConfig;
use swapi_model::{FilmInfo, Gender, PersonInfo, SwapiError};
use tokio::net::TcpListener;

#[derive(Default)]
struct MockApi {
    routes: HashMap<String, (StatusCode, String)>,
    hits: AtomicUsize,
}

async fn respond(State(api): State<Arc<MockApi>>, uri: Uri) -> (StatusCode, String) {
    api.hits.fetch_add(1, Ordering::SeqCst);
    api.routes
        .get(uri.path())
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, r#"{"detail":"Not found"}"#.to_string()))
}

/// Bind first so the bodies can embed the server's own URLs
async fn start_mock_swapi(
    build_routes: impl FnOnce(&str) -> Vec<(String, StatusCode, String)>,
) -> (String, Arc<MockApi>, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock SWAPI");
    let base = format!("http://{}", listener.local_addr().expect("no local address"));

    let api = Arc::new(MockApi {
        routes: build_routes(&base)
            .into_iter()
            .map(|(path, status, body)| (path, (status, body)))
            .collect(),
        hits: AtomicUsize::new(0),
    });
    let app = Router::new().fallback(respond).with_state(api.clone());

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock SWAPI failed");
    });

    (base, api, handle)
}

fn luke_routes(base: &str) -> Vec<(String, StatusCode, String)> {
    let person = serde_json::json!({
        "name": "Luke Skywalker",
        "height": "172",
        "mass": "77",
        "hair_color": "blond",
        "gender": "male",
        "homeworld": format!("{}/planets/1/", base),
        "films": [format!("{}/films/1/", base), format!("{}/films/2/", base)],
    });
    let planet = serde_json::json!({ "name": "Tatooine", "population": "200000" });
    let film_1 = serde_json::json!({
        "title": "A New Hope",
        "episode_id": 4,
        "director": "George Lucas",
        "release_date": "1977-05-25",
    });
    let film_2 = serde_json::json!({
        "title": "The Empire Strikes Back",
        "episode_id": 5,
        "director": "Irvin Kershner",
        "release_date": "1980-05-17",
    });

    vec![
        ("/people/1/".to_string(), StatusCode::OK, person.to_string()),
        ("/planets/1/".to_string(), StatusCode::OK, planet.to_string()),
        ("/films/1/".to_string(), StatusCode::OK, film_1.to_string()),
        ("/films/2/".to_string(), StatusCode::OK, film_2.to_string()),
    ]
}

fn expected_luke() -> PersonInfo {
    PersonInfo {
        name: "Luke Skywalker".to_string(),
        height: "172".to_string(),
        gender: Gender::Male,
        homeworld: "Tatooine".to_string(),
        films: vec![
            FilmInfo {
                title: "A New Hope".to_string(),
                director: "George Lucas".to_string(),
                release_date: "1977-05-25".to_string(),
            },
            FilmInfo {
                title: "The Empire Strikes Back".to_string(),
                director: "Irvin Kershner".to_string(),
                release_date: "1980-05-17".to_string(),
            },
        ],
    }
}

fn test_config() -> ClientConfig {
    ClientConfig::default().with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_luke_skywalker_over_http() {
    let (base, api, handle) = start_mock_swapi(luke_routes).await;
    let aggregator = PersonAggregator::with_http(test_config(), format!("{}/people/1/", base))
        .expect("Failed to build aggregator");

    for strategy in Strategy::ALL {
        let info = aggregator.aggregate(strategy).await.expect("aggregate failed");
        assert_eq!(info, expected_luke(), "strategy {}", strategy);
    }

    // 2 + 2 films per run
    assert_eq!(api.hits.load(Ordering::SeqCst), 3 * 4);

    handle.abort();
}

#[tokio::test]
async fn test_luke_skywalker_json_output() {
    let (base, _, handle) = start_mock_swapi(luke_routes).await;
    let aggregator = PersonAggregator::with_http(test_config(), format!("{}/people/1/", base))
        .expect("Failed to build aggregator");

    let info = aggregator
        .aggregate(Strategy::Stream)
        .await
        .expect("aggregate failed");

    assert_eq!(
        serde_json::to_value(&info).unwrap(),
        serde_json::json!({
            "name": "Luke Skywalker",
            "height": "172",
            "gender": "male",
            "homeworld": "Tatooine",
            "films": [
                {"title": "A New Hope", "director": "George Lucas", "release_date": "1977-05-25"},
                {"title": "The Empire Strikes Back", "director": "Irvin Kershner", "release_date": "1980-05-17"}
            ]
        })
    );

    handle.abort();
}

#[tokio::test]
async fn test_missing_person_fails_without_fan_out() {
    let (base, api, handle) = start_mock_swapi(luke_routes).await;
    let url = format!("{}/people/9999/", base);
    let aggregator =
        PersonAggregator::with_http(test_config(), url.clone()).expect("Failed to build aggregator");

    for strategy in Strategy::ALL {
        let err = aggregator.aggregate(strategy).await.unwrap_err();
        assert_eq!(
            err,
            SwapiError::status(url.clone(), 404, "Not Found"),
            "strategy {}",
            strategy
        );
    }
    assert_eq!(api.hits.load(Ordering::SeqCst), 3);

    handle.abort();
}

#[tokio::test]
async fn test_broken_film_fails_the_whole_aggregation() {
    let (base, _, handle) = start_mock_swapi(|base| {
        let mut routes = luke_routes(base);
        routes.retain(|(path, _, _)| path != "/films/2/");
        routes.push((
            "/films/2/".to_string(),
            StatusCode::OK,
            r#"{"title": "The Empire Strikes Back"}"#.to_string(),
        ));
        routes
    })
    .await;
    let aggregator = PersonAggregator::with_http(test_config(), format!("{}/people/1/", base))
        .expect("Failed to build aggregator");

    for strategy in Strategy::ALL {
        let err = aggregator.aggregate(strategy).await.unwrap_err();
        assert!(err.is_decode(), "strategy {}", strategy);
        assert_eq!(err.url(), format!("{}/films/2/", base));
    }

    handle.abort();
}
