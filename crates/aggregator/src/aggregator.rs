//! # Person Aggregator
//!
//! This module resolves one person and everything it references:
//! 1. Fetch the person
//! 2. Read the homeworld URL and the film URLs out of it
//! 3. Fetch the homeworld and every film concurrently
//! 4. Fold everything into a single `PersonInfo`
//!
//! The first failing request aborts the whole run. Dropping the joined
//! future drops every sibling request still in flight, so nothing keeps
//! running after an error.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{self, TryFutureExt};
use futures::stream::{FuturesUnordered, TryStreamExt};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use swapi_client::{fetch_entity, ClientConfig, HttpFetcher, ResourceFetcher};
use swapi_model::{Film, Person, PersonInfo, Planet, Result};

use crate::strategy::Strategy;

/// Fetches a person and its referenced homeworld and films.
#[derive(Clone)]
pub struct PersonAggregator {
    fetcher: Arc<dyn ResourceFetcher>,
    person_url: String,
}

impl PersonAggregator {
    /// Create an aggregator around any fetcher
    ///
    /// # Arguments
    /// * `fetcher` - Performs the actual GET requests
    /// * `person_url` - Endpoint of the person to resolve (e.g., "https://swapi.dev/api/people/1")
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, person_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            person_url: person_url.into(),
        }
    }

    /// Create an aggregator backed by a real HTTP client
    pub fn with_http(config: ClientConfig, person_url: impl Into<String>) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), person_url))
    }

    pub fn person_url(&self) -> &str {
        &self.person_url
    }

    /// Resolve the configured person.
    pub async fn aggregate(&self, strategy: Strategy) -> Result<PersonInfo> {
        self.aggregate_url(&self.person_url, strategy).await
    }

    /// Resolve the person at `url`.
    ///
    /// Issues exactly `2 + films` requests on success. Repeated film URLs
    /// are fetched once per occurrence.
    #[instrument(skip(self, strategy), fields(strategy = %strategy))]
    pub async fn aggregate_url(&self, url: &str, strategy: Strategy) -> Result<PersonInfo> {
        let start_time = Instant::now();

        let result = match strategy {
            Strategy::Chained => self.aggregate_chained(url).await,
            Strategy::Sequential => self.aggregate_sequential(url).await,
            Strategy::Stream => self.aggregate_stream(url).await,
        };

        let elapsed = start_time.elapsed();
        match &result {
            Ok(info) => info!(
                "Aggregated {} ({} films) in {:.2?}",
                info.name,
                info.films.len(),
                elapsed
            ),
            Err(e) => error!("Aggregation of {} failed after {:.2?}: {}", url, elapsed, e),
        }
        result
    }

    /// Combinator chain: person, then a joined homeworld + films future.
    async fn aggregate_chained(&self, url: &str) -> Result<PersonInfo> {
        let fetcher = self.fetcher.as_ref();

        fetch_entity::<Person>(fetcher, url)
            .and_then(move |person| {
                log_fan_out(&person);
                let homeworld = fetch_owned::<Planet>(fetcher, person.homeworld.clone());
                let film_urls = person.films.clone();
                let films = async move { fetch_films(fetcher, &film_urls).await };
                future::try_join(homeworld, films)
                    .map_ok(move |(planet, films)| assemble(person, planet, films))
            })
            .await
    }

    /// Step by step with `.await`, fan-out via `try_join!`.
    async fn aggregate_sequential(&self, url: &str) -> Result<PersonInfo> {
        let fetcher = self.fetcher.as_ref();

        let person: Person = fetch_entity(fetcher, url).await?;
        log_fan_out(&person);

        let (planet, films) = tokio::try_join!(
            fetch_entity::<Planet>(fetcher, &person.homeworld),
            fetch_films(fetcher, &person.films)
        )?;

        Ok(assemble(person, planet, films))
    }

    /// Films as a stream of keyed results, joined with the homeworld fetch.
    ///
    /// Films complete in any order; each carries its index so the list can
    /// be put back in reference order once every fetch is in.
    async fn aggregate_stream(&self, url: &str) -> Result<PersonInfo> {
        let fetcher = self.fetcher.as_ref();

        let person: Person = fetch_entity(fetcher, url).await?;
        log_fan_out(&person);

        let films = person
            .films
            .iter()
            .enumerate()
            .map(|(index, film_url)| {
                fetch_entity::<Film>(fetcher, film_url).map_ok(move |film| (index, film))
            })
            .collect::<FuturesUnordered<_>>()
            .try_collect::<Vec<_>>();
        let homeworld = fetch_entity::<Planet>(fetcher, &person.homeworld);

        let (planet, mut keyed_films) = future::try_join(homeworld, films).await?;
        keyed_films.sort_unstable_by_key(|(index, _)| *index);
        let films = keyed_films.into_iter().map(|(_, film)| film).collect();

        Ok(assemble(person, planet, films))
    }
}

/// Fold a person and its resolved references into the flat result.
///
/// `films` must be in the same order as `person.films`.
pub fn assemble(person: Person, homeworld: Planet, films: Vec<Film>) -> PersonInfo {
    PersonInfo {
        name: person.name,
        height: person.height,
        gender: person.gender,
        homeworld: homeworld.name,
        films: films.into_iter().map(Into::into).collect(),
    }
}

/// Fetch every film concurrently and return them in reference order.
///
/// Results are collected as they finish, so the earliest failure in time
/// is the one reported, whatever its position in the list.
async fn fetch_films(fetcher: &dyn ResourceFetcher, film_urls: &[String]) -> Result<Vec<Film>> {
    let mut keyed_films: Vec<(usize, Film)> = film_urls
        .iter()
        .enumerate()
        .map(|(index, film_url)| {
            fetch_entity::<Film>(fetcher, film_url).map_ok(move |film| (index, film))
        })
        .collect::<FuturesUnordered<_>>()
        .try_collect()
        .await?;
    keyed_films.sort_unstable_by_key(|(index, _)| *index);
    Ok(keyed_films.into_iter().map(|(_, film)| film).collect())
}

async fn fetch_owned<T: DeserializeOwned>(
    fetcher: &dyn ResourceFetcher,
    url: String,
) -> Result<T> {
    fetch_entity(fetcher, &url).await
}

fn log_fan_out(person: &Person) {
    debug!(
        "Fetched person {}, fanning out to homeworld + {} films",
        person.name,
        person.films.len()
    );
}
