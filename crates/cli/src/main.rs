use aggregator::{PersonAggregator, Strategy};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use swapi_client::{ClientConfig, DEFAULT_PERSON_URL};
use swapi_model::PersonInfo;
use std::time::{Duration, Instant};
use tracing::info;

/// swapi-agg - resolve a SWAPI person with its homeworld and films
#[derive(Parser, Debug)]
#[command(name = "swapi-agg")]
#[command(about = "Fetch a Star Wars character and everything it references", long_about = None)]
struct Cli {
    /// Endpoint of the person to resolve
    #[arg(long, env = "SWAPI_PERSON_URL", default_value = DEFAULT_PERSON_URL)]
    url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "SWAPI_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the person once and print the result
    Fetch {
        /// How to compose the concurrent requests (chained, sequential, stream)
        #[arg(long, default_value = "sequential")]
        strategy: Strategy,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run every strategy and check they agree
    Compare,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::default().with_timeout(Duration::from_secs(cli.timeout_secs));
    let aggregator = PersonAggregator::with_http(config, cli.url.clone())
        .context("Failed to set up HTTP client")?;

    match cli.command {
        Commands::Fetch { strategy, json } => handle_fetch(&aggregator, strategy, json).await?,
        Commands::Compare => handle_compare(&aggregator).await?,
    }

    Ok(())
}

/// Handle the 'fetch' command
async fn handle_fetch(aggregator: &PersonAggregator, strategy: Strategy, json: bool) -> Result<()> {
    info!("Resolving {} ({} strategy)", aggregator.person_url(), strategy);
    let person = aggregator
        .aggregate(strategy)
        .await
        .with_context(|| format!("Failed to resolve {}", aggregator.person_url()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&person)?);
    } else {
        print_person(&person);
    }
    Ok(())
}

/// Handle the 'compare' command
async fn handle_compare(aggregator: &PersonAggregator) -> Result<()> {
    let mut results: Vec<(Strategy, PersonInfo)> = Vec::new();

    for strategy in Strategy::ALL {
        let start = Instant::now();
        let person = aggregator
            .aggregate(strategy)
            .await
            .with_context(|| format!("{} strategy failed", strategy))?;
        println!(
            "{} {:<10} {} films in {:?}",
            "✓".green(),
            strategy.to_string(),
            person.films.len(),
            start.elapsed()
        );
        results.push((strategy, person));
    }

    let (reference_strategy, reference) = &results[0];
    for (strategy, person) in &results[1..] {
        if person != reference {
            bail!(
                "{} and {} strategies disagree:\n{:#?}\nvs\n{:#?}",
                reference_strategy,
                strategy,
                reference,
                person
            );
        }
    }

    println!("{}", "All strategies produced the same result".bold().green());
    print_person(reference);
    Ok(())
}

/// Helper function to format and print a resolved person
fn print_person(person: &PersonInfo) {
    println!("{}", person.name.bold().blue());
    println!("{}Height: {}", "• ".green(), person.height);
    println!("{}Gender: {}", "• ".green(), person.gender);
    println!("{}Homeworld: {}", "• ".green(), person.homeworld);
    println!("{}", "Films:".bold());
    for (i, film) in person.films.iter().enumerate() {
        println!(
            "  {}. {} ({}) - directed by {}",
            (i + 1).to_string().green(),
            film.title,
            film.release_date,
            film.director
        );
    }
}
