use clap::{Parser, Subcommand};
use fukn_weather::app::{AppState, create_app};
use fukn_weather::config::{Config, Settings};
use fukn_weather::error::AppError;
use fukn_weather::models::rating::Rating;
use fukn_weather::models::zip_code::ZipCode;
use fukn_weather::weather::Observation;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with corpus_path, default_rating and seed.
    #[arg(short, long, env = "FUKN_WEATHER_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the description corpus JSON. The bundled corpus is used when
    /// neither this nor the config file sets one.
    #[arg(long, env = "FUKN_WEATHER_CORPUS")]
    corpus: Option<PathBuf>,

    /// Seed for reproducible picks.
    #[arg(long, env = "FUKN_WEATHER_SEED")]
    seed: Option<u64>,

    /// One of G, PG, PG-13, R, X, BLAND.
    #[arg(short, long, global = true, env = "FUKN_WEATHER_RATING")]
    rating: Option<Rating>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe a temperature in degrees Fahrenheit.
    Describe {
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,

        /// Print a full JSON report for this zip code.
        #[arg(long, requires = "location")]
        zip: Option<ZipCode>,

        #[arg(long)]
        location: Option<String>,

        /// Print the report as JSON even without a zip code.
        #[arg(long)]
        json: bool,
    },
    /// Describe a random temperature once per rating.
    Random {
        #[arg(long)]
        json: bool,
    },
    /// Validate the description corpus and report coverage gaps.
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let overrides = Settings {
        corpus_path: args.corpus,
        default_rating: args.rating,
        seed: args.seed,
    };
    let config = Config::load(args.config.as_deref(), overrides)?;
    let state = create_app(&config).await?;

    match args.command {
        Command::Describe {
            temperature,
            zip,
            location,
            json,
        } => describe(&state, temperature, zip, location, json),
        Command::Random { json } => random(&state, json),
        Command::Check => check(&state),
    }
}

fn describe(
    state: &AppState,
    temperature: f64,
    zip: Option<ZipCode>,
    location: Option<String>,
    json: bool,
) -> Result<(), AppError> {
    if zip.is_none() && !json {
        println!(
            "{}",
            state.resolver.resolve(temperature, state.default_rating)
        );
        return Ok(());
    }
    let observation = Observation {
        temperature_fahrenheit: temperature,
        location: location.unwrap_or_default(),
    };
    let report = state
        .resolver
        .report(zip, observation, state.default_rating);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn random(state: &AppState, json: bool) -> Result<(), AppError> {
    let weather = state.resolver.random_weather();
    if json {
        println!("{}", serde_json::to_string_pretty(&weather)?);
    } else {
        println!("{}°F", weather.temperature_fahrenheit);
        for (rating, description) in &weather.descriptions_by_rating {
            println!("{rating}: {description}");
        }
    }
    Ok(())
}

fn check(state: &AppState) -> Result<(), AppError> {
    let corpus = state.resolver.corpus();
    for rating in Rating::ALL {
        println!(
            "{rating}: {} buckets, {} descriptions",
            corpus.bucket_count(rating),
            corpus.description_count_for(rating)
        );
    }
    println!("{} descriptions in total", corpus.description_count());
    let gaps = corpus.gaps();
    for (rating, bucket) in &gaps {
        println!("missing: {rating} {bucket}");
    }
    if gaps.is_empty() {
        Ok(())
    } else {
        Err(AppError::CorpusGaps(gaps.len()))
    }
}
