use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use classifier::BrowseMood;
use data_loader::{genre_name, Catalog};
use llm_client::LlmClient;
use server::{ChatSession, Config, MovieRecommendation, RecommendationOrchestrator};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// CineMatch - mood-based movie discovery
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Browse movies by mood and chat with a movie assistant", long_about = None)]
struct Cli {
    /// Path to the movie dataset CSV
    #[arg(short, long, default_value = "data/movies_dataset.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog, optionally filtered by mood and search text
    Browse {
        /// Mood key (see `moods`)
        #[arg(long)]
        mood: Option<BrowseMood>,

        /// Search text matched against title, overview, genres and date
        #[arg(long)]
        query: Option<String>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// List the browse moods and their genres
    Moods,

    /// Pick movies for an assistant reply, the way the chat does
    Extract {
        /// The assistant's reply text
        #[arg(long)]
        text: String,

        /// The user's message the reply answered
        #[arg(long, default_value = "")]
        query: String,

        /// Maximum number of picks
        #[arg(long, default_value = "6")]
        max: usize,

        /// Show why each movie was picked
        #[arg(long)]
        explain: bool,
    },

    /// Chat with the assistant (reads AIML_* variables from the environment)
    Chat {
        /// Completion endpoint to call instead of AIML_API_URL
        #[arg(long)]
        api_url: Option<String>,

        /// Lead each request with a catalog-aware system prompt
        #[arg(long)]
        system_prompt: bool,
    },

    /// Measure extraction latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Moods = cli.command {
        handle_moods();
        return Ok(());
    }

    println!("Loading movies from {}...", cli.data.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.data).context("Failed to load movie dataset")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    info!("Catalog loaded from {} in {:?}", cli.data.display(), start.elapsed());
    let orchestrator = Arc::new(RecommendationOrchestrator::new(catalog));

    match cli.command {
        Commands::Browse { mood, query, page } => {
            handle_browse(&orchestrator, mood, query.as_deref(), page)?
        }
        Commands::Extract {
            text,
            query,
            max,
            explain,
        } => {
            let recommendations = orchestrator.extract_recommendations(&text, &query, max);
            print_recommendations(&recommendations, explain);
        }
        Commands::Chat {
            api_url,
            system_prompt,
        } => handle_chat(orchestrator, api_url, system_prompt).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(orchestrator, requests, concurrent).await?,
        Commands::Moods => {}
    }

    Ok(())
}

fn handle_moods() {
    println!("{}", "Moods:".bold().blue());
    for mood in BrowseMood::ALL {
        let profile = mood.profile();
        let names = |ids: &[u32]| {
            ids.iter()
                .filter_map(|id| genre_name(*id))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{} ({})", mood.key().green().bold(), mood.label());
        println!("   with: {}", names(profile.positive));
        println!("   without: {}", names(profile.negative).dimmed());
    }
}

fn handle_browse(
    orchestrator: &RecommendationOrchestrator,
    mood: Option<BrowseMood>,
    query: Option<&str>,
    page: usize,
) -> Result<()> {
    let results = orchestrator.browse(mood, query, page)?;

    let heading = match mood {
        Some(mood) => format!("{} movies", mood.label()),
        None => "All movies".to_string(),
    };
    println!("{}", heading.bold().blue());

    if results.is_empty() {
        println!("No movies found.");
        return Ok(());
    }

    let offset = (results.page - 1) * pipeline::PAGE_SIZE;
    for (i, movie) in results.items.iter().enumerate() {
        let year = movie.year().map_or_else(|| "N/A".to_string(), |y| y.to_string());
        println!(
            "{}. {} ({}) [{}] - {:.1}",
            (offset + i + 1).to_string().green(),
            movie.title,
            year,
            movie.genre_names().join(", "),
            movie.vote_average
        );
    }
    println!(
        "Page {} of {} ({} movies)",
        results.page, results.total_pages, results.total
    );
    Ok(())
}

async fn handle_chat(
    orchestrator: Arc<RecommendationOrchestrator>,
    api_url: Option<String>,
    system_prompt: bool,
) -> Result<()> {
    let mut config = Config::from_env().context("Invalid AIML configuration")?;
    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }
    let client = LlmClient::new(config.llm_config()).context("Failed to build HTTP client")?;
    info!("Chat session using {} ({})", client.api_url(), client.model());
    if !client.has_api_key() {
        warn!("AIML_API_KEY is not set");
        println!(
            "{} AIML_API_KEY is not set, replies will come from the offline fallback",
            "!".yellow()
        );
    }

    let mut session = ChatSession::new(orchestrator, client);
    if system_prompt {
        session = session.with_system_prompt();
    }

    println!(
        "{}",
        "Hi! I'm CineMatch. Tell me how you're feeling and I'll find a movie. Type 'quit' to leave."
            .bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "you>".cyan().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        let Some(turn) = session.send(&line).await else {
            continue;
        };
        if let Some(error) = &turn.relay_error {
            warn!("Relay failed, showing fallback reply: {}", error);
        }

        println!("{} {}", "cinematch>".magenta().bold(), turn.reply);
        print_recommendations(&turn.recommendations, false);
    }
    info!("Chat session ended after {} messages", session.transcript().len());
    Ok(())
}

async fn handle_benchmark(
    orchestrator: Arc<RecommendationOrchestrator>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    const SAMPLES: [(&str, &str); 4] = [
        ("You might enjoy The Dark Knight or Inception.", "something exciting"),
        ("Here are a few gentle picks for tonight.", "I'm feeling sad"),
        ("Let's find something different.", "any good westerns?"),
        ("How about a classic?", "hello"),
    ];
    if requests == 0 {
        println!("Nothing to do.");
        return Ok(());
    }

    let concurrent = concurrent.max(1);
    let start = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let mut handles = Vec::with_capacity(concurrent);
    for i in 0..requests {
        let orchestrator = orchestrator.clone();
        let (text, query) = SAMPLES[i % SAMPLES.len()];
        handles.push(tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            orchestrator.extract_recommendations(text, query, 6);
            started.elapsed()
        }));
        if handles.len() == concurrent {
            for handle in handles.drain(..) {
                timings.push(handle.await.context("Benchmark task panicked")?);
            }
        }
    }
    for handle in handles {
        timings.push(handle.await.context("Benchmark task panicked")?);
    }
    let total_time = start.elapsed();

    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        requests as f32 / total_time.as_secs_f32()
    );
    Ok(())
}

fn print_recommendations(recommendations: &[MovieRecommendation], explain: bool) {
    if recommendations.is_empty() {
        return;
    }
    println!("{}", "Recommendations:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let year = rec.year.map_or_else(|| "N/A".to_string(), |y| y.to_string());
        println!(
            "{}. {} ({}) [{}] - {:.1}",
            (i + 1).to_string().green(),
            rec.title,
            year,
            rec.genres.join(", "),
            rec.vote_average
        );
        if explain {
            println!("   {} ({}, score {:.2})", rec.explanation, rec.source, rec.score);
        }
    }
}
