mod config;
mod error;
mod fetch;
mod notion;
mod parser;
mod sync;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::notion::NotionClient;
use crate::parser::Lecture;

#[derive(Parser)]
#[command(name = "lecture_sync", about = "Open-lectures schedule → Notion database sync")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and parse the schedule, print the records without writing
    Preview {
        /// Max records to display (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Fetch, parse, and push every lecture to the Notion database
    Sync {
        /// Max records to push (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let result = match cli.command {
        Commands::Preview { limit } => {
            let lectures = load_lectures(&config, limit).await?;
            if lectures.is_empty() {
                println!("No lectures found on the schedule page.");
                return Ok(());
            }
            print_preview(&lectures);
            Ok(())
        }
        Commands::Sync { limit } => {
            let lectures = load_lectures(&config, limit).await?;
            if lectures.is_empty() {
                println!("No lectures found on the schedule page. Nothing to push.");
                return Ok(());
            }
            println!("Pushing {} lectures to Notion...", lectures.len());
            let client = NotionClient::new(&config.notion)?;
            let stats = sync::push_lectures(&client, &lectures).await?;
            println!(
                "Done: {} pushed ({} ok, {} errors).",
                stats.total, stats.ok, stats.errors
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Fetch the page and run the full extraction pipeline. A fatal parse or
/// track-assignment error surfaces here, before anything is written.
async fn load_lectures(config: &Config, limit: Option<usize>) -> anyhow::Result<Vec<Lecture>> {
    let html = fetch::fetch_schedule(&config.fetch).await?;
    let mut lectures = parser::process_schedule(&html, &config.schedule)?;
    if let Some(limit) = limit {
        lectures.truncate(limit);
    }
    Ok(lectures)
}

fn print_preview(lectures: &[Lecture]) {
    println!(
        "{:>3} | {:<10} | {:<26} | {:<36} | {:<24} | {}",
        "#", "Date", "Track(s)", "Title", "Speakers", "Video"
    );
    println!("{}", "-".repeat(120));

    for (i, l) in lectures.iter().enumerate() {
        let tracks = truncate(&l.tracks.join(", "), 26);
        let title = truncate(&l.title, 36);
        let speakers = truncate(&l.speakers.join(", "), 24);
        let video = l.link.as_deref().unwrap_or("-");
        println!(
            "{:>3} | {:<10} | {:<26} | {:<36} | {:<24} | {}",
            i + 1,
            l.date,
            tracks,
            title,
            speakers,
            video
        );
    }

    println!("\n{} lectures", lectures.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
