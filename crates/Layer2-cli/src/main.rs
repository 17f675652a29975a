//! TokMeter CLI - Main entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokmeter_core::{models_by_family, TokenCalculator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// TokMeter - token counting for LLM models from the terminal
#[derive(Parser, Debug)]
#[command(name = "tokmeter")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Text to count tokens for
    text: Option<String>,

    /// Read the text from a file instead of the argument
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Model to count for
    #[arg(short, long, default_value = "gpt-4")]
    model: String,

    /// Skip markdown preprocessing and tokenize the text as-is
    #[arg(long)]
    raw: bool,

    /// Print the full result record as JSON
    #[arg(short, long)]
    detailed: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported models grouped by backend family
    Models,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Some(Command::Models) = args.command {
        return list_models_cmd();
    }

    let text = match (&args.file, &args.text) {
        (Some(path), _) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?,
        (None, Some(text)) => text.clone(),
        (None, None) => {
            anyhow::bail!("no text provided; pass it as an argument or use --file <PATH>")
        }
    };

    tracing::debug!(model = %args.model, raw = args.raw, "counting tokens");

    let calculator = TokenCalculator::new(!args.raw);

    if args.detailed {
        let result = calculator.count_detailed(&text, &args.model)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let count = calculator.count(&text, &args.model)?;
        println!("{count}");
    }

    Ok(())
}

/// List supported models grouped by backend family
fn list_models_cmd() -> anyhow::Result<()> {
    println!("\nSupported models\n");
    println!("{:<28} {:<12}", "Model", "Family");
    println!("{}", "-".repeat(40));

    for (family, models) in models_by_family() {
        for model in models {
            println!("{:<28} {:<12}", model, family.to_string());
        }
    }

    println!("\nExact models count locally; approximate models use the");
    println!("Anthropic counting API when ANTHROPIC_API_KEY is set, or a");
    println!("heuristic estimate otherwise.\n");

    Ok(())
}
