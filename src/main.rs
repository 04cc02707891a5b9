//! moodjournal CLI
//!
//! Usage:
//!   moodjournal --text "your entry here"      # Single analysis
//!   moodjournal --interactive                 # Analyze line by line
//!   moodjournal --serve                       # HTTP API server
//!   moodjournal --text "entry" --json         # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use moodjournal::config::Config;
use moodjournal::core::{run_server, GeminiClient, Journal, MoodAnalyzer, MoodParser};
use moodjournal::types::{AnalysisOutput, AnalysisResult, Mood};
use moodjournal::{ANALYSIS_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_MODEL, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "moodjournal",
    version = VERSION,
    about = "Journal with automatic mood tagging",
    long_about = "moodjournal tags journal entries with a primary mood and six\n\
                  mood-intensity scores produced by a Gemini completion.\n\n\
                  Modes:\n  \
                  --text         Analyze one entry\n  \
                  --interactive  Analyze entries line by line\n  \
                  --serve        HTTP API server mode\n\n\
                  When analysis fails the entry is tagged neutral with all\n\
                  scores at 0.5."
)]
struct Args {
    /// Text to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read entries from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Gemini REST base url
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Analysis timeout in seconds
    #[arg(long, default_value_t = ANALYSIS_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Fall back to neutral when the model answers with an unknown mood
    #[arg(long)]
    strict_moods: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show score breakdown
    #[arg(long)]
    verbose: bool,
}

/// Run mode selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Serve,
    Interactive,
    Single,
}

impl Args {
    /// `--serve` wins, then `--interactive`, then `--text`; interactive otherwise
    fn mode(&self) -> Mode {
        if self.serve {
            Mode::Serve
        } else if self.interactive {
            Mode::Interactive
        } else if self.text.is_some() {
            Mode::Single
        } else {
            Mode::Interactive
        }
    }

    fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            strict_moods: self.strict_moods,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = args.config();
    if !config.has_api_key() {
        warn!("GEMINI_API_KEY is not set; every analysis will fall back to neutral");
    }

    let analyzer = match build_analyzer(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Failed to set up analyzer: {}", e);
            std::process::exit(1);
        }
    };

    match (args.mode(), args.text.as_deref()) {
        (Mode::Serve, _) => run_serve(&args, analyzer).await,
        (Mode::Single, Some(text)) => run_single(text, &args, &analyzer).await,
        _ => run_interactive(&args, &analyzer).await,
    }
}

/// Gemini-backed analyzer for the configuration
fn build_analyzer(config: &Config) -> Result<MoodAnalyzer, moodjournal::core::CompletionError> {
    let client = GeminiClient::new(config)?;
    Ok(MoodAnalyzer::new(Arc::new(client))
        .with_parser(MoodParser::with_strict(config.strict_moods))
        .with_timeout(config.timeout))
}

/// Analyze one text
async fn run_single(text: &str, args: &Args, analyzer: &MoodAnalyzer) {
    if text.trim().is_empty() {
        eprintln!("Please enter some content for your journal entry.");
        std::process::exit(2);
    }
    let result = analyzer.analyze(text).await;
    print_result(&result, args);
}

/// Analyze entries line by line
async fn run_interactive(args: &Args, analyzer: &MoodAnalyzer) {
    print_header("Interactive", args.no_color);
    println!("Type a journal entry and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut analyzed = 0usize;

    loop {
        print!("{} ", "entry>".bold());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Entries analyzed: {}", analyzed);
            break;
        }
        if line.is_empty() {
            continue;
        }

        let result = analyzer.analyze(line).await;
        analyzed += 1;
        print_result(&result, args);
    }
}

/// Print a result in the selected format
fn print_result(result: &AnalysisResult, args: &Args) {
    let output = AnalysisOutput::new(result);
    if args.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize output: {}", e),
        }
    } else if args.verbose {
        print_verbose(&output);
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let title = format!("moodjournal v{} - {}", VERSION, mode);
    println!("========================================");
    if no_color {
        println!("  {}", title);
    } else {
        println!("  {}", title.bold());
    }
    println!("========================================");
    println!();
}

/// Print score breakdown
fn print_verbose(output: &AnalysisOutput) {
    let color = Mood::color_for_label(&output.primary_mood);
    println!("{}", "┌─────────────────────────────────────".color(color));
    println!("{} Primary mood: {}", "│".color(color), output.primary_mood.color(color).bold());
    println!("{}", "├─────────────────────────────────────".color(color));
    for (key, value) in output.mood_scores.iter() {
        let filled = (value.clamp(0.0, 1.0) * 20.0).round() as usize;
        println!(
            "{}   {:<10} {:.2} {}",
            "│".color(color),
            key,
            value,
            "█".repeat(filled).color(color)
        );
    }
    println!("{}", "├─────────────────────────────────────".color(color));
    println!("{} Reason: {}", "│".color(color), output.reason);
    if output.fallback {
        println!("{} {}", "│".color(color), "analysis unavailable, tagged neutral".dimmed());
    }
    println!("{}", "└─────────────────────────────────────".color(color));
}

/// Run HTTP API server
async fn run_serve(args: &Args, analyzer: MoodAnalyzer) {
    print_header("API Server", args.no_color);
    println!("  POST   /analyze       - Analyze text");
    println!("  GET    /entries       - List entries (?mood=)");
    println!("  POST   /entries       - Create entry");
    println!("  GET    /entries/:id   - Get entry");
    println!("  PUT    /entries/:id   - Edit entry");
    println!("  DELETE /entries/:id   - Delete entry");
    println!("  GET    /moods         - Mood counts");
    println!("  GET    /health        - Health check");
    println!();

    if let Err(e) = run_server(&args.addr, Journal::new(analyzer)).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
