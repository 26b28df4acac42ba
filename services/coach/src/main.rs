use anyhow::{Context, Result};
use clap::Parser;
use coach_core::{SummaryLifecycleController, SummaryRequestBuilder, TranscriptReducer};
use coach_realtime_types::ClientEvent;
use coach_service::config::Config;
use coach_service::{prompt_loader, replay};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Replays a recorded coaching session and prints its summary.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Recorded session events, one JSON object per line, oldest first
    recording: PathBuf,

    /// Directory of prompt overrides (overrides COACH_PROMPTS_DIR)
    #[arg(long)]
    prompts: Option<PathBuf>,

    /// Print the summary view as JSON
    #[arg(long)]
    json: bool,

    /// Append a session.ended marker after the recording
    #[arg(long)]
    end_session: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    tracing::info!("Configuration loaded successfully. Starting coach service...");

    // --- 3. Parse Command-Line Arguments ---
    let args = Cli::parse();

    // --- 4. Load Prompts ---
    let prompts_dir = args.prompts.unwrap_or(config.prompts_dir);
    let prompts = if prompts_dir.is_dir() {
        prompt_loader::load_prompts(&prompts_dir).context("Failed to load prompts")?
    } else {
        tracing::info!(
            "No prompts directory at {}, using the built-in summary prompt.",
            prompts_dir.display()
        );
        HashMap::new()
    };
    let mut requests = SummaryRequestBuilder::new();
    if let Some(template) = prompt_loader::summary_template(&prompts)? {
        tracing::info!("Using summary prompt from {}.", prompts_dir.display());
        requests = requests.with_template(template);
    }

    // --- 5. Outbound Requests ---
    // Stands in for the realtime transport: every request the controller emits is logged.
    let (request_tx, mut request_rx) =
        tokio::sync::mpsc::channel::<ClientEvent>(config.channel_capacity);
    let request_handler = tokio::spawn(async move {
        while let Some(event) = request_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(wire) => tracing::info!("REQUEST SENT: {}", wire),
                Err(e) => tracing::error!("Failed to serialize outbound event: {}", e),
            }
        }
    });

    // --- 6. Summary Controller ---
    let mut reducer = TranscriptReducer::new();
    if let Some(tolerance) = config.max_malformed_events {
        reducer = reducer.with_max_malformed(tolerance);
    }
    let mut controller = SummaryLifecycleController::new(request_tx)
        .with_reducer(reducer)
        .with_request_builder(requests)
        .with_limits(config.limits);

    // --- 7. Replay ---
    let file = File::open(&args.recording)
        .with_context(|| format!("Failed to open recording: {}", args.recording.display()))?;
    let events = replay::read_recording(BufReader::new(file))?;
    tracing::info!("Replaying {} recorded events...", events.len());
    let view = replay::replay(&mut controller, events, args.end_session);

    // Closing the sender lets the request handler drain and finish.
    drop(controller);
    request_handler
        .await
        .context("Request handler task failed")?;

    // --- 8. Output ---
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize summary view")?
        );
    } else {
        print!("{}", replay::render_view(&view));
    }

    tracing::info!("Shutting down...");
    Ok(())
}
