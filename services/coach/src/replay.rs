//! Feeds a recorded session through the summary controller.
//!
//! A recording is a JSON-lines file: one realtime event per line, oldest first,
//! the way a transport would have appended them to the session log.

use anyhow::{Context, Result};
use coach_core::{
    EventLog, RequestSink, SummaryLifecycleController, SummaryRecord, SummarySection,
    SummaryStatus, SummaryView,
};
use serde_json::Value;
use std::io::BufRead;

/// Reads a recording. Blank lines are skipped; a line that is not JSON at all is an error.
pub fn read_recording(reader: impl BufRead) -> Result<Vec<Value>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read recording line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line)
            .with_context(|| format!("Recording line {} is not valid JSON", index + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// Appends each event to a fresh log and lets the controller observe every snapshot.
/// With `end_session`, a `session.ended` marker follows the recording.
pub fn replay<S: RequestSink>(
    controller: &mut SummaryLifecycleController<S>,
    events: Vec<Value>,
    end_session: bool,
) -> SummaryView {
    let mut log = EventLog::new();
    let marker = end_session.then(EventLog::session_ended);
    let mut status = controller.view().status;

    for event in events.into_iter().chain(marker) {
        log.push(event);
        let view = controller.observe(&log);
        if view.status != status {
            tracing::debug!(
                "summary status {:?} -> {:?} after event #{}",
                status,
                view.status,
                log.len()
            );
            status = view.status;
        }
    }

    tracing::info!("replayed {} events", log.len());
    controller.view()
}

/// Human-readable rendering of a view: the summary when ready, the status otherwise.
pub fn render_view(view: &SummaryView) -> String {
    match (&view.record, &view.error_message) {
        (Some(record), _) => render_summary(record),
        (None, Some(message)) => format!("Summary failed: {}\n", message),
        (None, None) => match view.status {
            SummaryStatus::Generating => "Summary is still being generated.\n".to_string(),
            _ => "No summary yet. End the session to request one.\n".to_string(),
        },
    }
}

pub fn render_summary(record: &SummaryRecord) -> String {
    let mut out = String::new();
    for section in SummarySection::ALL {
        out.push_str(&format!("{} {}\n", section.icon(), section.title()));
        if section.is_bulleted() {
            for item in record.items(section) {
                out.push_str(&format!("  • {}\n", item));
            }
        } else {
            out.push_str(&format!("  {}\n", record.overall_progress));
        }
        out.push('\n');
    }
    out
}
