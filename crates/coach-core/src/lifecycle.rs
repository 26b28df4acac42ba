use crate::error::{SummaryError, USER_FACING_ERROR};
use crate::event_log::EventLog;
use crate::parser;
use crate::request::SummaryRequestBuilder;
use crate::sink::RequestSink;
use crate::summary::SummaryRecord;
use crate::transcript::{self, TranscriptReducer};
use crate::validator::SummaryLimits;
use coach_realtime_types::ServerEvent;
use coach_realtime_types::events::server::ResponseDoneEvent;
use serde::Serialize;

/// Where summary generation stands for the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    Idle,
    Generating,
    Ready(SummaryRecord),
    Failed(SummaryError),
}

impl LifecycleState {
    pub fn status(&self) -> SummaryStatus {
        match self {
            LifecycleState::Idle => SummaryStatus::Idle,
            LifecycleState::Generating => SummaryStatus::Generating,
            LifecycleState::Ready(_) => SummaryStatus::Ready,
            LifecycleState::Failed(_) => SummaryStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStatus {
    Idle,
    Generating,
    Ready,
    Failed,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub status: SummaryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<SummaryRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl From<&LifecycleState> for SummaryView {
    fn from(state: &LifecycleState) -> Self {
        Self {
            status: state.status(),
            record: match state {
                LifecycleState::Ready(record) => Some(record.clone()),
                _ => None,
            },
            error_message: match state {
                LifecycleState::Failed(_) => Some(USER_FACING_ERROR.to_string()),
                _ => None,
            },
        }
    }
}

/// Drives summary generation from event log snapshots.
///
/// Every call to [`observe`](Self::observe) looks only at the events appended since
/// the previous call, oldest first:
///
/// * `session.ended` while `Idle`: reduce the transcript, send one summary request,
///   move to `Generating`.
/// * `response.done` with text while `Generating`: parse and validate the reply,
///   move to `Ready` or `Failed`.
/// * `response.done` while `Idle` is a stale reply from before a reset and is ignored.
/// * `session.created` starts a new session and resets to `Idle`.
///
/// [`session_inactive`](Self::session_inactive) resets to `Idle` from any state.
pub struct SummaryLifecycleController<S: RequestSink> {
    state: LifecycleState,
    sink: S,
    reducer: TranscriptReducer,
    requests: SummaryRequestBuilder,
    limits: SummaryLimits,
    // Number of log entries already observed.
    seen: usize,
}

impl<S: RequestSink> SummaryLifecycleController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: LifecycleState::Idle,
            sink,
            reducer: TranscriptReducer::default(),
            requests: SummaryRequestBuilder::default(),
            limits: SummaryLimits::default(),
            seen: 0,
        }
    }

    pub fn with_reducer(mut self, reducer: TranscriptReducer) -> Self {
        self.reducer = reducer;
        self
    }

    pub fn with_request_builder(mut self, requests: SummaryRequestBuilder) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_limits(mut self, limits: SummaryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn view(&self) -> SummaryView {
        SummaryView::from(&self.state)
    }

    pub fn is_generating(&self) -> bool {
        self.state == LifecycleState::Generating
    }

    /// Reacts to a new snapshot of the session's event log.
    pub fn observe(&mut self, log: &EventLog) -> SummaryView {
        if log.len() < self.seen {
            tracing::debug!(
                "event log shrank from {} to {} entries, reading it as a new log",
                self.seen,
                log.len()
            );
            self.seen = 0;
        }

        let unseen = log.len() - self.seen;
        let mut fresh: Vec<_> = log.iter().take(unseen).cloned().collect();
        fresh.reverse();
        self.seen = log.len();

        for raw in &fresh {
            match transcript::decode_event(raw) {
                Ok(event) => self.on_event(event, log),
                Err(reason) => tracing::debug!("ignoring unreadable event: {}", reason),
            }
        }

        self.view()
    }

    /// The session went inactive: drop whatever is held and return to `Idle`.
    pub fn session_inactive(&mut self) {
        if self.state != LifecycleState::Idle {
            tracing::info!(
                "session inactive, discarding {:?} summary state",
                self.state.status()
            );
        }
        self.state = LifecycleState::Idle;
    }

    fn on_event(&mut self, event: ServerEvent, log: &EventLog) {
        match event {
            ServerEvent::SessionCreated(_) => {
                if self.state != LifecycleState::Idle {
                    tracing::info!("new session created, resetting summary state");
                }
                self.state = LifecycleState::Idle;
            }
            ServerEvent::SessionEnded(_) if self.state == LifecycleState::Idle => {
                self.request_summary(log);
            }
            ServerEvent::SessionEnded(_) => {
                tracing::debug!(
                    "session.ended while {:?}, no new summary requested",
                    self.state.status()
                );
            }
            ServerEvent::ResponseDone(done) if self.is_generating() => self.complete(&done),
            ServerEvent::ResponseDone(_) if self.state == LifecycleState::Idle => {
                tracing::debug!("ignoring response.done observed while idle");
            }
            _ => {}
        }
    }

    fn request_summary(&mut self, log: &EventLog) {
        let transcript = match self.reducer.reduce(log) {
            Ok(transcript) => transcript,
            Err(error) => return self.fail(error),
        };

        tracing::info!(
            "session ended, requesting a summary of {} transcript turns",
            transcript.len()
        );
        let request = self.requests.build(&transcript);
        match self.sink.send_request(request) {
            Ok(()) => self.state = LifecycleState::Generating,
            Err(e) => self.fail(SummaryError::RequestDelivery(e.to_string())),
        }
    }

    fn complete(&mut self, done: &ResponseDoneEvent) {
        let fragments: Vec<&str> = done
            .response()
            .output
            .iter()
            .flat_map(|output| output.text_fragments())
            .collect();
        if fragments.is_empty() {
            tracing::debug!("response.done carried no text, still waiting for the summary");
            return;
        }

        // Fragments may split one section across entries; keep their lines intact.
        let record = parser::parse(&fragments.join("\n"));
        match self.limits.validate(record) {
            Ok(record) => {
                tracing::info!("session summary ready");
                self.state = LifecycleState::Ready(record);
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: SummaryError) {
        tracing::warn!("summary generation failed: {}", error);
        self.state = LifecycleState::Failed(error);
    }
}
