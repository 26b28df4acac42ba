pub mod error;
pub mod event_log;
pub mod lifecycle;
pub mod parser;
pub mod request;
pub mod sink;
pub mod summary;
pub mod transcript;
pub mod validator;

pub use error::{SummaryError, USER_FACING_ERROR};
pub use event_log::EventLog;
pub use lifecycle::{LifecycleState, SummaryLifecycleController, SummaryStatus, SummaryView};
pub use request::SummaryRequestBuilder;
pub use sink::RequestSink;
pub use summary::{SummaryRecord, SummarySection};
pub use transcript::{Speaker, TranscriptReducer, TranscriptTurn};
pub use validator::SummaryLimits;
