use crate::summary::SummarySection;

/// The only failure text the presentation layer ever shows.
pub const USER_FACING_ERROR: &str =
    "We couldn't generate your session summary. Please end the session and try again.";

/// Everything that can put the summary pipeline into its failed state.
///
/// The `Display` output is diagnostic (it names sections and counts) and is meant
/// for logs and tests; users only see [`USER_FACING_ERROR`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    #[error(
        "could not extract a transcript: {malformed} malformed events exceed the tolerance of {tolerance}"
    )]
    TranscriptExtraction { malformed: usize, tolerance: usize },

    #[error("incomplete summary, short sections: {}", join_sections(.sections))]
    IncompleteSummary { sections: Vec<SummarySection> },

    #[error("summary request was not delivered: {0}")]
    RequestDelivery(String),
}

impl SummaryError {
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

fn join_sections(sections: &[SummarySection]) -> String {
    sections
        .iter()
        .map(|section| section.field())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_summary_names_every_short_section() {
        let error = SummaryError::IncompleteSummary {
            sections: vec![SummarySection::Strengths, SummarySection::OverallProgress],
        };
        assert_eq!(
            error.to_string(),
            "incomplete summary, short sections: strengths, overall_progress"
        );
        assert_eq!(error.user_message(), USER_FACING_ERROR);
    }
}
