use crate::error::SummaryError;
use crate::summary::{SummaryRecord, SummarySection};

/// Completeness thresholds a parsed summary has to meet before it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    /// Minimum number of bullets in each bulleted section.
    pub min_section_items: usize,
    /// `overall_progress` must be strictly longer than this many characters.
    pub progress_longer_than: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            min_section_items: 2,
            progress_longer_than: 20,
        }
    }
}

impl SummaryLimits {
    /// Every section of `record` that falls short, in canonical section order.
    pub fn short_sections(&self, record: &SummaryRecord) -> Vec<SummarySection> {
        SummarySection::ALL
            .into_iter()
            .filter(|&section| match section {
                SummarySection::OverallProgress => {
                    record.overall_progress.chars().count() <= self.progress_longer_than
                }
                bulleted => record.items(bulleted).len() < self.min_section_items,
            })
            .collect()
    }

    pub fn validate(&self, record: SummaryRecord) -> Result<SummaryRecord, SummaryError> {
        let sections = self.short_sections(&record);
        if sections.is_empty() {
            Ok(record)
        } else {
            Err(SummaryError::IncompleteSummary { sections })
        }
    }
}

/// Validates against the default limits.
pub fn validate(record: SummaryRecord) -> Result<SummaryRecord, SummaryError> {
    SummaryLimits::default().validate(record)
}
