use serde::{Deserialize, Serialize};
use std::fmt;

/// The four sections of a coaching summary, in the order the model is asked to write them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySection {
    Strengths,
    AreasForImprovement,
    PersonalizedSuggestions,
    OverallProgress,
}

impl SummarySection {
    pub const ALL: [SummarySection; 4] = [
        SummarySection::Strengths,
        SummarySection::AreasForImprovement,
        SummarySection::PersonalizedSuggestions,
        SummarySection::OverallProgress,
    ];

    /// The sections written as `- ` bullet lists.
    pub const BULLETED: [SummarySection; 3] = [
        SummarySection::Strengths,
        SummarySection::AreasForImprovement,
        SummarySection::PersonalizedSuggestions,
    ];

    /// The literal header that opens the section in the model's reply.
    pub fn header(self) -> &'static str {
        match self {
            SummarySection::Strengths => "STRENGTHS:",
            SummarySection::AreasForImprovement => "AREAS FOR IMPROVEMENT:",
            SummarySection::PersonalizedSuggestions => "PERSONALIZED SUGGESTIONS:",
            SummarySection::OverallProgress => "OVERALL PROGRESS:",
        }
    }

    /// The record field the section fills.
    pub fn field(self) -> &'static str {
        match self {
            SummarySection::Strengths => "strengths",
            SummarySection::AreasForImprovement => "areas_for_improvement",
            SummarySection::PersonalizedSuggestions => "personalized_suggestions",
            SummarySection::OverallProgress => "overall_progress",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SummarySection::Strengths => "Your Strengths",
            SummarySection::AreasForImprovement => "Areas for Growth",
            SummarySection::PersonalizedSuggestions => "Personalized Suggestions",
            SummarySection::OverallProgress => "Overall Progress",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SummarySection::Strengths => "💪",
            SummarySection::AreasForImprovement => "🎯",
            SummarySection::PersonalizedSuggestions => "💡",
            SummarySection::OverallProgress => "📈",
        }
    }

    /// Finds the section whose header opens `block`. Matching is exact: case and
    /// punctuation must agree.
    pub fn from_header(block: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| block.starts_with(section.header()))
    }

    pub fn is_bulleted(self) -> bool {
        self != SummarySection::OverallProgress
    }
}

impl fmt::Display for SummarySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// The structured result of a coaching session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub personalized_suggestions: Vec<String>,
    pub overall_progress: String,
}

impl SummaryRecord {
    /// The bullets of a section. `OverallProgress` is prose and has none.
    pub fn items(&self, section: SummarySection) -> &[String] {
        match section {
            SummarySection::Strengths => &self.strengths,
            SummarySection::AreasForImprovement => &self.areas_for_improvement,
            SummarySection::PersonalizedSuggestions => &self.personalized_suggestions,
            SummarySection::OverallProgress => &[],
        }
    }

    pub(crate) fn items_mut(&mut self, section: SummarySection) -> Option<&mut Vec<String>> {
        match section {
            SummarySection::Strengths => Some(&mut self.strengths),
            SummarySection::AreasForImprovement => Some(&mut self.areas_for_improvement),
            SummarySection::PersonalizedSuggestions => Some(&mut self.personalized_suggestions),
            SummarySection::OverallProgress => None,
        }
    }
}

// Writes the canonical layout the parser reads back.
impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in SummarySection::BULLETED {
            writeln!(f, "{}", section.header())?;
            for item in self.items(section) {
                writeln!(f, "- {item}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", SummarySection::OverallProgress.header())?;
        f.write_str(&self.overall_progress)
    }
}
