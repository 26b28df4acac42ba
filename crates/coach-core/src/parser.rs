//! Reads the model's free-text summary back into a [`SummaryRecord`].
//!
//! The reply layout is a convention the prompt asks for, not a schema. The parser
//! is therefore strict about the four headers and forgiving about everything
//! else: unknown blocks are skipped, missing sections stay empty, and no input
//! makes it fail. Deciding whether the result is good enough is the validator's job.

use crate::summary::{SummaryRecord, SummarySection};

/// Parses a raw reply into a possibly incomplete record.
pub fn parse(raw: &str) -> SummaryRecord {
    let mut record = SummaryRecord::default();

    for block in blocks(raw) {
        let Some(section) = SummarySection::from_header(&block) else {
            tracing::debug!(
                "ignoring summary block without a known header: {:?}",
                block.lines().next().unwrap_or_default()
            );
            continue;
        };

        let body = &block[section.header().len()..];
        match record.items_mut(section) {
            Some(items) => items.extend(bullets(body)),
            None => {
                if record.overall_progress.is_empty() {
                    record.overall_progress = body.trim().to_string();
                }
            }
        }
    }

    record
}

// Splits on runs of blank (whitespace-only) lines, trimming each block and dropping empties.
fn blocks(raw: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            push_block(&mut blocks, &mut current);
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, &mut current);

    blocks
}

fn push_block(blocks: &mut Vec<String>, lines: &mut Vec<&str>) {
    let block = lines.join("\n");
    lines.clear();
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_string());
    }
}

fn bullets(body: &str) -> impl Iterator<Item = String> + '_ {
    body.lines()
        .filter_map(|line| line.trim_start().strip_prefix('-'))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;

    const WELL_FORMED: &str = "STRENGTHS:
- Stayed calm
- Listened actively

AREAS FOR IMPROVEMENT:
- Interrupted once
- Avoided eye contact

PERSONALIZED SUGGESTIONS:
- Pause before responding
- Practice reflective listening

OVERALL PROGRESS:
You showed steady improvement in staying composed during disagreement.";

    fn expected() -> SummaryRecord {
        SummaryRecord {
            strengths: vec!["Stayed calm".into(), "Listened actively".into()],
            areas_for_improvement: vec!["Interrupted once".into(), "Avoided eye contact".into()],
            personalized_suggestions: vec![
                "Pause before responding".into(),
                "Practice reflective listening".into(),
            ],
            overall_progress:
                "You showed steady improvement in staying composed during disagreement.".into(),
        }
    }

    #[test]
    fn test_parses_the_reference_reply() {
        let record = parse(WELL_FORMED);

        assert_eq!(record, expected());
        assert_eq!(validate(record), Ok(expected()));
    }

    #[test]
    fn test_single_improvement_bullet_fails_validation_on_that_section() {
        let raw = WELL_FORMED.replace("- Avoided eye contact\n", "");

        let record = parse(&raw);

        assert_eq!(record.areas_for_improvement, vec!["Interrupted once"]);
        assert_eq!(
            validate(record),
            Err(crate::SummaryError::IncompleteSummary {
                sections: vec![SummarySection::AreasForImprovement],
            })
        );
    }

    #[test]
    fn test_canonical_text_parses_back_to_the_same_record() {
        let record = expected();

        assert_eq!(parse(&record.to_string()), record);
    }

    #[test]
    fn test_surrounding_prose_does_not_change_the_result() {
        let noisy = format!(
            "Sure! Here is the summary of our session.\n\n{WELL_FORMED}\n\n\
             Let me know if you'd like to practice again.\nGood luck!"
        );

        assert_eq!(parse(&noisy), expected());
    }

    #[test]
    fn test_bullets_keep_source_order_and_skip_other_lines() {
        let raw = "STRENGTHS:\n  - third\nnot a bullet\n-   first  \n-\n- second";

        assert_eq!(parse(raw).strengths, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let record = parse("OVERALL PROGRESS:\nOnly prose this time.");

        assert!(record.strengths.is_empty());
        assert!(record.areas_for_improvement.is_empty());
        assert!(record.personalized_suggestions.is_empty());
        assert_eq!(record.overall_progress, "Only prose this time.");
    }

    #[test]
    fn test_overall_progress_keeps_multiple_lines_verbatim() {
        let record = parse("OVERALL PROGRESS:\n  Line one.\nLine two.  \n");

        assert_eq!(record.overall_progress, "Line one.\nLine two.");
    }

    #[test]
    fn test_headers_with_other_casing_are_ignored() {
        let record = parse("Strengths:\n- one\n- two\n\nstrengths:\n- three");

        assert_eq!(record, SummaryRecord::default());
    }

    #[test]
    fn test_repeated_sections_append_bullets_and_keep_first_progress() {
        let raw = "STRENGTHS:\n- a\n\nOVERALL PROGRESS:\nfirst\n\nSTRENGTHS:\n- b\n\nOVERALL PROGRESS:\nsecond";

        let record = parse(raw);

        assert_eq!(record.strengths, vec!["a", "b"]);
        assert_eq!(record.overall_progress, "first");
    }

    #[test]
    fn test_blank_lines_with_whitespace_and_crlf_separate_blocks() {
        let raw = "STRENGTHS:\r\n- a\r\n- b\r\n   \r\nAREAS FOR IMPROVEMENT:\r\n- c\r\n";

        let record = parse(raw);

        assert_eq!(record.strengths, vec!["a", "b"]);
        assert_eq!(record.areas_for_improvement, vec!["c"]);
    }

    #[test]
    fn test_arbitrary_input_never_fails() {
        for raw in ["", "\n\n\n", "-", "STRENGTHS:", "OVERALL PROGRESS:", "🙂\n\n- x"] {
            let _ = parse(raw);
        }
        assert_eq!(parse("STRENGTHS:"), SummaryRecord::default());
    }
}
