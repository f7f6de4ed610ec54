//! Prompt templates for the review workflow
//!
//! Each prompt is a task instruction, optional reviewer instructions, and
//! the user-supplied material capped to a character budget.

use serde::{Deserialize, Serialize};

const SUBMISSION_INSTRUCTION: &str =
    "Organize the following 510(k) submission into structured markdown with \
     headings, summary, and checklist.";

const CHECKLIST_INSTRUCTION: &str =
    "Organize the following checklist into a clear markdown checklist grouped by sections.";

const REVIEW_INSTRUCTION: &str =
    "Using the checklist below, evaluate the submission and produce a structured review \
     report with findings, recommended actions, and missing documents.";

const SELF_TEST_PROMPT: &str = "Reply with the single word OK.";

/// Character budgets for user-supplied material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptLimits {
    pub submission: usize,
    pub checklist: usize,
    pub review_checklist: usize,
    pub review_submission: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            submission: 3000,
            checklist: 3000,
            review_checklist: 2000,
            review_submission: 8000,
        }
    }
}

/// First `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn with_instructions(instruction: &str, extra: &str) -> String {
    let mut prompt = instruction.to_string();
    let extra = extra.trim();
    if !extra.is_empty() {
        prompt.push_str("\n\nAdditional reviewer instructions:\n");
        prompt.push_str(extra);
    }
    prompt
}

/// Prompt that reorganizes a submission document into structured markdown.
pub fn submission_prompt(source: &str, extra: &str, limits: &PromptLimits) -> String {
    let mut prompt = with_instructions(SUBMISSION_INSTRUCTION, extra);
    prompt.push_str("\n\nSource:\n");
    prompt.push_str(truncate_chars(source, limits.submission));
    prompt
}

/// Prompt that reorganizes a checklist into grouped markdown.
pub fn checklist_prompt(source: &str, extra: &str, limits: &PromptLimits) -> String {
    let mut prompt = with_instructions(CHECKLIST_INSTRUCTION, extra);
    prompt.push_str("\n\nSource:\n");
    prompt.push_str(truncate_chars(source, limits.checklist));
    prompt
}

/// Prompt that reviews a submission against a checklist.
pub fn review_prompt(
    submission: &str,
    checklist: &str,
    extra: &str,
    limits: &PromptLimits,
) -> String {
    let mut prompt = with_instructions(REVIEW_INSTRUCTION, extra);
    prompt.push_str("\n\nCHECKLIST:\n");
    prompt.push_str(truncate_chars(checklist, limits.review_checklist));
    prompt.push_str("\n\nSUBMISSION:\n");
    prompt.push_str(truncate_chars(submission, limits.review_submission));
    prompt
}

pub fn self_test_prompt() -> &'static str {
    SELF_TEST_PROMPT
}
