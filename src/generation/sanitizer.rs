//! Defaulting policy applied to every candidate before it leaves the pipeline.
//!
//! Only two conditions discard a candidate: no question text, or no `options`
//! field at all. Everything else is repaired in place.

use super::{AnswerFormat, CandidateQuestion};
use crate::models::question::{Question, QuestionKind};

pub const PLACEHOLDER_OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];
pub const DEFAULT_EXPLANATION: &str = "No explanation provided";
pub const DEFAULT_LETTER: &str = "A";

const LETTERS: [&str; 4] = ["A", "B", "C", "D"];

pub fn sanitize(candidates: Vec<CandidateQuestion>, answer_format: AnswerFormat) -> Vec<Question> {
    let total = candidates.len();
    let questions: Vec<Question> = candidates
        .into_iter()
        .filter_map(|c| sanitize_one(c, answer_format))
        .collect();
    if questions.len() < total {
        tracing::debug!(
            dropped = total - questions.len(),
            kept = questions.len(),
            "dropped candidates without question text or options"
        );
    }
    questions
}

fn sanitize_one(candidate: CandidateQuestion, answer_format: AnswerFormat) -> Option<Question> {
    let question_text = candidate
        .question_text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())?;

    let mut options: Vec<String> = candidate
        .options?
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if options.is_empty() {
        options = PLACEHOLDER_OPTIONS.iter().map(|o| o.to_string()).collect();
    }

    let correct_answer = match answer_format {
        AnswerFormat::Letter => letter_answer(candidate.correct_answer.as_deref()),
        AnswerFormat::OptionText => option_text_answer(candidate.correct_answer.as_deref(), &options),
    };

    let explanation = candidate
        .explanation
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());

    let question_type = candidate
        .question_type
        .and_then(|t| t.parse::<QuestionKind>().ok())
        .unwrap_or_default();

    Some(Question {
        question_text,
        options,
        correct_answer,
        explanation,
        question_type,
    })
}

/// Lowercase letters are accepted and normalized.
fn letter_answer(raw: Option<&str>) -> String {
    raw.map(|a| a.trim().to_ascii_uppercase())
        .filter(|a| LETTERS.contains(&a.as_str()))
        .unwrap_or_else(|| DEFAULT_LETTER.to_string())
}

/// Exact option text wins; a bare letter is resolved to its option; anything
/// else falls back to the first option.
fn option_text_answer(raw: Option<&str>, options: &[String]) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    if let Some(hit) = options.iter().find(|o| o.as_str() == raw) {
        return hit.clone();
    }
    let letter = raw.to_ascii_uppercase();
    if let Some(idx) = LETTERS.iter().position(|l| *l == letter) {
        if let Some(opt) = options.get(idx) {
            return opt.clone();
        }
    }
    options[0].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, options: &[&str], answer: &str) -> CandidateQuestion {
        CandidateQuestion {
            question_text: Some(text.to_string()),
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            correct_answer: Some(answer.to_string()),
            explanation: Some("because".to_string()),
            question_type: Some("technical".to_string()),
        }
    }

    #[test]
    fn out_of_domain_fields_are_defaulted() {
        let c = CandidateQuestion {
            question_text: Some("Q".to_string()),
            options: Some(vec!["a".into(), "b".into()]),
            correct_answer: Some("Z".to_string()),
            explanation: Some(String::new()),
            question_type: Some("unknown".to_string()),
        };
        let q = &sanitize(vec![c], AnswerFormat::Letter)[0];
        assert_eq!(q.correct_answer, "A");
        assert_eq!(q.explanation, DEFAULT_EXPLANATION);
        assert_eq!(q.question_type, QuestionKind::Technical);
        assert_eq!(q.options, vec!["a", "b"]);
    }

    #[test]
    fn empty_options_get_placeholders() {
        let q = &sanitize(vec![candidate("Q", &[], "C")], AnswerFormat::Letter)[0];
        assert_eq!(q.options, PLACEHOLDER_OPTIONS);
        assert_eq!(q.correct_answer, "C");
    }

    #[test]
    fn missing_text_or_options_drops_the_candidate_only() {
        let no_text = CandidateQuestion {
            question_text: Some("   ".into()),
            ..candidate("", &["x"], "A")
        };
        let no_options = CandidateQuestion {
            options: None,
            ..candidate("Q2", &[], "A")
        };
        let out = sanitize(
            vec![no_text, candidate("Q1", &["x"], "b"), no_options, candidate("Q3", &["y"], "D")],
            AnswerFormat::Letter,
        );
        let texts: Vec<&str> = out.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["Q1", "Q3"]);
        assert_eq!(out[0].correct_answer, "B");
    }

    #[test]
    fn question_kind_is_matched_case_insensitively() {
        let mut c = candidate("Q", &["x"], "A");
        c.question_type = Some("Problem-Solving".into());
        assert_eq!(
            sanitize(vec![c], AnswerFormat::Letter)[0].question_type,
            QuestionKind::ProblemSolving
        );
    }

    #[test]
    fn option_text_mode_resolves_answers_against_options() {
        let opts = ["London", "Paris", "Berlin", "Madrid"];
        let exact = &sanitize(vec![candidate("Q", &opts, "Paris")], AnswerFormat::OptionText)[0];
        assert_eq!(exact.correct_answer, "Paris");

        let letter = &sanitize(vec![candidate("Q", &opts, "c")], AnswerFormat::OptionText)[0];
        assert_eq!(letter.correct_answer, "Berlin");

        let junk = &sanitize(vec![candidate("Q", &opts, "Rome")], AnswerFormat::OptionText)[0];
        assert_eq!(junk.correct_answer, "London");
    }
}
