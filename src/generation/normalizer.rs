//! Turns raw model text into candidate questions.
//!
//! Two independent stages: [`parse_strict`] decodes the `{"questions": [...]}`
//! object the prompt asks for, and [`parse_heuristic`] reads the numbered
//! plain-text layout models drift into when they ignore the JSON instruction.
//! [`normalize`] runs the second only when the first yields nothing.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map as JsonMap, Value as JsonValue};

use super::{AnswerFormat, CandidateQuestion};

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*```[\w-]*[ \t]*\r?$").expect("fence pattern"))
}

fn blank_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("blank line pattern"))
}

fn ordinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("ordinal pattern"))
}

fn option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]\)\s").expect("option pattern"))
}

fn option_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]\)\s*").expect("option prefix pattern"))
}

fn answer_letter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)correct answer[*_]*\s*:[*_]*\s*[*_(\[]*\s*([a-d])\b").expect("answer letter pattern")
    })
}

fn answer_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)correct answer[*_]*\s*:[*_]*\s*(.+)$").expect("answer text pattern")
    })
}

fn explanation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)explanation\s*:\s*(.*)$").expect("explanation pattern"))
}

/// Full pipeline. Never fails; an empty result means nothing usable was found.
pub fn normalize(raw: &str, answer_format: AnswerFormat) -> Vec<CandidateQuestion> {
    let unfenced = strip_code_fences(raw);

    if let Some(candidates) = parse_strict(extract_json_object(&unfenced)) {
        tracing::debug!(count = candidates.len(), "parsed model output as JSON");
        return candidates;
    }

    let candidates = parse_heuristic(&unfenced, answer_format);
    tracing::debug!(count = candidates.len(), "parsed model output with text fallback");
    candidates
}

/// Removes Markdown code-fence delimiter lines (with or without a language
/// tag). Backticks inside a line are left alone.
pub fn strip_code_fences(raw: &str) -> String {
    fence_re().replace_all(raw, "").trim().to_string()
}

/// Slice from the first `{` to the last `}`; empty when there is no such pair.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => "",
    }
}

/// Strict stage. `None` when the text is not a JSON object with a non-empty
/// `questions` array of objects.
pub fn parse_strict(cleaned: &str) -> Option<Vec<CandidateQuestion>> {
    let value: JsonValue = serde_json::from_str(cleaned).ok()?;
    let items = value.get("questions")?.as_array()?;
    let candidates: Vec<CandidateQuestion> = items.iter().filter_map(candidate_from_json).collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}

fn candidate_from_json(v: &JsonValue) -> Option<CandidateQuestion> {
    let obj = v.as_object()?;
    Some(CandidateQuestion {
        question_text: field(obj, &["questionText", "question_text", "question"]).and_then(scalar_text),
        options: field(obj, &["options"]).map(option_list),
        correct_answer: field(obj, &["correctAnswer", "correct_answer", "answer"]).and_then(scalar_text),
        explanation: field(obj, &["explanation"]).and_then(scalar_text),
        question_type: field(obj, &["type", "questionType"]).and_then(scalar_text),
    })
}

/// First non-null value among the accepted spellings of a field.
fn field<'a>(obj: &'a JsonMap<String, JsonValue>, names: &[&str]) -> Option<&'a JsonValue> {
    names
        .iter()
        .find_map(|n| obj.get(*n))
        .filter(|v| !v.is_null())
}

fn scalar_text(v: &JsonValue) -> Option<String> {
    match v {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A present-but-malformed `options` value becomes an empty list so the
/// sanitizer substitutes placeholders instead of dropping the question.
fn option_list(v: &JsonValue) -> Vec<String> {
    v.as_array()
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

/// Heuristic stage over blank-line separated blocks.
pub fn parse_heuristic(text: &str, answer_format: AnswerFormat) -> Vec<CandidateQuestion> {
    let mut out = Vec::new();
    for (idx, block) in blank_line_re().split(text).enumerate() {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < 3 {
            continue;
        }
        match parse_block(&lines, answer_format) {
            Some(candidate) => out.push(candidate),
            None => tracing::debug!(block = idx, "discarding incomplete question block"),
        }
    }
    out
}

fn parse_block(lines: &[&str], answer_format: AnswerFormat) -> Option<CandidateQuestion> {
    let question_text = ordinal_re().replace(lines[0], "").trim().to_string();
    let mut options = Vec::new();
    let mut correct_answer = String::new();
    let mut explanation = String::new();

    for line in &lines[1..] {
        if let Some(token) = answer_token(line, answer_format) {
            correct_answer = token;
        } else if let Some(caps) = explanation_re().captures(line) {
            explanation = caps[1].trim().to_string();
        } else if option_re().is_match(line) {
            options.push(option_prefix_re().replace(line, "").trim().to_string());
        }
    }

    if question_text.is_empty() || options.is_empty() || correct_answer.is_empty() {
        return None;
    }
    Some(CandidateQuestion {
        question_text: Some(question_text),
        options: Some(options),
        correct_answer: Some(correct_answer),
        explanation: Some(explanation).filter(|e| !e.is_empty()),
        question_type: None,
    })
}

fn answer_token(line: &str, answer_format: AnswerFormat) -> Option<String> {
    match answer_format {
        AnswerFormat::Letter => answer_letter_re()
            .captures(line)
            .map(|caps| caps[1].to_ascii_uppercase()),
        AnswerFormat::OptionText => answer_text_re().captures(line).map(|caps| {
            let unemphasized =
                caps[1].trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace());
            option_prefix_re()
                .replace(unemphasized, "")
                .trim()
                .to_string()
        }),
    }
}
