use super::request::{Category, Focus, GenerationRequest, Level};
use super::AnswerFormat;

/// Literal shape the model is asked to reproduce. Field names here are the
/// ones the normalizer looks for.
const SCHEMA_LETTER: &str = r#"{
  "questions": [
    {
      "questionText": "The question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "A/B/C/D",
      "explanation": "Detailed explanation with real-world context and best practices",
      "type": "technical/behavioral/problem-solving"
    }
  ]
}"#;

const SCHEMA_OPTION_TEXT: &str = r#"{
  "questions": [
    {
      "questionText": "The question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "The exact text of the correct option",
      "explanation": "Detailed explanation with real-world context and best practices",
      "type": "technical/behavioral/problem-solving"
    }
  ]
}"#;

fn level_guidance(level: Level) -> &'static str {
    match level {
        Level::Beginner => {
            "Focus on fundamental concepts, core terminology and straightforward definitions. \
             Avoid trick questions; wrong options should be plausible but clearly distinguishable."
        }
        Level::Intermediate => {
            "Focus on practical application: how concepts are used in everyday work, common \
             pitfalls, trade-offs between approaches and debugging typical problems."
        }
        Level::Advanced => {
            "Focus on complex scenarios: architecture decisions, performance and scalability, \
             edge cases, failure modes and reasoning about trade-offs under constraints."
        }
    }
}

fn category_guidance(category: Category) -> &'static str {
    match category {
        Category::TechnicalSkills => {
            "Test hands-on knowledge of the tools, languages and frameworks the role uses daily."
        }
        Category::SystemDesign => {
            "Present design situations: components, data flow, scaling, consistency and reliability choices."
        }
        Category::Behavioral => {
            "Ask about teamwork, conflict, ownership and communication; options describe possible responses \
             and the best one reflects professional judgement. Use type \"behavioral\"."
        }
        Category::ProblemSolving => {
            "Pose short analytical puzzles or debugging situations. Use type \"problem-solving\"."
        }
        Category::Coding => {
            "Ask about reading, writing and reviewing code; short snippets inside the question text are welcome."
        }
    }
}

/// Builds the single-turn instruction sent to the model. Pure: the same
/// request and format always yield the same text.
pub fn build(request: &GenerationRequest, answer_format: AnswerFormat) -> String {
    let mut out = String::new();

    match &request.focus {
        Focus::Subject { subject, topic } => {
            out.push_str(&format!(
                "Generate a {} level quiz with {} questions about {} in {}.\n",
                request.level.difficulty(),
                request.question_count,
                topic,
                subject
            ));
        }
        Focus::Interview { job_role, category } => {
            out.push_str(&format!(
                "You are an experienced interviewer. Generate {} {} interview questions for a {} candidate at {} level.\n",
                request.question_count, category, job_role, request.level
            ));
            out.push_str(&format!("Category guidance: {}\n", category_guidance(*category)));
        }
    }
    out.push_str(&format!("Question type: {}.\n", request.question_type));
    out.push_str(&format!(
        "Level guidance ({}): {}\n",
        request.level,
        level_guidance(request.level)
    ));

    out.push_str("\nRules:\n");
    out.push_str("- Provide exactly 4 options per question.\n");
    match answer_format {
        AnswerFormat::Letter => out.push_str(
            "- correctAnswer is a single letter: A, B, C or D, matching the position of the correct option.\n",
        ),
        AnswerFormat::OptionText => out.push_str(
            "- correctAnswer repeats the text of the correct option exactly as written in options.\n",
        ),
    }
    out.push_str("- Every question has a non-empty explanation.\n");
    out.push_str("- type is one of: technical, behavioral, problem-solving.\n");

    out.push_str("\nINSTRUCTIONS:\n");
    out.push_str("Respond with only a JSON object. No other text or formatting.\n");
    out.push_str(match answer_format {
        AnswerFormat::Letter => SCHEMA_LETTER,
        AnswerFormat::OptionText => SCHEMA_OPTION_TEXT,
    });
    out.push('\n');
    out
}
