use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Placeholder the questionnaire uses for an unanswered question.
pub const UNANSWERED: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    #[serde(default = "unanswered", deserialize_with = "scalar_as_string")]
    pub answer: String,
}

impl Answer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The two input shapes accepted by `/api/analyze`, normalized into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Answers(Vec<Answer>),
    RawText(String),
}

impl AnalysisRequest {
    /// Number of Q/A pairs the report will render.
    pub fn answer_count(&self) -> usize {
        match self {
            AnalysisRequest::Answers(answers) => answers.len(),
            AnalysisRequest::RawText(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub text: String,
}

fn unanswered() -> String {
    UNANSWERED.to_string()
}

// The collector sends strings, but radio values occasionally arrive as numbers or booleans.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(unanswered()),
        JsonValue::String(s) => Ok(s),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "answer must be a string, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_or_null_answer_becomes_placeholder() {
        let a: Answer = serde_json::from_value(json!({ "question": "Q" })).unwrap();
        assert_eq!(a.answer, UNANSWERED);
        let b: Answer = serde_json::from_value(json!({ "question": "Q", "answer": null })).unwrap();
        assert_eq!(b.answer, UNANSWERED);
    }

    #[test]
    fn scalar_answers_are_stringified() {
        let a: Answer = serde_json::from_value(json!({ "question": "Q", "answer": 7 })).unwrap();
        assert_eq!(a.answer, "7");
        let b: Answer = serde_json::from_value(json!({ "question": "Q", "answer": true })).unwrap();
        assert_eq!(b.answer, "true");
    }

    #[test]
    fn nested_answers_are_rejected() {
        let res: Result<Answer, _> =
            serde_json::from_value(json!({ "question": "Q", "answer": { "x": 1 } }));
        assert!(res.is_err());
    }

    #[test]
    fn answer_count_by_shape() {
        let answers = AnalysisRequest::Answers(vec![Answer::new("a", "b"), Answer::new("c", "d")]);
        assert_eq!(answers.answer_count(), 2);
        assert_eq!(AnalysisRequest::RawText("1. Да".into()).answer_count(), 0);
    }
}
