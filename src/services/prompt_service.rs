use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::models::answer::{AnalysisRequest, Answer};

/// Per-answer cap applied before an answer is placed in the prompt.
pub const MAX_ANSWER_CHARS: usize = 1200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Role and traits the model is asked to cover. The list is fixed per profile so
/// that every report comes back with the same block structure.
#[derive(Debug, Clone)]
pub struct AnalysisProfile {
    pub system_instruction: String,
    pub analyst_role: String,
    pub dimensions: Vec<String>,
    pub recommendations: usize,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self {
            system_instruction:
                "Ты — профессиональный психолог. Ответы должны быть на русском языке.".to_string(),
            analyst_role: "Ты — внимательный профессиональный психолог. На основе письменных ответов участника составь подробный психологический профиль на русском языке.".to_string(),
            dimensions: [
                "эмоциональный тон",
                "паттерны мышления",
                "признаки тревожности/самооценки",
                "эмпатию",
                "стиль привязанности",
                "экстраверсию/интроверсию",
                "склонность к манипуляциям",
                "ответственность",
                "зрелость и исполнительность",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            recommendations: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptService {
    profile: AnalysisProfile,
}

impl PromptService {
    pub fn new(profile: AnalysisProfile) -> Self {
        Self { profile }
    }

    pub fn build(&self, request: &AnalysisRequest) -> Result<Prompt> {
        let mut user = self.instructions();
        match request {
            AnalysisRequest::Answers(answers) => {
                if answers.is_empty() {
                    return Err(Error::BadRequest("Нет ответов".into()));
                }
                user.push_str(&format_answers(answers));
            }
            AnalysisRequest::RawText(text) => {
                if text.trim().is_empty() {
                    return Err(Error::BadRequest("Нет ответов".into()));
                }
                user.push_str(text);
            }
        }

        tracing::debug!(
            prompt_chars = user.chars().count(),
            answers = request.answer_count(),
            "Prompt assembled"
        );

        Ok(Prompt {
            system: self.profile.system_instruction.clone(),
            user,
        })
    }

    fn instructions(&self) -> String {
        format!(
            "{role}\n\nТребования:\n\
             - Проанализируй {dimensions}.\n\
             - Разбей анализ на тематические блоки (заголовки блоков).\n\
             - В конце дай краткий общий вывод (1–2 абзаца) и {n} практических рекомендации (коротко).\n\
             - Пиши уважительно и конструктивно.\n\n\
             Далее идут вопросы и ответы:\n\n",
            role = self.profile.analyst_role,
            dimensions = self.profile.dimensions.join(", "),
            n = self.profile.recommendations,
        )
    }
}

/// `<n>. <question>\nОтвет: <answer>\n\n` per entry, numbered from 1.
pub fn format_answers(answers: &[Answer]) -> String {
    let mut out = String::new();
    for (i, a) in answers.iter().enumerate() {
        let _ = write!(
            out,
            "{}. {}\nОтвет: {}\n\n",
            i + 1,
            a.question,
            truncate_chars(&a.answer, MAX_ANSWER_CHARS)
        );
    }
    out
}

/// Cuts on a char boundary, so multi-byte Cyrillic text is never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(question: &str, answer: &str) -> AnalysisRequest {
        AnalysisRequest::Answers(vec![Answer::new(question, answer)])
    }

    #[test]
    fn system_instruction_is_fixed() {
        let svc = PromptService::default();
        let prompt = svc.build(&single("Q", "A")).unwrap();
        assert_eq!(
            prompt.system,
            "Ты — профессиональный психолог. Ответы должны быть на русском языке."
        );
    }

    #[test]
    fn instructions_name_dimensions_and_structure() {
        let svc = PromptService::default();
        let prompt = svc.build(&single("Q", "A")).unwrap();
        assert!(prompt.user.contains("стиль привязанности"));
        assert!(prompt.user.contains("тематические блоки"));
        assert!(prompt.user.contains("3 практических рекомендации"));
        assert!(prompt.user.contains("уважительно и конструктивно"));
    }

    #[test]
    fn answers_are_numbered_in_order() {
        let answers = vec![
            Answer::new("Ты считаешь себя добрым человеком?", "Да"),
            Answer::new("Легко ли тебе доверять людям?", "—"),
        ];
        let text = format_answers(&answers);
        assert_eq!(
            text,
            "1. Ты считаешь себя добрым человеком?\nОтвет: Да\n\n\
             2. Легко ли тебе доверять людям?\nОтвет: —\n\n"
        );

        let prompt = PromptService::default()
            .build(&AnalysisRequest::Answers(answers))
            .unwrap();
        assert!(prompt.user.ends_with(&text));
    }

    #[test]
    fn long_answers_are_cut_to_limit() {
        let long = "ж".repeat(MAX_ANSWER_CHARS + 300);
        let prompt = PromptService::default().build(&single("Q", &long)).unwrap();

        let expected = format!("Ответ: {}\n\n", "ж".repeat(MAX_ANSWER_CHARS));
        assert!(prompt.user.ends_with(&expected));
        assert!(!prompt.user.contains(&"ж".repeat(MAX_ANSWER_CHARS + 1)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("привет", 3), "при");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn raw_text_is_appended_verbatim() {
        let raw = "1. Да\n2. Нет";
        let prompt = PromptService::default()
            .build(&AnalysisRequest::RawText(raw.into()))
            .unwrap();
        assert!(prompt.user.ends_with("Далее идут вопросы и ответы:\n\n1. Да\n2. Нет"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let svc = PromptService::default();
        assert!(matches!(
            svc.build(&AnalysisRequest::Answers(vec![])),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            svc.build(&AnalysisRequest::RawText(" \n ".into())),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn build_is_deterministic() {
        let svc = PromptService::default();
        let req = single("Q", "A");
        assert_eq!(svc.build(&req).unwrap(), svc.build(&req).unwrap());
    }

    #[test]
    fn custom_profile_changes_dimensions() {
        let svc = PromptService::new(AnalysisProfile {
            dimensions: vec!["самооценку".into()],
            recommendations: 2,
            ..AnalysisProfile::default()
        });
        let prompt = svc.build(&single("Q", "A")).unwrap();
        assert!(prompt.user.contains("Проанализируй самооценку."));
        assert!(prompt.user.contains("2 практических рекомендации"));
    }
}
