use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Error;
use crate::models::answer::{AnalysisRequest, Answer};

pub const NO_ANSWERS: &str = "Нет ответов";

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePayload {
    #[validate(length(min = 1, message = "Нет ответов"))]
    pub answers: Option<Vec<Answer>>,
    pub full_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    #[serde(rename = "docBase64")]
    pub doc_base64: String,
}

impl TryFrom<AnalyzePayload> for AnalysisRequest {
    type Error = Error;

    fn try_from(payload: AnalyzePayload) -> Result<Self, Self::Error> {
        match (payload.answers, payload.full_text) {
            (Some(answers), _) if answers.is_empty() => Err(Error::BadRequest(NO_ANSWERS.into())),
            (Some(answers), _) => Ok(AnalysisRequest::Answers(answers)),
            (None, Some(text)) if !text.trim().is_empty() => Ok(AnalysisRequest::RawText(text)),
            _ => Err(Error::BadRequest(NO_ANSWERS.into())),
        }
    }
}
