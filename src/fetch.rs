use url::Url;

use crate::config::Filters;
use crate::entities::decode_entities;
use crate::question::Question;

/// Total request attempts per question load, counting the first one.
pub const MAX_ATTEMPTS: u32 = 3;

/// Raw question-service response body.
///
/// Every field is optional on the wire; [`question_from_payload`] decides
/// what counts as a well-formed result. An `error` field from the service
/// always wins over whatever else the body carries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct QuestionPayload {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub answers: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("question service reported: {0}")]
    Service(String),
    #[error("response is missing the {0} field")]
    MissingField(&'static str),
    #[error("response contains an empty {0}")]
    EmptyField(&'static str),
    #[error("correct answer is not among the answer choices")]
    CorrectAnswerMissing,
}

/// Validates a service payload into a displayable [`Question`], decoding
/// HTML entities in every text field first so the membership check compares
/// what the user will actually see.
pub fn question_from_payload(payload: QuestionPayload) -> Result<Question, FetchError> {
    if let Some(message) = payload.error {
        return Err(FetchError::Service(message));
    }

    let prompt = decode_entities(&payload.question.ok_or(FetchError::MissingField("question"))?);
    let correct_answer = decode_entities(
        &payload
            .correct_answer
            .ok_or(FetchError::MissingField("correct_answer"))?,
    );
    let choices: Vec<String> = payload
        .answers
        .ok_or(FetchError::MissingField("answers"))?
        .iter()
        .map(|answer| decode_entities(answer))
        .collect();

    if prompt.trim().is_empty() {
        return Err(FetchError::EmptyField("question"));
    }
    if correct_answer.trim().is_empty() {
        return Err(FetchError::EmptyField("correct_answer"));
    }
    if choices.is_empty() {
        return Err(FetchError::EmptyField("answers"));
    }
    if !choices.contains(&correct_answer) {
        return Err(FetchError::CorrectAnswerMissing);
    }

    Ok(Question {
        prompt,
        correct_answer,
        choices,
    })
}

/// Builds the question request URL, appending only the filters that are set.
pub fn quiz_url(endpoint: &str, filters: &Filters) -> Result<String, url::ParseError> {
    let mut url = Url::parse(endpoint)?;

    // query_pairs_mut leaves a dangling '?' when nothing is appended.
    if filters.category.is_some() || filters.difficulty.is_some() {
        let mut query = url.query_pairs_mut();
        if let Some(category) = &filters.category {
            query.append_pair("category", category);
        }
        if let Some(difficulty) = &filters.difficulty {
            query.append_pair("difficulty", difficulty);
        }
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from(json: &str) -> QuestionPayload {
        serde_json::from_str(json).expect("payload should deserialize")
    }

    #[test]
    fn accepts_a_well_formed_payload() {
        let payload = payload_from(
            r#"{
                "question": "Who wrote &quot;Dune&quot;?",
                "correct_answer": "Frank Herbert",
                "answers": ["Frank Herbert", "Isaac Asimov", "Ursula K. Le Guin", "Arthur C. Clarke"]
            }"#,
        );

        let question = question_from_payload(payload).expect("payload should validate");
        assert_eq!(question.prompt, "Who wrote \"Dune\"?");
        assert!(question.choices.contains(&question.correct_answer));
    }

    #[test]
    fn service_error_field_wins() {
        let payload = payload_from(r#"{ "error": "no question available" }"#);
        let error = question_from_payload(payload).expect_err("error field should fail");
        assert_eq!(error, FetchError::Service("no question available".to_string()));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let payload = payload_from(r#"{ "question": "Q?" }"#);
        let error = question_from_payload(payload).expect_err("incomplete payload should fail");
        assert_eq!(error, FetchError::MissingField("correct_answer"));
    }

    #[test]
    fn correct_answer_must_be_a_choice() {
        let payload = payload_from(
            r#"{
                "question": "2 + 2?",
                "correct_answer": "4",
                "answers": ["3", "5", "22"]
            }"#,
        );

        let error = question_from_payload(payload).expect_err("membership violation should fail");
        assert_eq!(error, FetchError::CorrectAnswerMissing);
    }

    #[test]
    fn membership_is_checked_after_decoding() {
        // The answer list encodes the apostrophe while correct_answer does not;
        // both decode to the same text and must match.
        let payload = payload_from(
            r#"{
                "question": "Band?",
                "correct_answer": "Guns N' Roses",
                "answers": ["Guns N&#039; Roses", "Queen"]
            }"#,
        );

        let question = question_from_payload(payload).expect("decoded texts should match");
        assert_eq!(question.choices[0], "Guns N' Roses");
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let payload = payload_from(
            r#"{
                "question": "   ",
                "correct_answer": "x",
                "answers": ["x", "y"]
            }"#,
        );

        let error = question_from_payload(payload).expect_err("blank prompt should fail");
        assert_eq!(error, FetchError::EmptyField("question"));
    }

    #[test]
    fn url_includes_only_set_filters() {
        let endpoint = "http://127.0.0.1:8000/quiz";

        let any = quiz_url(endpoint, &Filters::default()).expect("endpoint should parse");
        assert_eq!(any, "http://127.0.0.1:8000/quiz");

        let filtered = quiz_url(
            endpoint,
            &Filters {
                category: Some("9".to_string()),
                difficulty: Some("easy".to_string()),
            },
        )
        .expect("endpoint should parse");
        assert_eq!(
            filtered,
            "http://127.0.0.1:8000/quiz?category=9&difficulty=easy"
        );
    }
}
