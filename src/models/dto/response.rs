use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::question::Subject;
use crate::models::domain::quiz_result::QuizResult;
use crate::models::domain::user::{Role, User};
use crate::models::domain::Question;

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: Option<String>,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id_hex(),
            username: user.username,
            email: user.email,
            role: user.role,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub verified: bool,
}

/// Question as shown to a quiz taker: no answer, no explanation.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestionDto {
    pub id: String,
    pub question: String,
    pub subject: Subject,
    pub options: Vec<String>,
}

impl From<Question> for PublicQuestionDto {
    fn from(q: Question) -> Self {
        PublicQuestionDto {
            id: q.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            question: q.question,
            subject: q.subject,
            options: q.options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradedAnswerDto {
    pub question_id: String,
    pub question: String,
    pub selected_answer: u32,
    pub correct_answer: u32,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GradedSubmissionDto {
    pub score: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    pub results: Vec<GradedAnswerDto>,
}

/// Result row for list views; answer detail is deliberately omitted.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSummaryDto {
    pub id: String,
    pub subject: Subject,
    pub score: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    pub time_spent_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<QuizResult> for ResultSummaryDto {
    fn from(r: QuizResult) -> Self {
        ResultSummaryDto {
            id: r.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            subject: r.subject,
            score: r.score,
            correct_count: r.correct_count,
            total_questions: r.total_questions,
            time_spent_secs: r.time_spent_secs,
            created_at: r.created_at,
        }
    }
}

/// Snapshot of the question attached to a reviewed answer. `None` when the
/// question has since been deleted from the bank.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerQuestionInfo {
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HydratedAnswerDto {
    pub question_id: String,
    pub selected_answer: u32,
    pub correct_answer: u32,
    pub is_correct: bool,
    pub question: Option<AnswerQuestionInfo>,
}

#[derive(Debug, Serialize)]
pub struct ResultDetailDto {
    pub id: String,
    pub subject: Subject,
    pub score: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    pub time_spent_secs: u64,
    pub answers: Vec<HydratedAnswerDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dto_excludes_password() {
        let mut user = User::test_user("johndoe", "john@example.com");
        user.password = Some("$2b$10$secret".to_string());

        let dto: UserDto = user.into();
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert!(json.contains("johndoe"));
    }

    #[test]
    fn test_public_question_strips_answer() {
        let question = Question::test_question(Subject::MongoDb, 1);
        let dto: PublicQuestionDto = question.into();
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("correct_answer"));
        assert!(!json.contains("explanation"));
        assert_eq!(dto.options.len(), 4);
    }

    #[test]
    fn test_result_summary_omits_answers() {
        let result = QuizResult::new(
            mongodb::bson::oid::ObjectId::new(),
            Subject::Html,
            80,
            4,
            5,
            vec![],
            120,
        );
        let dto: ResultSummaryDto = result.into();
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("answers"));
        assert!(json.contains("\"score\":80"));
    }
}
