use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::domain::question::Subject;

/// One answered question inside a stored result.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question_id: ObjectId,
    pub selected_answer: u32,
    pub correct_answer: u32,
    pub is_correct: bool,
}

/// A completed, graded quiz attempt for one subject.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub subject: Subject,
    /// Rounded percentage, 0..=100.
    pub score: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub time_spent_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuizResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: ObjectId,
        subject: Subject,
        score: u32,
        correct_count: u32,
        total_questions: u32,
        answers: Vec<AnswerRecord>,
        time_spent_secs: u64,
    ) -> Self {
        QuizResult {
            id: None,
            user_id,
            subject,
            score,
            correct_count,
            total_questions,
            answers,
            time_spent_secs,
            created_at: Some(Utc::now()),
        }
    }
}

/// Percentage score rounded to the nearest whole number. An empty
/// submission scores zero rather than dividing by it.
pub fn percent_score(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_score_rounds() {
        assert_eq!(percent_score(2, 3), 67);
        assert_eq!(percent_score(1, 3), 33);
        assert_eq!(percent_score(4, 4), 100);
        assert_eq!(percent_score(0, 5), 0);
    }

    #[test]
    fn test_percent_score_empty_submission() {
        assert_eq!(percent_score(0, 0), 0);
    }

    #[test]
    fn test_result_creation() {
        let user_id = ObjectId::new();
        let result = QuizResult::new(user_id, Subject::React, 50, 1, 2, vec![], 30);
        assert_eq!(result.user_id, user_id);
        assert_eq!(result.score, 50);
        assert_eq!(result.time_spent_secs, 30);
        assert!(result.created_at.is_some());
    }
}
