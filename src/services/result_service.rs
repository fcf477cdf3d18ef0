use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerRecord, QuizResult, Subject},
        dto::{
            request::{SaveResultRequest, SubjectFilter},
            response::{
                AnswerQuestionInfo, HydratedAnswerDto, ResultDetailDto, ResultSummaryDto,
            },
        },
    },
    repositories::{QuestionRepository, ResultRepository},
};

pub struct ResultService {
    results: Arc<dyn ResultRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl ResultService {
    pub fn new(
        results: Arc<dyn ResultRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self { results, questions }
    }

    pub async fn save_result(
        &self,
        user_id: ObjectId,
        request: SaveResultRequest,
    ) -> AppResult<ResultDetailDto> {
        request.validate()?;

        // Answers with unparseable question ids are dropped rather than
        // failing the whole save.
        let answers: Vec<AnswerRecord> = request
            .answers
            .into_iter()
            .filter_map(|a| {
                ObjectId::parse_str(&a.question_id).ok().map(|oid| AnswerRecord {
                    question_id: oid,
                    selected_answer: a.selected_answer,
                    correct_answer: a.correct_answer,
                    is_correct: a.is_correct,
                })
            })
            .collect();

        let result = QuizResult::new(
            user_id,
            request.subject,
            request.score,
            request.correct_count,
            request.total_questions,
            answers,
            request.time_spent_secs.unwrap_or(0),
        );

        let stored = self.results.create(result).await?;
        log::info!(
            "Stored {} result for user {}: {}%",
            stored.subject,
            user_id.to_hex(),
            stored.score
        );
        self.hydrate(stored).await
    }

    pub async fn my_results(
        &self,
        user_id: ObjectId,
        filter: SubjectFilter,
    ) -> AppResult<Vec<ResultSummaryDto>> {
        let subject = parse_filter(filter)?;
        let results = self.results.find_by_user(user_id, subject).await?;
        Ok(results.into_iter().map(ResultSummaryDto::from).collect())
    }

    /// Full result with each answer hydrated from the question bank.
    /// Owners only; everyone else gets a 403.
    pub async fn get_result(&self, user_id: ObjectId, id: &str) -> AppResult<ResultDetailDto> {
        let oid = ObjectId::parse_str(id)?;
        let result = self
            .results
            .find_by_id(oid)
            .await?
            .ok_or_else(|| AppError::NotFound("Result not found".to_string()))?;

        if result.user_id != user_id {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        self.hydrate(result).await
    }

    async fn hydrate(&self, result: QuizResult) -> AppResult<ResultDetailDto> {
        let mut answers = Vec::with_capacity(result.answers.len());
        for answer in &result.answers {
            let question = self
                .questions
                .find_by_id(answer.question_id)
                .await?
                .map(|q| AnswerQuestionInfo {
                    question: q.question,
                    options: q.options,
                    explanation: q.explanation,
                });

            answers.push(HydratedAnswerDto {
                question_id: answer.question_id.to_hex(),
                selected_answer: answer.selected_answer,
                correct_answer: answer.correct_answer,
                is_correct: answer.is_correct,
                question,
            });
        }

        Ok(ResultDetailDto {
            id: result.id.map(|o| o.to_hex()).unwrap_or_default(),
            subject: result.subject,
            score: result.score,
            correct_count: result.correct_count,
            total_questions: result.total_questions,
            time_spent_secs: result.time_spent_secs,
            answers,
            created_at: result.created_at,
        })
    }

    pub async fn best_score(
        &self,
        user_id: ObjectId,
        subject: &str,
    ) -> AppResult<Option<ResultSummaryDto>> {
        let subject = Subject::parse_flexible(subject).ok_or_else(|| {
            AppError::ValidationError(format!("Invalid subject: {}", subject))
        })?;

        let best = self.results.find_best(user_id, subject).await?;
        Ok(best.map(ResultSummaryDto::from))
    }
}

fn parse_filter(filter: SubjectFilter) -> AppResult<Option<Subject>> {
    match filter.subject.as_deref() {
        None => Ok(None),
        Some("all") => Ok(None),
        Some(raw) => Subject::parse_flexible(raw)
            .map(Some)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid subject: {}", raw))),
    }
}
