use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            question::OPTION_COUNT,
            quiz_result::percent_score,
            Question, Subject,
        },
        dto::{
            request::{CreateQuestionRequest, SubmitAnswersRequest, UpdateQuestionRequest},
            response::{GradedAnswerDto, GradedSubmissionDto, PublicQuestionDto},
        },
    },
    repositories::QuestionRepository,
};

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

fn validate_options(options: &[String]) -> AppResult<()> {
    if options.len() != OPTION_COUNT {
        return Err(AppError::ValidationError(format!(
            "Question must have exactly {} options",
            OPTION_COUNT
        )));
    }
    Ok(())
}

fn validate_correct_answer(correct_answer: u32) -> AppResult<()> {
    if correct_answer as usize >= OPTION_COUNT {
        return Err(AppError::ValidationError(format!(
            "Correct answer must be between 0 and {}",
            OPTION_COUNT - 1
        )));
    }
    Ok(())
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Full documents for the admin console, optional subject filter.
    pub async fn list_admin(&self, subject: Option<Subject>) -> AppResult<Vec<Question>> {
        self.questions.find_all(subject).await
    }

    /// Quiz-taker view: answers and explanations stripped.
    pub async fn list_for_subject(&self, subject: Subject) -> AppResult<Vec<PublicQuestionDto>> {
        let questions = self.questions.find_all(Some(subject)).await?;
        Ok(questions.into_iter().map(PublicQuestionDto::from).collect())
    }

    pub async fn get_question(&self, id: &str) -> AppResult<Question> {
        let oid = ObjectId::parse_str(id)?;
        self.questions
            .find_by_id(oid)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<Question> {
        request.validate()?;
        validate_options(&request.options)?;
        validate_correct_answer(request.correct_answer)?;

        let question = Question::new(
            &request.question,
            request.subject,
            request.options,
            request.correct_answer,
            request.explanation,
        );
        self.questions.create(question).await
    }

    pub async fn update_question(
        &self,
        id: &str,
        request: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        let oid = ObjectId::parse_str(id)?;
        let mut question = self
            .questions
            .find_by_id(oid)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        if let Some(text) = request.question {
            question.question = text.trim().to_string();
        }
        if let Some(subject) = request.subject {
            question.subject = subject;
        }
        if let Some(options) = request.options {
            validate_options(&options)?;
            question.options = options;
        }
        if let Some(correct_answer) = request.correct_answer {
            validate_correct_answer(correct_answer)?;
            question.correct_answer = correct_answer;
        }
        if let Some(explanation) = request.explanation {
            question.explanation = Some(explanation.trim().to_string());
        }
        question.updated_at = Some(chrono::Utc::now());

        self.questions.update(oid, question).await
    }

    pub async fn delete_question(&self, id: &str) -> AppResult<()> {
        let oid = ObjectId::parse_str(id)?;
        self.questions.delete(oid).await
    }

    /// Grades a submission against the stored questions. Answers pointing
    /// at unknown or deleted questions are skipped, matching how the quiz
    /// behaves when the bank changes mid-attempt.
    pub async fn grade_submission(
        &self,
        request: SubmitAnswersRequest,
    ) -> AppResult<GradedSubmissionDto> {
        let total = request.answers.len() as u32;
        let mut results = Vec::with_capacity(request.answers.len());
        let mut correct_count = 0u32;

        for answer in request.answers {
            let Ok(oid) = ObjectId::parse_str(&answer.question_id) else {
                continue;
            };
            let Some(question) = self.questions.find_by_id(oid).await? else {
                continue;
            };

            let is_correct = question.correct_answer == answer.selected_answer;
            if is_correct {
                correct_count += 1;
            }
            results.push(GradedAnswerDto {
                question_id: answer.question_id,
                question: question.question,
                selected_answer: answer.selected_answer,
                correct_answer: question.correct_answer,
                is_correct,
                explanation: question.explanation,
            });
        }

        Ok(GradedSubmissionDto {
            score: percent_score(correct_count, total),
            correct_count,
            total_questions: total,
            results,
        })
    }
}
