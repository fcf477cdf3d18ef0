use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_content_editor, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::Subject,
        dto::request::{
            CreateQuestionRequest, SubjectFilter, SubmitAnswersRequest, UpdateQuestionRequest,
        },
    },
};

// Mounted under the token-checked /api scope.

fn parse_subject(raw: &str) -> Result<Subject, AppError> {
    Subject::parse_flexible(raw)
        .ok_or_else(|| AppError::ValidationError(format!("Invalid subject: {}", raw)))
}

#[get("/questions/admin")]
async fn list_questions_admin(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SubjectFilter>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_content_editor(&auth.0)?;

    let subject = match &query.subject {
        Some(raw) => Some(parse_subject(raw)?),
        None => None,
    };
    let questions = state.question_service.list_admin(subject).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[get("/questions/subject/{subject}")]
async fn list_questions_for_subject(
    state: web::Data<Arc<AppState>>,
    subject: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let subject = parse_subject(&subject)?;
    let questions = state.question_service.list_for_subject(subject).await?;
    Ok(HttpResponse::Ok().json(questions))
}

// Registered after the static /questions/... routes so "admin" and
// "subject" are never captured as an id.
#[get("/questions/{id}")]
async fn get_question(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_content_editor(&auth.0)?;

    let question = state.question_service.get_question(&id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/questions")]
async fn create_question(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_content_editor(&auth.0)?;

    let question = state
        .question_service
        .create_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[put("/questions/{id}")]
async fn update_question(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_content_editor(&auth.0)?;

    let question = state
        .question_service
        .update_question(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/questions/{id}")]
async fn delete_question(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_content_editor(&auth.0)?;

    state.question_service.delete_question(&id).await?;
    Ok(HttpResponse::Ok().json(crate::models::dto::response::MessageResponse::new(
        "Question deleted successfully",
    )))
}

#[post("/questions/submit")]
async fn submit_answers(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SubmitAnswersRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let graded = state
        .question_service
        .grade_submission(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(graded))
}
