use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{SaveResultRequest, SubjectFilter},
        response::MessageResponse,
    },
};

// Mounted under the token-checked /api scope. Results are strictly
// per-user; there is no admin view over them.

#[post("/results")]
async fn save_result(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SaveResultRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = auth.user_id()?;
    let result = state
        .result_service
        .save_result(user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[get("/results/my-results")]
async fn my_results(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SubjectFilter>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = auth.user_id()?;
    let results = state
        .result_service
        .my_results(user_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(results))
}

#[get("/results/best/{subject}")]
async fn best_score(
    state: web::Data<Arc<AppState>>,
    subject: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = auth.user_id()?;

    match state.result_service.best_score(user_id, &subject).await? {
        Some(best) => Ok(HttpResponse::Ok().json(best)),
        None => Ok(HttpResponse::Ok().json(MessageResponse::new(
            "No results found for this subject",
        ))),
    }
}

#[get("/results/{id}")]
async fn get_result(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = auth.user_id()?;
    let result = state.result_service.get_result(user_id, &id).await?;
    Ok(HttpResponse::Ok().json(result))
}
