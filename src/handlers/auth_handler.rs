use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{
        ForgotPasswordRequest, GoogleLoginRequest, LoginRequest, RegisterRequest,
        ResetPasswordRequest, VerifyOtpRequest,
    },
};

#[post("/api/auth/register")]
async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/api/auth/login")]
async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

// Mounted under the token-checked /api scope, unlike the rest of this file.
#[get("/auth/me")]
async fn me(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.auth_service.current_user(&auth.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/api/auth/forgot-password")]
async fn forgot_password(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .auth_service
        .forgot_password(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/auth/verify-otp")]
async fn verify_otp(
    state: web::Data<Arc<AppState>>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.verify_otp(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/auth/reset-password")]
async fn reset_password(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .auth_service
        .reset_password(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/auth/google")]
async fn google_login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .auth_service
        .google_login(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
