use actix_web::{get, http::StatusCode, test, web, App, HttpResponse, ResponseError};
use mongodb::bson::oid::ObjectId;
use secrecy::SecretString;

use quiz_server::{
    auth::{AuthMiddleware, AuthenticatedUser, JwtService},
    errors::AppError,
    models::domain::{Question, Role, Subject, User},
};

fn jwt_service() -> JwtService {
    JwtService::new(&SecretString::from("integration_test_secret".to_string()), 1)
}

fn user_with_id(role: Role) -> User {
    let mut user = User::new_local(
        "integration",
        "integration@test.com",
        "$2b$10$x".to_string(),
        role,
    );
    user.id = Some(ObjectId::new());
    user
}

#[get("/whoami")]
async fn whoami(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "sub": auth.0.sub,
        "role": auth.0.role,
    }))
}

#[actix_web::test]
async fn protected_scope_requires_a_valid_bearer_token() {
    let jwt = jwt_service();
    let token = jwt.create_token(&user_with_id(Role::Manager)).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(jwt))
            .service(web::scope("/api").wrap(AuthMiddleware).service(whoami)),
    )
    .await;

    // No header at all.
    let req = test::TestRequest::get().uri("/api/whoami").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme.
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "Basic abcdef"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The real thing.
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["role"], "manager");
}

#[actix_web::test]
async fn unauthenticated_rejections_use_the_json_error_body() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(jwt_service()))
            .service(web::scope("/api").wrap(AuthMiddleware).service(whoami)),
    )
    .await;

    for request in [
        test::TestRequest::get().uri("/api/whoami"),
        test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header(("Authorization", "Bearer garbage")),
    ] {
        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 401);
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_rejected() {
    let other = JwtService::new(&SecretString::from("a_different_secret".to_string()), 1);
    let token = other.create_token(&user_with_id(Role::User)).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(jwt_service()))
            .service(web::scope("/api").wrap(AuthMiddleware).service(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn error_responses_carry_status_and_json_body() {
    let cases = [
        (AppError::NotFound("User not found".into()), 404u16),
        (AppError::AlreadyExists("dup".into()), 409),
        (AppError::ValidationError("bad".into()), 400),
        (AppError::Unauthorized("who".into()), 401),
        (AppError::Forbidden("no".into()), 403),
        (AppError::InternalError("boom".into()), 500),
    ];

    for (error, status) in cases {
        let response = error.error_response();
        assert_eq!(response.status().as_u16(), status);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], status);
        assert!(json["error"].is_string());
    }
}

#[actix_web::test]
async fn question_wire_format_round_trips() {
    let question = Question::new(
        "What does CSS stand for?",
        Subject::Css,
        vec![
            "Cascading Style Sheets".to_string(),
            "Computer Style Sheets".to_string(),
            "Creative Style System".to_string(),
            "Colorful Style Sheets".to_string(),
        ],
        0,
        Some("Cascading Style Sheets.".to_string()),
    );

    let json = serde_json::to_value(&question).unwrap();
    assert_eq!(json["subject"], "CSS");
    assert_eq!(json["correct_answer"], 0);

    let back: Question = serde_json::from_value(json).unwrap();
    assert_eq!(back.subject, Subject::Css);
    assert_eq!(back.options.len(), 4);
}

#[cfg(test)]
mod sync_tests {
    use quiz_server::models::domain::Subject;

    #[test]
    fn test_every_subject_survives_a_parse_round_trip() {
        for subject in Subject::ALL {
            assert_eq!(Subject::parse_flexible(subject.as_str()), Some(subject));
        }
    }
}
