use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use quiz_server::{
    app_state::AppState, auth::AuthMiddleware, config::Config, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.allowed_origin.clone();

    let state = Arc::new(
        AppState::new(config)
            .await
            .unwrap_or_else(|e| panic!("failed to initialize application state: {}", e)),
    );
    let jwt_service = state.jwt_service.clone();

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            // Liveness/readiness and the credential endpoints stay public.
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::register)
            .service(handlers::login)
            .service(handlers::forgot_password)
            .service(handlers::verify_otp)
            .service(handlers::reset_password)
            .service(handlers::google_login)
            // Everything else requires a valid bearer token.
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .service(handlers::me)
                    .service(handlers::list_users)
                    .service(handlers::create_user)
                    .service(handlers::update_role)
                    .service(handlers::get_user)
                    .service(handlers::update_user)
                    .service(handlers::delete_user)
                    // Static question routes before the {id} catch-all.
                    .service(handlers::list_questions_admin)
                    .service(handlers::list_questions_for_subject)
                    .service(handlers::submit_answers)
                    .service(handlers::create_question)
                    .service(handlers::get_question)
                    .service(handlers::update_question)
                    .service(handlers::delete_question)
                    .service(handlers::my_results)
                    .service(handlers::best_score)
                    .service(handlers::save_result)
                    .service(handlers::get_result),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
