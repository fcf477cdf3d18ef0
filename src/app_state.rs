use std::sync::Arc;

use crate::{
    auth::{GoogleTokenVerifier, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoOtpRepository, MongoQuestionRepository, MongoResultRepository, MongoUserRepository,
        OtpRepository, ResultRepository, UserRepository,
    },
    services::{AuthService, HttpMailer, QuestionService, ResultService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub question_service: Arc<QuestionService>,
    pub result_service: Arc<ResultService>,
    pub jwt_service: JwtService,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let otp_repository = Arc::new(MongoOtpRepository::new(&db));
        otp_repository.ensure_indexes().await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));

        let result_repository = Arc::new(MongoResultRepository::new(&db));
        result_repository.ensure_indexes().await?;

        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
        let google_verifier = Arc::new(GoogleTokenVerifier::new(&config.google_client_id));
        let mailer = Arc::new(HttpMailer::new(&config));

        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            otp_repository,
            jwt_service.clone(),
            google_verifier,
            mailer,
        ));
        let user_service = Arc::new(UserService::new(user_repository));
        let question_service = Arc::new(QuestionService::new(question_repository.clone()));
        let result_service = Arc::new(ResultService::new(result_repository, question_repository));

        Ok(Self {
            auth_service,
            user_service,
            question_service,
            result_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
