pub mod auth_service;
pub mod mailer;
pub mod question_service;
pub mod result_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use mailer::{HttpMailer, Mailer};
pub use question_service::QuestionService;
pub use result_service::ResultService;
pub use user_service::UserService;
