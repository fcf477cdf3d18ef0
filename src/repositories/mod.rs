pub mod otp_repository;
pub mod question_repository;
pub mod result_repository;
pub mod user_repository;

pub use otp_repository::{MongoOtpRepository, OtpRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use result_repository::{MongoResultRepository, ResultRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
