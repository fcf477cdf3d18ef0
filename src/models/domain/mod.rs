pub mod otp;
pub mod question;
pub mod quiz_result;
pub mod user;

pub use otp::PasswordResetOtp;
pub use question::{Question, Subject};
pub use quiz_result::{AnswerRecord, QuizResult};
pub use user::{Role, User};
