use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::question::Subject;
use crate::models::domain::user::Role;

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^\S+(?:\s\S+)*$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters long"))]
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username contains invalid whitespace"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 6, message = "OTP must be 6 digits"))]
    pub otp: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "Google token is required"))]
    pub token_id: String,
}

/// Admin-side user creation carries the same shape as self-registration.
pub type CreateUserRequest = RegisterRequest;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters long"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Empty or missing means keep the current password.
    pub password: Option<String>,

    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub question: String,

    pub subject: Subject,

    pub options: Vec<String>,

    pub correct_answer: u32,

    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question: Option<String>,
    pub subject: Option<Subject>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<u32>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_answer: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveAnswerRecord {
    pub question_id: String,
    pub selected_answer: u32,
    pub correct_answer: u32,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveResultRequest {
    pub subject: Subject,

    #[validate(range(max = 100, message = "Score must be between 0 and 100"))]
    pub score: u32,

    pub correct_count: u32,

    #[validate(range(min = 1, message = "Total questions must be positive"))]
    pub total_questions: u32,

    #[serde(default)]
    pub answers: Vec<SaveAnswerRecord>,

    pub time_spent_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectFilter {
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            username: "johndoe".to_string(),
            email: "john@example.com".to_string(),
            password: "secret1".to_string(),
            role: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let request = RegisterRequest {
            username: "johndoe".to_string(),
            email: "invalid-email".to_string(),
            password: "secret1".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_username_too_short() {
        let request = RegisterRequest {
            username: "ab".to_string(),
            email: "john@example.com".to_string(),
            password: "secret1".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_password_too_short() {
        let request = RegisterRequest {
            username: "johndoe".to_string(),
            email: "john@example.com".to_string(),
            password: "12345".to_string(),
            role: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_accepts_role() {
        let json = r#"{"username":"boss","email":"boss@example.com","password":"secret1","role":"manager"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.role, Some(Role::Manager));
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let json = r#"{"username":"boss","email":"boss@example.com","password":"secret1","role":"owner"}"#;
        assert!(serde_json::from_str::<RegisterRequest>(json).is_err());
    }

    #[test]
    fn test_otp_length_validation() {
        let request = VerifyOtpRequest {
            email: "john@example.com".to_string(),
            otp: "1234".to_string(),
        };
        assert!(request.validate().is_err());

        let request = VerifyOtpRequest {
            email: "john@example.com".to_string(),
            otp: "123456".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_save_result_score_range() {
        let request = SaveResultRequest {
            subject: Subject::Css,
            score: 101,
            correct_count: 5,
            total_questions: 5,
            answers: vec![],
            time_spent_secs: None,
        };
        assert!(request.validate().is_err());
    }
}
