use crate::models::domain::{Question, Role, Subject, User};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test user
    pub fn test_user() -> User {
        User::test_user("testuser", "test@example.com")
    }

    /// Creates a test user with a given role
    pub fn test_user_with_role(username: &str, role: Role) -> User {
        User::test_user_with_role(username, role)
    }

    /// Creates a small question bank covering two subjects
    pub fn test_questions() -> Vec<Question> {
        vec![
            Question::test_question(Subject::Html, 0),
            Question::test_question(Subject::Html, 2),
            Question::test_question(Subject::MongoDb, 1),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::{Role, Subject};

    #[test]
    fn test_fixtures_test_user() {
        let user = test_user();
        assert_eq!(user.username.as_deref(), Some("testuser"));
        assert_eq!(user.email, "test@example.com");
    }

    #[test]
    fn test_fixtures_test_user_with_role() {
        let user = test_user_with_role("boss", Role::Admin);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "boss@example.com");
    }

    #[test]
    fn test_fixtures_test_questions() {
        let questions = test_questions();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].subject, Subject::Html);
        assert_eq!(questions[2].subject, Subject::MongoDb);
    }
}
