use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Subjects a question bank can cover. Wire values keep the display names
/// the question bank was seeded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    JavaScript,
    React,
    #[serde(rename = "Node.js")]
    NodeJs,
    #[serde(rename = "MongoDB")]
    MongoDb,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Html,
        Subject::Css,
        Subject::JavaScript,
        Subject::React,
        Subject::NodeJs,
        Subject::MongoDb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Html => "HTML",
            Subject::Css => "CSS",
            Subject::JavaScript => "JavaScript",
            Subject::React => "React",
            Subject::NodeJs => "Node.js",
            Subject::MongoDb => "MongoDB",
        }
    }

    /// Case-insensitive parse accepting the aliases clients send
    /// ("nodejs", "Node.js", "NODEJS" all mean the same subject).
    pub fn parse_flexible(value: &str) -> Option<Subject> {
        match value.trim().to_lowercase().as_str() {
            "html" => Some(Subject::Html),
            "css" => Some(Subject::Css),
            "javascript" => Some(Subject::JavaScript),
            "react" => Some(Subject::React),
            "node.js" | "nodejs" => Some(Subject::NodeJs),
            "mongodb" => Some(Subject::MongoDb),
            _ => None,
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every question has exactly this many options.
pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub question: String,
    pub subject: Subject,
    pub options: Vec<String>,
    pub correct_answer: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(
        question: &str,
        subject: Subject,
        options: Vec<String>,
        correct_answer: u32,
        explanation: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Question {
            id: None,
            question: question.trim().to_string(),
            subject,
            options,
            correct_answer,
            explanation: explanation.map(|e| e.trim().to_string()),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
impl Question {
    pub fn test_question(subject: Subject, correct_answer: u32) -> Self {
        Question::new(
            "What does the M in MERN stand for?",
            subject,
            vec![
                "MySQL".to_string(),
                "MongoDB".to_string(),
                "Memcached".to_string(),
                "MariaDB".to_string(),
            ],
            correct_answer,
            Some("MongoDB is the document store in the MERN stack.".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_wire_names() {
        assert_eq!(serde_json::to_string(&Subject::NodeJs).unwrap(), "\"Node.js\"");
        assert_eq!(serde_json::to_string(&Subject::Html).unwrap(), "\"HTML\"");
        let s: Subject = serde_json::from_str("\"MongoDB\"").unwrap();
        assert_eq!(s, Subject::MongoDb);
    }

    #[test]
    fn test_subject_parse_flexible() {
        assert_eq!(Subject::parse_flexible("nodejs"), Some(Subject::NodeJs));
        assert_eq!(Subject::parse_flexible("Node.js"), Some(Subject::NodeJs));
        assert_eq!(Subject::parse_flexible("HTML"), Some(Subject::Html));
        assert_eq!(Subject::parse_flexible(" javascript "), Some(Subject::JavaScript));
        assert_eq!(Subject::parse_flexible("fortran"), None);
    }

    #[test]
    fn test_question_trims_text() {
        let q = Question::new(
            "  What is CSS?  ",
            Subject::Css,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            0,
            Some("  style sheets  ".to_string()),
        );
        assert_eq!(q.question, "What is CSS?");
        assert_eq!(q.explanation.as_deref(), Some("style sheets"));
        assert_eq!(q.options.len(), OPTION_COUNT);
    }
}
