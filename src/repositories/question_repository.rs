use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Question, Subject},
};

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Question>>;
    /// Full documents, newest first, optionally narrowed to one subject.
    async fn find_all(&self, subject: Option<Subject>) -> AppResult<Vec<Question>>;
    async fn update(&self, id: ObjectId, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, mut question: Question) -> AppResult<Question> {
        let inserted = self.collection.insert_one(&question).await?;
        question.id = inserted.inserted_id.as_object_id();
        Ok(question)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(question)
    }

    async fn find_all(&self, subject: Option<Subject>) -> AppResult<Vec<Question>> {
        let filter = match subject {
            Some(s) => doc! { "subject": s.as_str() },
            None => doc! {},
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn update(&self, id: ObjectId, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &question)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        Ok(question)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        Ok(())
    }
}
