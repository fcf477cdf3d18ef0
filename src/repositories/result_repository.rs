use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuizResult, Subject},
};

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<QuizResult>>;
    /// A user's results, newest first, optionally narrowed to one subject.
    async fn find_by_user(
        &self,
        user_id: ObjectId,
        subject: Option<Subject>,
    ) -> AppResult<Vec<QuizResult>>;
    /// Highest score wins; recency breaks ties.
    async fn find_best(&self, user_id: ObjectId, subject: Subject)
        -> AppResult<Option<QuizResult>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("results");
        Self { collection }
    }
}

#[async_trait]
impl ResultRepository for MongoResultRepository {
    async fn create(&self, mut result: QuizResult) -> AppResult<QuizResult> {
        let inserted = self.collection.insert_one(&result).await?;
        result.id = inserted.inserted_id.as_object_id();
        Ok(result)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<QuizResult>> {
        let result = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(result)
    }

    async fn find_by_user(
        &self,
        user_id: ObjectId,
        subject: Option<Subject>,
    ) -> AppResult<Vec<QuizResult>> {
        let mut filter = doc! { "user_id": user_id };
        if let Some(s) = subject {
            filter.insert("subject", s.as_str());
        }

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?;
        let results: Vec<QuizResult> = cursor.try_collect().await?;
        Ok(results)
    }

    async fn find_best(
        &self,
        user_id: ObjectId,
        subject: Subject,
    ) -> AppResult<Option<QuizResult>> {
        let result = self
            .collection
            .find_one(doc! { "user_id": user_id, "subject": subject.as_str() })
            .sort(doc! { "score": -1, "created_at": -1 })
            .await?;
        Ok(result)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "subject": 1, "created_at": -1 })
            .build();

        self.collection.create_index(index).await?;
        log::info!("Ensured index on results collection");

        Ok(())
    }
}
