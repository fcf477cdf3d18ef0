use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
};

const MONGO_DUPLICATE_KEY: i32 = 11000;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn update(&self, id: ObjectId, user: User) -> AppResult<User>;
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }
}

/// Maps a unique-index violation to AlreadyExists so concurrent
/// registrations surface as a conflict rather than a 500.
fn map_insert_error(err: mongodb::error::Error) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref we)) = *err.kind {
        if we.code == MONGO_DUPLICATE_KEY {
            return AppError::AlreadyExists(
                "A user with this email or username already exists".to_string(),
            );
        }
    }
    AppError::DatabaseError(err.to_string())
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let inserted = self
            .collection
            .insert_one(&user)
            .await
            .map_err(map_insert_error)?;
        user.id = inserted.inserted_id.as_object_id();
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "google_id": google_id })
            .await?;
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn update(&self, id: ObjectId, user: User) -> AppResult<User> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &user)
            .await
            .map_err(map_insert_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                id.to_hex()
            )));
        }

        Ok(user)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                id.to_hex()
            )));
        }

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        // Sparse so OAuth accounts without a username and local accounts
        // without a google_id can coexist.
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();

        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();

        self.collection
            .create_indexes([email_index, username_index, google_id_index])
            .await?;
        log::info!("Ensured unique indexes on users collection");

        Ok(())
    }
}
