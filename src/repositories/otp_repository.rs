use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::PasswordResetOtp};

#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Stores a fresh OTP, invalidating any earlier codes for the email.
    async fn replace_for_email(&self, otp: PasswordResetOtp) -> AppResult<PasswordResetOtp>;
    async fn find_by_email_and_hash(
        &self,
        email: &str,
        otp_hash: &str,
    ) -> AppResult<Option<PasswordResetOtp>>;
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoOtpRepository {
    collection: Collection<PasswordResetOtp>,
}

impl MongoOtpRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("otps");
        Self { collection }
    }
}

#[async_trait]
impl OtpRepository for MongoOtpRepository {
    async fn replace_for_email(&self, mut otp: PasswordResetOtp) -> AppResult<PasswordResetOtp> {
        self.collection
            .delete_many(doc! { "email": &otp.email })
            .await?;

        let inserted = self.collection.insert_one(&otp).await?;
        otp.id = inserted.inserted_id.as_object_id();
        Ok(otp)
    }

    async fn find_by_email_and_hash(
        &self,
        email: &str,
        otp_hash: &str,
    ) -> AppResult<Option<PasswordResetOtp>> {
        let otp = self
            .collection
            .find_one(doc! { "email": email, "otp_hash": otp_hash })
            .await?;
        Ok(otp)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let lookup_index = IndexModel::builder()
            .keys(doc! { "email": 1, "otp_hash": 1 })
            .build();

        // Mongo reaps expired codes; the service still checks expiry itself
        // since the TTL monitor only runs periodically.
        let ttl_index = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::from_secs(0))
                    .build(),
            )
            .build();

        self.collection
            .create_indexes([lookup_index, ttl_index])
            .await?;
        log::info!("Ensured indexes on otps collection");

        Ok(())
    }
}
