use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    auth::{password::hash_password, Claims},
    errors::{AppError, AppResult},
    models::dto::{
        request::{UpdateRoleRequest, UpdateUserRequest},
        response::{MessageResponse, UserDto},
    },
    repositories::UserRepository,
};

/// Admin-side account management. Role gating happens in the handlers;
/// the self-service guards (own role, own account) live here because they
/// depend on the acting user, not just their role.
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn get_user(&self, id: &str) -> AppResult<UserDto> {
        let oid = ObjectId::parse_str(id)?;
        let user = self
            .users
            .find_by_id(oid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    pub async fn update_user(
        &self,
        actor: &Claims,
        id: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UserDto> {
        request.validate()?;
        let oid = ObjectId::parse_str(id)?;

        let mut user = self
            .users
            .find_by_id(oid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(role) = request.role {
            if actor.sub == id && role != user.role {
                return Err(AppError::ValidationError(
                    "You cannot change your own role".to_string(),
                ));
            }
            user.role = role;
        }
        if let Some(username) = request.username {
            user.username = Some(username.trim().to_string());
        }
        if let Some(email) = request.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(password) = request.password {
            // Empty string means "leave the password alone".
            if !password.trim().is_empty() {
                if password.len() < 6 {
                    return Err(AppError::ValidationError(
                        "Password must be at least 6 characters long".to_string(),
                    ));
                }
                user.password = Some(hash_password(&password)?);
            }
        }
        user.touch();

        let updated = self.users.update(oid, user).await?;
        Ok(updated.into())
    }

    pub async fn update_role(
        &self,
        actor: &Claims,
        id: &str,
        request: UpdateRoleRequest,
    ) -> AppResult<UserDto> {
        if actor.sub == id {
            return Err(AppError::ValidationError(
                "You cannot change your own role".to_string(),
            ));
        }

        let oid = ObjectId::parse_str(id)?;
        let mut user = self
            .users
            .find_by_id(oid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.role = request.role;
        user.touch();

        let updated = self.users.update(oid, user).await?;
        Ok(updated.into())
    }

    pub async fn delete_user(&self, actor: &Claims, id: &str) -> AppResult<MessageResponse> {
        if actor.sub == id {
            return Err(AppError::ValidationError(
                "You cannot delete your own account".to_string(),
            ));
        }

        let oid = ObjectId::parse_str(id)?;
        self.users.delete(oid).await?;

        log::info!("User {} deleted by {}", id, actor.sub);
        Ok(MessageResponse::new("User deleted successfully"))
    }
}
