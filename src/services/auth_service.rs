use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, is_legacy_plaintext, verify_password},
        Claims, GoogleTokenVerify, JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{otp, PasswordResetOtp, User},
        dto::{
            request::{
                ForgotPasswordRequest, GoogleLoginRequest, LoginRequest, RegisterRequest,
                ResetPasswordRequest, VerifyOtpRequest,
            },
            response::{AuthResponse, MessageResponse, UserDto, VerifyOtpResponse},
        },
    },
    repositories::{OtpRepository, UserRepository},
    services::mailer::Mailer,
};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    otps: Arc<dyn OtpRepository>,
    jwt: JwtService,
    google: Arc<dyn GoogleTokenVerify>,
    mailer: Arc<dyn Mailer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        otps: Arc<dyn OtpRepository>,
        jwt: JwtService,
        google: Arc<dyn GoogleTokenVerify>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            otps,
            jwt,
            google,
            mailer,
        }
    }

    fn issue(&self, user: User) -> AppResult<AuthResponse> {
        let token = self.jwt.create_token(&user)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Shared by self-registration and admin-side user creation.
    /// Surrounding whitespace is stripped before validation, so
    /// `" johndoe "` registers as `johndoe`.
    pub async fn create_account(&self, request: &RegisterRequest) -> AppResult<User> {
        let mut request = request.clone();
        request.username = request.username.trim().to_string();
        request.email = request.email.trim().to_string();
        request.validate()?;

        let email = request.email.to_lowercase();
        let username = request.username.clone();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new_local(
            &username,
            &email,
            password_hash,
            request.role.unwrap_or_default(),
        );

        self.users.create(user).await
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let user = self.create_account(&request).await?;
        log::info!("Registered new user {}", user.email);
        self.issue(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::ValidationError("Invalid credentials".to_string()))?;

        let stored = user.password.clone().ok_or_else(|| {
            AppError::ValidationError(
                "This account uses Google Sign-In. Please use Google to login.".to_string(),
            )
        })?;

        let is_match = if is_legacy_plaintext(&stored) {
            // Legacy record: direct comparison, then upgrade to bcrypt.
            let matched = request.password == stored;
            if matched {
                user.password = Some(hash_password(&request.password)?);
                user.touch();
                let id = user.id.ok_or_else(|| {
                    AppError::InternalError("Stored user has no id".to_string())
                })?;
                user = self.users.update(id, user).await?;
                log::info!("Rehashed legacy password for {}", user.email);
            }
            matched
        } else {
            verify_password(&request.password, &stored)
        };

        if !is_match {
            return Err(AppError::ValidationError("Invalid credentials".to_string()));
        }

        self.issue(user)
    }

    pub async fn current_user(&self, claims: &Claims) -> AppResult<UserDto> {
        let id = mongodb::bson::oid::ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

        Ok(user.into())
    }

    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> AppResult<MessageResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        // Never reveal whether the account exists.
        let neutral = MessageResponse::new(
            "If the email exists, an OTP has been sent to your email address.",
        );

        let Some(_user) = self.users.find_by_email(&email).await? else {
            return Ok(neutral);
        };

        let code = otp::generate_code();
        let stored = self
            .otps
            .replace_for_email(PasswordResetOtp::new(&email, &code))
            .await?;

        if let Err(send_err) = self.mailer.send_otp_email(&email, &code).await {
            // A code nobody received must not stay redeemable.
            if let Some(id) = stored.id {
                if let Err(cleanup_err) = self.otps.delete(id).await {
                    log::error!("Failed to remove undelivered OTP: {}", cleanup_err);
                }
            }
            return Err(send_err);
        }

        Ok(MessageResponse::new(
            "OTP has been sent to your email address. Please check your inbox.",
        ))
    }

    async fn consume_valid_otp(&self, email: &str, code: &str) -> AppResult<PasswordResetOtp> {
        let record = self
            .otps
            .find_by_email_and_hash(email, &otp::hash_code(code))
            .await?
            .ok_or_else(|| AppError::ValidationError("Invalid or expired OTP".to_string()))?;

        if record.is_expired() {
            if let Some(id) = record.id {
                self.otps.delete(id).await?;
            }
            return Err(AppError::ValidationError(
                "OTP has expired. Please request a new one.".to_string(),
            ));
        }

        Ok(record)
    }

    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> AppResult<VerifyOtpResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        self.consume_valid_otp(&email, &request.otp).await?;

        Ok(VerifyOtpResponse {
            message: "OTP verified successfully".to_string(),
            verified: true,
        })
    }

    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> AppResult<MessageResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        let record = self.consume_valid_otp(&email, &request.otp).await?;

        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.password = Some(hash_password(&request.new_password)?);
        user.touch();
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("Stored user has no id".to_string()))?;
        self.users.update(id, user).await?;

        if let Some(otp_id) = record.id {
            self.otps.delete(otp_id).await?;
        }

        log::info!("Password reset completed for {}", email);
        Ok(MessageResponse::new(
            "Password has been reset successfully. You can now login with your new password.",
        ))
    }

    pub async fn google_login(&self, request: GoogleLoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let profile = self.google.verify(&request.token_id).await?;
        let email = profile.email.trim().to_lowercase();

        let existing = match self.users.find_by_google_id(&profile.sub).await? {
            Some(user) => Some(user),
            None => self.users.find_by_email(&email).await?,
        };

        let user = match existing {
            Some(mut user) => {
                if user.google_id.is_none() {
                    // Link the Google identity to an existing local account.
                    user.google_id = Some(profile.sub.clone());
                    user.profile_picture = profile.picture.clone();
                    if user.username.is_none() {
                        user.username = Some(default_username(&profile.name, &email));
                    }
                    user.touch();
                    let id = user.id.ok_or_else(|| {
                        AppError::InternalError("Stored user has no id".to_string())
                    })?;
                    user = self.users.update(id, user).await?;
                }
                user
            }
            None => {
                let user = User::from_google(
                    profile.sub.clone(),
                    &email,
                    default_username(&profile.name, &email),
                    profile.picture.clone(),
                );
                self.users.create(user).await?
            }
        };

        log::info!("Google sign-in for {}", user.email);
        self.issue(user)
    }
}

fn default_username(name: &Option<String>, email: &str) -> String {
    name.clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_username_prefers_profile_name() {
        assert_eq!(
            default_username(&Some("Jane Doe".to_string()), "jane@example.com"),
            "Jane Doe"
        );
        assert_eq!(default_username(&None, "jane@example.com"), "jane");
        assert_eq!(
            default_username(&Some("  ".to_string()), "jane@example.com"),
            "jane"
        );
    }
}
