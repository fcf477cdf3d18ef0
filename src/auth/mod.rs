pub mod claims;
pub mod google;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use claims::Claims;
pub use google::{GoogleProfile, GoogleTokenVerifier, GoogleTokenVerify};
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use permissions::{require_content_editor, require_user_admin};
