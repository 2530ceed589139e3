//! Authentication for the Tandem service core.
//!
//! Provides sign-up with an attached profile payload, email/password
//! sign-in, and stateless JWT session tokens. Sign-out is client-side token
//! discard; `refresh` re-validates a token and re-fetches the profile.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::directory::{blank_to_none, parse_list, NewProfile, Profile, Role};
use crate::error::{AuthError, Result, ValidationError};
use crate::store::Store;

// ============================================================================
// Auth Types
// ============================================================================

/// A stored sign-in credential backing a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The profile this credential signs in as.
    pub user_id: String,
    /// Sign-in email, stored lowercase.
    pub email: String,
    /// SHA-256 hex digest of the password.
    pub password_hash: String,
    /// When the credential was created.
    pub created_at: DateTime<Utc>,
}

/// Authentication context of a validated caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthContext {
    /// The signed-in user.
    pub user_id: String,
    /// The user's directory role.
    pub role: Role,
}

impl AuthContext {
    /// Create an authenticated context.
    pub fn authenticated(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Check if the caller is a mentor.
    pub fn is_mentor(&self) -> bool {
        self.role == Role::Mentor
    }

    /// Check if the caller is a mentee.
    pub fn is_mentee(&self) -> bool {
        self.role == Role::Mentee
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user id).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Directory role.
    pub role: Role,
}

/// A signed-in session: token plus the profile it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The signed-in profile.
    pub profile: Profile,
}

// ============================================================================
// Authenticator
// ============================================================================

/// Validates credentials and issues session tokens.
pub struct Authenticator {
    store: Arc<dyn Store>,
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator over the given store.
    pub fn new(store: Arc<dyn Store>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Register a new account with its attached profile payload.
    ///
    /// The credential and profile are two independent writes, profile first,
    /// so a half-registered account is a profile without a credential.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        payload: NewProfile,
    ) -> Result<AuthSession> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }
        if !email.contains('@') {
            return Err(ValidationError::Invalid {
                field: "email",
                reason: "not an email address".to_string(),
            }
            .into());
        }
        if password.len() < self.config.min_password_len {
            return Err(ValidationError::Invalid {
                field: "password",
                reason: format!("must be at least {} characters", self.config.min_password_len),
            }
            .into());
        }
        if payload.full_name.trim().is_empty() {
            return Err(ValidationError::MissingField("full_name").into());
        }

        if self.store.find_credential(&email).await?.is_some() {
            return Err(AuthError::EmailTaken(email).into());
        }

        let mut profile = Profile::new(&email, payload.full_name.trim(), payload.role)
            .with_bio(payload.bio)
            .with_expertise(parse_list(&payload.expertise_areas))
            .with_goals(parse_list(&payload.learning_goals));
        profile.department = blank_to_none(&payload.department);
        profile.job_title = blank_to_none(&payload.job_title);

        let profile = self.store.insert_profile(profile).await?;
        self.store
            .insert_credential(Credential {
                user_id: profile.id.clone(),
                email: email.clone(),
                password_hash: hash_password(password),
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!("Registered {} as {}", email, profile.role);

        let token = self.issue_token(&profile)?;
        Ok(AuthSession { token, profile })
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let credential = self
            .store
            .find_credential(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &credential.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let profile = self
            .store
            .get_profile(&credential.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::info!("Signed in {}", email);

        let token = self.issue_token(&profile)?;
        Ok(AuthSession { token, profile })
    }

    /// Discard a session.
    ///
    /// Tokens are stateless, so there is nothing to revoke server-side; the
    /// call validates the token and logs the event.
    pub fn sign_out(&self, token: &str) -> Result<()> {
        let ctx = self.verify(token)?;
        tracing::info!("Signed out {}", ctx.user_id);
        Ok(())
    }

    /// Validate a session token into an [`AuthContext`].
    pub fn verify(&self, token: &str) -> Result<AuthContext> {
        let secret = self.jwt_secret()?;

        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_audience(&[&self.config.jwt_audience]);

        if self.config.token_expiry_secs == 0 {
            validation.validate_exp = false;
        }

        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let claims = token_data.claims;
        Ok(AuthContext::authenticated(claims.sub, claims.role))
    }

    /// Re-validate a token and re-fetch the profile behind it.
    pub async fn refresh(&self, token: &str) -> Result<AuthSession> {
        let ctx = self.verify(token)?;

        let profile = self
            .store
            .get_profile(&ctx.user_id)
            .await?
            .ok_or_else(|| AuthError::InvalidToken("profile no longer exists".to_string()))?;

        let token = self.issue_token(&profile)?;
        Ok(AuthSession { token, profile })
    }

    /// Issue a session token for a profile.
    fn issue_token(&self, profile: &Profile) -> Result<String> {
        let secret = self.jwt_secret()?;
        let now = Utc::now();
        let expiry = if self.config.token_expiry_secs > 0 {
            now + Duration::seconds(self.config.token_expiry_secs as i64)
        } else {
            now + Duration::days(365)
        };

        let claims = JwtClaims {
            sub: profile.id.clone(),
            iss: self.config.jwt_issuer.clone(),
            aud: self.config.jwt_audience.clone(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            role: profile.role,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()).into())
    }

    /// Get the JWT secret from config or environment.
    fn jwt_secret(&self) -> Result<String> {
        if !self.config.jwt_secret.is_empty() {
            return Ok(self.config.jwt_secret.clone());
        }

        std::env::var("TANDEM_JWT_SECRET").map_err(|_| AuthError::MissingSecret.into())
    }
}

/// SHA-256 hex digest of a password.
fn hash_password(password: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a password against a stored digest.
fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password) == hash
}

/// Simple hex encoding (to avoid adding another dependency).
mod hex {
    pub fn encode(data: impl AsRef<[u8]>) -> String {
        data.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
