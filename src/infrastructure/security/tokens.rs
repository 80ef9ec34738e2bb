use crate::domain::{errors::DomainError, user::entity::User};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims of the bearer token handed out at login.
///
/// `role` reflects the role at issuance only; authorization re-reads the
/// current role from the Identity Store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// A registration waiting for its email address to be confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingRegistration {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VerificationClaims {
    #[serde(flatten)]
    registration: PendingRegistration,
    exp: usize,
}

#[derive(Clone)]
pub struct TokenService {
    jwt_secret: String,
    email_secret: String,
    access_ttl: Duration,
    verification_ttl: Duration,
}

impl TokenService {
    pub fn new(jwt_secret: String, email_secret: String, access_ttl_hours: i64) -> Self {
        Self {
            jwt_secret,
            email_secret,
            access_ttl: Duration::hours(access_ttl_hours),
            verification_ttl: Duration::hours(1),
        }
    }

    pub fn issue_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = UserClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: (Utc::now() + self.access_ttl).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| DomainError::InfrastructureError(format!("Token generation failed: {}", e)))
    }

    pub fn decode_access_token(&self, token: &str) -> Result<UserClaims, DomainError> {
        decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|d| d.claims)
        .map_err(|_| DomainError::Unauthorized)
    }

    pub fn issue_verification_token(
        &self,
        registration: &PendingRegistration,
    ) -> Result<String, DomainError> {
        let claims = VerificationClaims {
            registration: registration.clone(),
            exp: (Utc::now() + self.verification_ttl).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.email_secret.as_bytes()),
        )
        .map_err(|e| DomainError::InfrastructureError(format!("Token generation failed: {}", e)))
    }

    pub fn decode_verification_token(
        &self,
        token: &str,
    ) -> Result<PendingRegistration, DomainError> {
        decode::<VerificationClaims>(
            token,
            &DecodingKey::from_secret(self.email_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|d| d.claims.registration)
        .map_err(|_| DomainError::InvalidArgument("Invalid or expired token".into()))
    }
}
