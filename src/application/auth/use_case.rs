use super::dto::{LoginRequest, LoginResponse, RegisterRequest, TwoFactorSetupResponse};
use crate::{
    domain::{
        errors::DomainError,
        user::{
            entity::{NewUser, User},
            repository::UserRepository,
            role::Actor,
            value_objects::{EmailAddress, Password, Username},
        },
    },
    infrastructure::{
        mail::traits::Mailer,
        security::{
            password::{hash_password, verify_password},
            tokens::{PendingRegistration, TokenService},
            two_factor,
        },
    },
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub struct AuthSettings {
    pub client_url: String,
    pub bcrypt_cost: u32,
    pub totp_issuer: String,
}

/// Registration with email verification, password login and TOTP
/// two-factor management.
pub struct AuthUseCase {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
    settings: AuthSettings,
}

fn verification_email(link: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h1 style="text-align: center; color: #2563EB;">Verify Your Email Address</h1>
  <p>Thank you for registering with Promptly. Confirm your email address to activate your account:</p>
  <p style="text-align: center; margin: 20px 0;"><a href="{link}">Verify My Email</a></p>
  <p>The link expires in one hour. If you did not create an account, ignore this email.</p>
</div>"#
    )
}

impl AuthUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            settings,
        }
    }

    /// Validates the registration and mails a one-hour verification link.
    /// Nothing is stored until the link is followed.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<(), DomainError> {
        let username = Username::new(request.username)?;
        let email = EmailAddress::new(request.email)?;
        let password = Password::new(request.password)?;

        if self.users.find_by_email(&email.value).await?.is_some() {
            return Err(DomainError::InvalidArgument("Email already registered".into()));
        }
        if self.users.find_by_username(&username.value).await?.is_some() {
            return Err(DomainError::InvalidArgument("Username already taken".into()));
        }

        let pending = PendingRegistration {
            username: username.value,
            email: email.value,
            password_hash: hash_password(&password.value, self.settings.bcrypt_cost)?,
            profile_picture: request
                .profile_picture
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        };
        let token = self.tokens.issue_verification_token(&pending)?;
        let link = format!(
            "{}/verify-email/{}",
            self.settings.client_url.trim_end_matches('/'),
            token
        );

        self.mailer
            .send(
                &pending.email,
                "Email Verification for Promptly",
                &verification_email(&link),
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Verification email could not be sent");
                DomainError::InfrastructureError("Failed to send verification email".into())
            })?;
        info!("Verification email sent");
        Ok(())
    }

    /// Completes a registration from its emailed token.
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<User, DomainError> {
        let pending = self.tokens.decode_verification_token(token)?;

        if self.users.find_by_email(&pending.email).await?.is_some() {
            return Err(DomainError::InvalidArgument(
                "Email is already verified or registered".into(),
            ));
        }

        let user = self
            .users
            .create(&NewUser {
                username: pending.username,
                email: pending.email,
                password_hash: pending.password_hash,
                profile_picture: pending.profile_picture,
            })
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => {
                    DomainError::InvalidArgument("Username or email already registered".into())
                }
                other => other,
            })?;
        info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// Exchanges credentials (and, when enabled, a TOTP code) for a bearer token.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, DomainError> {
        let email = request.email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !verify_password(&request.password, &user.password_hash) {
            warn!(user_id = %user.id, "Login rejected: bad password");
            return Err(DomainError::Unauthorized);
        }

        if user.two_factor_enabled {
            let secret = user.two_factor_secret.as_deref().ok_or_else(|| {
                DomainError::InfrastructureError("Two-factor enabled without a secret".into())
            })?;
            let code = request.otp.as_deref().unwrap_or_default();
            if code.is_empty() || !two_factor::verify_code(secret, code)? {
                warn!(user_id = %user.id, "Login rejected: bad one-time code");
                return Err(DomainError::Unauthorized);
            }
        }

        let token = self.tokens.issue_access_token(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse { token, user })
    }

    /// Starts enrolment: stores a fresh secret with two-factor still disabled.
    #[instrument(skip(self), fields(user_id = %actor.id))]
    pub async fn setup_two_factor(&self, actor: Actor) -> Result<TwoFactorSetupResponse, DomainError> {
        let user = self.current_user(actor).await?;
        if user.two_factor_enabled {
            return Err(DomainError::InvalidArgument(
                "Two-factor authentication is already enabled".into(),
            ));
        }

        let secret = two_factor::generate_secret();
        let otpauth_url = two_factor::otpauth_url(&secret, &self.settings.totp_issuer, &user.email)?;
        self.users
            .set_two_factor(user.id, Some(secret.clone()), false)
            .await?;
        Ok(TwoFactorSetupResponse {
            secret,
            otpauth_url,
        })
    }

    /// Confirms enrolment with a code from the authenticator.
    #[instrument(skip(self, code), fields(user_id = %actor.id))]
    pub async fn enable_two_factor(&self, actor: Actor, code: &str) -> Result<(), DomainError> {
        let user = self.current_user(actor).await?;
        let secret = user.two_factor_secret.ok_or_else(|| {
            DomainError::InvalidArgument("Two-factor setup has not been started".into())
        })?;
        if !two_factor::verify_code(&secret, code)? {
            return Err(DomainError::InvalidArgument("Invalid verification code".into()));
        }
        self.users.set_two_factor(user.id, Some(secret), true).await?;
        info!("Two-factor authentication enabled");
        Ok(())
    }

    #[instrument(skip(self, code), fields(user_id = %actor.id))]
    pub async fn disable_two_factor(&self, actor: Actor, code: &str) -> Result<(), DomainError> {
        let user = self.current_user(actor).await?;
        let secret = match (user.two_factor_enabled, user.two_factor_secret) {
            (true, Some(secret)) => secret,
            _ => {
                return Err(DomainError::InvalidArgument(
                    "Two-factor authentication is not enabled".into(),
                ));
            }
        };
        if !two_factor::verify_code(&secret, code)? {
            return Err(DomainError::InvalidArgument("Invalid verification code".into()));
        }
        self.users.set_two_factor(user.id, None, false).await?;
        info!("Two-factor authentication disabled");
        Ok(())
    }

    /// Resolves a bearer token to the caller, reading the role from storage
    /// so role changes apply to tokens already issued.
    pub async fn authenticate(&self, token: &str) -> Result<Actor, DomainError> {
        let claims = self.tokens.decode_access_token(token)?;
        let id = claims.sub.parse().map_err(|_| DomainError::Unauthorized)?;
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::Unauthorized)?;
        Ok(Actor::new(user.id, user.role))
    }

    async fn current_user(&self, actor: Actor) -> Result<User, DomainError> {
        self.users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }
}
