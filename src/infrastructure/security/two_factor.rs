use crate::domain::errors::DomainError;
use totp_rs::{Algorithm, Secret, TOTP};

const TOTP_DIGITS: usize = 6;
const TOTP_STEP: u64 = 30;
const TOTP_SKEW: u8 = 1;

/// Base32 secret for a new authenticator enrolment.
pub fn generate_secret() -> String {
    Secret::generate_secret().to_encoded().to_string()
}

fn build_totp(
    secret_base32: &str,
    issuer: Option<String>,
    account: String,
) -> Result<TOTP, DomainError> {
    let bytes = Secret::Encoded(secret_base32.to_string())
        .to_bytes()
        .map_err(|e| DomainError::InfrastructureError(format!("Invalid secret: {}", e)))?;
    TOTP::new(
        Algorithm::SHA1,
        TOTP_DIGITS,
        TOTP_SKEW,
        TOTP_STEP,
        bytes,
        issuer,
        account,
    )
    .map_err(|e| DomainError::InfrastructureError(format!("Failed to create TOTP: {}", e)))
}

/// `otpauth://` URI for authenticator apps.
pub fn otpauth_url(secret_base32: &str, issuer: &str, account: &str) -> Result<String, DomainError> {
    Ok(build_totp(secret_base32, Some(issuer.to_string()), account.to_string())?.get_url())
}

pub fn verify_code(secret_base32: &str, code: &str) -> Result<bool, DomainError> {
    let totp = build_totp(secret_base32, None, String::new())?;
    Ok(totp.check_current(code.trim()).unwrap_or(false))
}
