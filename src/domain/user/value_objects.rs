use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Username {
    #[validate(length(min = 3, max = 30), regex(path = *USERNAME_REGEX))]
    pub value: String,
}

impl Username {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let username = Self {
            value: value.trim().to_string(),
        };
        username.validate()?;
        Ok(username)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailAddress {
    #[validate(email)]
    pub value: String,
}

impl EmailAddress {
    /// Normalizes to trimmed lowercase before validating.
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let email = Self {
            value: value.trim().to_lowercase(),
        };
        email.validate()?;
        Ok(email)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct Password {
    #[validate(length(min = 6, max = 128))]
    pub value: String,
}

impl Password {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let password = Self { value };
        password.validate()?;
        Ok(password)
    }
}
