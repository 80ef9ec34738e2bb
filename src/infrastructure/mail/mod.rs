pub mod log_mailer;
pub mod traits;
