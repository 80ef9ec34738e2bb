use super::traits::Mailer;
use async_trait::async_trait;

/// Writes outgoing mail to the log instead of delivering it.
///
/// Verification links only reach the log, so registration cannot be
/// completed by real users until another `Mailer` that actually delivers
/// mail is wired in at startup.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        tracing::info!(
            to = %to,
            subject = %subject,
            body_len = html_body.len(),
            "Email queued for delivery"
        );
        tracing::debug!(body = %html_body, "Email body");
        Ok(())
    }
}
