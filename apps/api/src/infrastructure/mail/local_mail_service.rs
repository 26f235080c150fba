use super::traits::MailService;
use async_trait::async_trait;

/// Writes mail to the log instead of sending it.
#[derive(Debug, Clone)]
pub struct LocalMailService {
    mail_to: String,
    mail_from: String,
}

impl LocalMailService {
    pub fn new(mail_to: String, mail_from: String) -> Self {
        Self { mail_to, mail_from }
    }
}

#[async_trait]
impl MailService for LocalMailService {
    async fn send(&self, subject: &str, message: &str) -> anyhow::Result<()> {
        tracing::info!(
            from = %self.mail_from,
            to = %self.mail_to,
            subject,
            message,
            "Mail sent with LocalMailService"
        );
        Ok(())
    }
}
