use async_trait::async_trait;

/// Outbound notification channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailService: Send + Sync {
    async fn send(&self, subject: &str, message: &str) -> anyhow::Result<()>;
}
