use std::time::Duration;

use tracing::info;

use crate::{AppError, Result};

// url страницы с курсами Bank of Taiwan
pub const BOT_URI: &str = "https://rate.bot.com.tw/xrt?Lang=zh-TW";

/// Получение HTML страницы с курсами. Разбор документа делает экстрактор.
#[async_trait::async_trait]
pub trait RateFetcher: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    uri: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(uri: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
        .gzip(true)
        .timeout(timeout)
        .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .build()?;
        Ok(HttpFetcher {
            uri: uri.into(),
            client,
        })
    }
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[async_trait::async_trait]
impl RateFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String> {
        info!("Запрашиваю страницу курсов: {}", self.uri);
        let response = self.client.get(&self.uri).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "{} responded with {status}",
                self.uri
            )));
        }
        let body = response.text().await?;
        info!("Получено {} байт страницы курсов", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_http_fetcher_keeps_uri() -> Result<()> {
        let fetcher = HttpFetcher::new(BOT_URI, Duration::from_secs(5))?;
        assert_eq!(fetcher.uri(), BOT_URI);
        Ok(())
    }
    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() -> Result<()> {
        let fetcher = HttpFetcher::new("http://127.0.0.1:9/xrt", Duration::from_secs(2))?;
        let result = fetcher.fetch().await;
        assert!(matches!(result, Err(AppError::Fetch(_))));
        Ok(())
    }
}
