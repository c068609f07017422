use std::{net::SocketAddr, time::Duration};

use crate::{fetcher::BOT_URI, normalizer::MissingQuotePolicy, AppError, Result};

/// Настройки сервиса, читаются из переменных окружения
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub url: String,
    pub timeout: Duration,
    pub missing_quote: MissingQuotePolicy,
    pub addr: SocketAddr,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: BOT_URI.to_string(),
            timeout: Duration::from_secs(30),
            missing_quote: MissingQuotePolicy::Skip,
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_level: String::from("info"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
    /// Незаданные переменные берутся из `Settings::default()`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(url) = lookup("BOT_RATES_URL") {
            settings.url = url;
        }
        if let Some(secs) = lookup("BOT_RATES_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("BOT_RATES_TIMEOUT_SECS: {e}")))?;
            if secs == 0 {
                return Err(AppError::Config(String::from(
                    "BOT_RATES_TIMEOUT_SECS must be positive",
                )));
            }
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = lookup("BOT_RATES_MISSING_QUOTE") {
            settings.missing_quote = policy.parse()?;
        }
        if let Some(addr) = lookup("BOT_RATES_ADDR") {
            settings.addr = addr
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("BOT_RATES_ADDR: {e}")))?;
        }
        if let Some(level) = lookup("BOT_RATES_LOG") {
            settings.log_level = level;
        }
        Ok(settings)
    }
    /// Таймаут HTTP-запроса к сервису. Больше таймаута запроса к банку,
    /// чтобы медленная страница банка отдавалась как ошибка загрузки (502), а не 504.
    pub fn request_timeout(&self) -> Duration {
        self.timeout + REQUEST_TIMEOUT_MARGIN
    }
}

const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);
