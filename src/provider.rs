use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    extractor,
    fetcher::RateFetcher,
    localization::{LocaleStore, UNSUPPORTED_CURRENCY_KEY, UNSUPPORTED_CURRENCY_TEXT},
    models::NormalizedRate,
    normalizer::{MissingQuotePolicy, Normalizer},
    schema::PageSchema,
    AppError, Result,
};

/// Источник курсов валют, подключаемый к платформе
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    fn system_name(&self) -> &str;
    async fn get_currency_live_rates(&self, target: &str) -> Result<Vec<NormalizedRate>>;
}

/// Внешние зависимости провайдера, передаются явно
#[derive(Clone)]
pub struct Capabilities {
    pub fetcher: Arc<dyn RateFetcher>,
    pub locales: Arc<dyn LocaleStore>,
}

#[derive(Clone)]
pub struct BotRateProvider {
    capabilities: Capabilities,
    schema: PageSchema,
    policy: MissingQuotePolicy,
}

impl BotRateProvider {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            schema: PageSchema::bank_of_taiwan(),
            policy: MissingQuotePolicy::default(),
        }
    }
    pub fn with_policy(mut self, policy: MissingQuotePolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn with_schema(mut self, schema: PageSchema) -> Self {
        self.schema = schema;
        self
    }
    /// Базовая валюта задаётся страницей банка, а не настройками
    pub fn base_currency(&self) -> &str {
        self.schema.base_currency
    }
    pub fn install(&self) {
        self.capabilities
            .locales
            .add_or_update_resource(UNSUPPORTED_CURRENCY_KEY, UNSUPPORTED_CURRENCY_TEXT);
        info!("Провайдер курсов BOT установлен");
    }
    pub fn uninstall(&self) {
        self.capabilities
            .locales
            .delete_resource(UNSUPPORTED_CURRENCY_KEY);
        info!("Провайдер курсов BOT удалён");
    }
}

#[async_trait::async_trait]
impl ExchangeRateProvider for BotRateProvider {
    fn system_name(&self) -> &str {
        "ExchangeRate.BotExchange"
    }
    #[instrument(name = "bot live rates", skip(self))]
    async fn get_currency_live_rates(&self, target: &str) -> Result<Vec<NormalizedRate>> {
        let target = target.trim();
        if target.is_empty() {
            return Err(AppError::NullInput);
        }
        let html = self.capabilities.fetcher.fetch().await?;
        let rows = extractor::extract(&html, &self.schema)?;
        info!("Получено {} строк курсов", rows.len());
        let normalizer = Normalizer {
            base_currency: self.schema.base_currency,
            observed_at: chrono::Utc::now(),
            policy: self.policy,
            locales: self.capabilities.locales.as_ref(),
        };
        normalizer.normalize(rows, target)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::localization::InMemoryLocaleStore;
    use anyhow::Result;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct StubFetcher {
        pub html: String,
        pub calls: AtomicUsize,
    }
    impl StubFetcher {
        pub fn fixture() -> Arc<Self> {
            let html = std::fs::read_to_string("input_for_tests/bot_rates.html")
                .expect("fixture input_for_tests/bot_rates.html");
            Arc::new(Self {
                html,
                calls: AtomicUsize::new(0),
            })
        }
    }
    #[async_trait::async_trait]
    impl RateFetcher for StubFetcher {
        async fn fetch(&self) -> crate::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.html.clone())
        }
    }

    pub fn provider(fetcher: Arc<dyn RateFetcher>) -> BotRateProvider {
        let locales = Arc::new(InMemoryLocaleStore::new());
        let provider = BotRateProvider::new(Capabilities { fetcher, locales });
        provider.install();
        provider
    }

    #[tokio::test]
    async fn test_live_rates_in_base_currency() -> Result<()> {
        let provider = provider(StubFetcher::fixture());
        let rates = provider.get_currency_live_rates("twd").await?;
        let codes = rates.iter().map(|r| r.currency_code.as_str()).collect::<Vec<_>>();
        assert_eq!(codes, vec!["TWD", "USD", "HKD", "JPY", "KRW", "ZAR"]);
        assert_eq!(rates[0].rate, Decimal::ONE);
        assert_eq!(rates[1].rate, dec!(0.032));
        assert_eq!(rates[4].rate, dec!(1) / dec!(0.0201));
        assert_eq!(rates[5].rate, dec!(1) / dec!(1.74));
        Ok(())
    }
    #[tokio::test]
    async fn test_live_rates_rebased() -> Result<()> {
        let provider = provider(StubFetcher::fixture());
        let base = provider.get_currency_live_rates("TWD").await?;
        let rebased = provider.get_currency_live_rates("usd").await?;
        assert_eq!(rebased.len(), base.len());
        for (original, r) in base.iter().zip(rebased.iter()) {
            assert_eq!(original.currency_code, r.currency_code);
            assert_eq!(r.rate, (original.rate / dec!(0.032)).round_dp(4));
        }
        assert_eq!(rebased[0].rate, dec!(31.25));
        assert_eq!(rebased[1].rate, dec!(1.0000));
        Ok(())
    }
    #[tokio::test]
    async fn test_base_currency_comes_from_page_schema() -> Result<()> {
        let provider = provider(StubFetcher::fixture());
        assert_eq!(provider.base_currency(), "TWD");
        let rebased = provider.get_currency_live_rates("USD").await?;
        let usd = rebased.iter().filter(|r| r.currency_code == "USD").count();
        assert_eq!(usd, 1);
        assert_eq!(rebased[0].currency_code, "TWD");
        assert!(provider.get_currency_live_rates("twd").await.is_ok());
        let hkd_page = provider.with_schema(PageSchema {
            base_currency: "HKD",
            ..PageSchema::bank_of_taiwan()
        });
        assert_eq!(hkd_page.base_currency(), "HKD");
        let rates = hkd_page.get_currency_live_rates("hkd").await?;
        assert_eq!(rates[0].currency_code, "HKD");
        assert_eq!(rates[0].rate, Decimal::ONE);
        Ok(())
    }
    #[tokio::test]
    async fn test_empty_target_rejected_before_fetch() -> Result<()> {
        let fetcher = StubFetcher::fixture();
        let provider = provider(fetcher.clone());
        let result = provider.get_currency_live_rates("  ").await;
        assert!(matches!(result, Err(AppError::NullInput)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        Ok(())
    }
    #[tokio::test]
    async fn test_unsupported_currency_after_install_and_uninstall() -> Result<()> {
        let provider = provider(StubFetcher::fixture());
        match provider.get_currency_live_rates("EUR").await {
            Err(AppError::UnsupportedCurrency(message)) => {
                assert_eq!(message, UNSUPPORTED_CURRENCY_TEXT)
            }
            other => panic!("unexpected result: {other:?}"),
        }
        provider.uninstall();
        match provider.get_currency_live_rates("EUR").await {
            Err(AppError::UnsupportedCurrency(message)) => {
                assert_eq!(message, UNSUPPORTED_CURRENCY_KEY)
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }
    #[tokio::test]
    async fn test_malformed_page_propagates() -> Result<()> {
        let fetcher = Arc::new(StubFetcher {
            html: String::from("<html><body>系統維護中</body></html>"),
            calls: AtomicUsize::new(0),
        });
        let provider = provider(fetcher);
        let result = provider.get_currency_live_rates("USD").await;
        assert!(matches!(result, Err(AppError::MalformedPage(_))));
        Ok(())
    }
    #[tokio::test]
    async fn test_behind_trait_object() -> Result<()> {
        let provider: Arc<dyn ExchangeRateProvider> = Arc::new(provider(StubFetcher::fixture()));
        assert_eq!(provider.system_name(), "ExchangeRate.BotExchange");
        let rates = provider.get_currency_live_rates("JPY").await?;
        let jpy = rates
            .iter()
            .find(|r| r.currency_code == "JPY")
            .map(|r| r.rate);
        assert_eq!(jpy, Some(dec!(1)));
        Ok(())
    }
}
