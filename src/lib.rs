mod error;
pub use error::{AppError, Result};
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod localization;
pub mod models;
pub mod normalizer;
pub mod provider;
pub mod routes;
pub mod schema;

use std::sync::Arc;

use config::Settings;
use fetcher::HttpFetcher;
use localization::InMemoryLocaleStore;
use models::AppState;
use provider::{BotRateProvider, Capabilities};

/// Собирает провайдер курсов и HTTP-маршруты по настройкам
pub fn build(settings: &Settings) -> Result<(Arc<BotRateProvider>, axum::Router)> {
    let fetcher = Arc::new(HttpFetcher::new(settings.url.clone(), settings.timeout)?);
    let locales = Arc::new(InMemoryLocaleStore::new());
    let provider = Arc::new(
        BotRateProvider::new(Capabilities { fetcher, locales })
            .with_policy(settings.missing_quote),
    );
    provider.install();
    let state = AppState::new(provider.clone(), provider.base_currency());
    Ok((provider, routes::init(state, settings.request_timeout())))
}
