mod rate;
pub use rate::*;

use std::sync::Arc;

use crate::provider::ExchangeRateProvider;

/// Общие данные для обработчиков
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ExchangeRateProvider>,
    pub base_currency: String,
}
impl AppState {
    /// Создать новый экземпляр общих данных
    pub fn new(provider: Arc<dyn ExchangeRateProvider>, base_currency: impl Into<String>) -> Self {
        Self {
            provider,
            base_currency: base_currency.into(),
        }
    }
}
