use std::{collections::HashMap, sync::RwLock};

use tracing::{error, info};

/// Ключ сообщения о неподдерживаемой валюте
pub const UNSUPPORTED_CURRENCY_KEY: &str = "Plugins.ExchangeRate.BotExchange.Error";
pub const UNSUPPORTED_CURRENCY_TEXT: &str = "You can use BOT (Bank of Taiwan) exchange rate provider only when the primary exchange rate currency is supported by BOT";

/// Хранилище локализованных строк хост-платформы
pub trait LocaleStore: Send + Sync {
    fn add_or_update_resource(&self, key: &str, text: &str);
    fn delete_resource(&self, key: &str);
    /// Для неизвестного ключа возвращает сам ключ
    fn get_resource(&self, key: &str) -> String;
}

#[derive(Default)]
pub struct InMemoryLocaleStore {
    resources: RwLock<HashMap<String, String>>,
}

impl InMemoryLocaleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocaleStore for InMemoryLocaleStore {
    fn add_or_update_resource(&self, key: &str, text: &str) {
        match self.resources.write() {
            Ok(mut resources) => {
                resources.insert(key.to_string(), text.to_string());
                info!("Добавлена строка локализации '{key}'");
            }
            Err(e) => error!("Не удалось записать строку локализации '{key}': {e:?}"),
        }
    }
    fn delete_resource(&self, key: &str) {
        match self.resources.write() {
            Ok(mut resources) => {
                if resources.remove(key).is_some() {
                    info!("Удалена строка локализации '{key}'");
                }
            }
            Err(e) => error!("Не удалось удалить строку локализации '{key}': {e:?}"),
        }
    }
    fn get_resource(&self, key: &str) -> String {
        self.resources
            .read()
            .ok()
            .and_then(|r| r.get(key).cloned())
            .unwrap_or_else(|| key.to_string())
    }
}
