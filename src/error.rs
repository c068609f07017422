use serde::Serialize;

#[derive(Debug, Serialize, thiserror::Error)]
pub enum AppError {
    /// Пустой код целевой валюты, проверяется до запроса страницы
    #[error("target currency code is empty")]
    NullInput,
    #[error("fetch error: {0}")]
    Fetch(String),
    /// Страница не совпадает с ожидаемой структурой таблицы
    #[error("malformed page: {0}")]
    MalformedPage(String),
    /// Содержит локализованное сообщение для пользователя
    #[error("{0}")]
    UnsupportedCurrency(String),
    #[error("arithmetic failure: {0}")]
    ArithmeticFailure(String),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = core::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::Fetch(value.to_string())
    }
}
