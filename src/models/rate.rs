use chrono::{DateTime, Utc};
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Строка таблицы курсов в том виде, как она опубликована банком.
/// Отсутствующая котировка (на странице отмечена прочерком) хранится как `None`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "camelCase")]
pub struct RawQuoteRow {
    #[builder(setter(into))]
    pub currency_name: String,
    #[builder(setter(custom), field(build = "self.code_build()"))]
    pub currency_code: String,
    #[builder(setter(into, strip_option), default)]
    pub cash_buy: Option<Decimal>,
    #[builder(setter(into, strip_option), default)]
    pub cash_sell: Option<Decimal>,
    #[builder(setter(into, strip_option), default)]
    pub spot_buy: Option<Decimal>,
    #[builder(setter(into, strip_option), default)]
    pub spot_sell: Option<Decimal>,
}

impl RawQuoteRow {
    pub fn builder() -> RawQuoteRowBuilder {
        RawQuoteRowBuilder::default()
    }
    /// Пара спот-котировок, если обе опубликованы
    pub fn spot_pair(&self) -> Option<(Decimal, Decimal)> {
        self.spot_buy.zip(self.spot_sell)
    }
}

impl RawQuoteRowBuilder {
    pub fn currency_code(&mut self, code: impl AsRef<str>) -> &mut Self {
        self.currency_code = Some(code.as_ref().to_string());
        self
    }
    fn code_build(&self) -> String {
        self.currency_code
            .clone()
            .unwrap_or_default()
            .trim()
            .to_uppercase()
    }
    /// Код валюты: ровно три латинские буквы
    fn validate(&self) -> Result<(), String> {
        let code = self.currency_code.as_deref().unwrap_or_default().trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(())
        } else {
            Err(format!("invalid currency code '{code}'"))
        }
    }
}

/// Курс валюты относительно запрошенной базовой валюты
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRate {
    pub currency_code: String,
    pub rate: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl NormalizedRate {
    pub fn new(currency_code: impl Into<String>, rate: Decimal, observed_at: DateTime<Utc>) -> Self {
        Self {
            currency_code: currency_code.into(),
            rate,
            observed_at,
        }
    }
}
