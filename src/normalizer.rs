use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    localization::{LocaleStore, UNSUPPORTED_CURRENCY_KEY},
    models::{NormalizedRate, RawQuoteRow},
    AppError, Result,
};

const REBASED_SCALE: u32 = 4;

/// Что делать со строкой, по которой нельзя посчитать курс
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingQuotePolicy {
    /// пропустить строку с предупреждением в логе
    #[default]
    Skip,
    /// прервать запрос с `AppError::ArithmeticFailure`
    Fail,
}

impl FromStr for MissingQuotePolicy {
    type Err = AppError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(AppError::Config(format!(
                "unknown missing quote policy '{other}', expected 'skip' or 'fail'"
            ))),
        }
    }
}

/// Средний курс строки, выраженный как количество валюты за 1 единицу базовой.
///
/// Если банк публикует обе спот-котировки, берётся их среднее, иначе используется
/// только наличная покупка: `(cash_buy + cash_buy) / 2`. Наличная продажа в расчёт
/// не входит. `None`, если котировок нет или среднее равно нулю.
pub fn average_rate(row: &RawQuoteRow) -> Option<Decimal> {
    let two = Decimal::TWO;
    let mid = match row.spot_pair() {
        Some((buy, sell)) => buy.checked_add(sell)?.checked_div(two)?,
        None => {
            let cash_buy = row.cash_buy?;
            cash_buy.checked_add(cash_buy)?.checked_div(two)?
        }
    };
    Decimal::ONE.checked_div(mid)
}

pub struct Normalizer<'a> {
    pub base_currency: &'a str,
    pub observed_at: DateTime<Utc>,
    pub policy: MissingQuotePolicy,
    pub locales: &'a dyn LocaleStore,
}

impl Normalizer<'_> {
    /// Курсы всех валют страницы относительно `target`.
    /// Базовая валюта банка всегда идёт первой, далее порядок страницы.
    pub fn normalize(&self, rows: Vec<RawQuoteRow>, target: &str) -> Result<Vec<NormalizedRate>> {
        let mut rates = Vec::with_capacity(rows.len() + 1);
        rates.push(NormalizedRate::new(
            self.base_currency.to_uppercase(),
            Decimal::ONE,
            self.observed_at,
        ));
        for row in rows {
            match average_rate(&row) {
                Some(rate) => rates.push(NormalizedRate::new(
                    row.currency_code,
                    rate,
                    self.observed_at,
                )),
                None => match self.policy {
                    MissingQuotePolicy::Skip => {
                        warn!(
                            "Нет котировок для {} ({}), строка пропущена",
                            row.currency_name, row.currency_code
                        );
                    }
                    MissingQuotePolicy::Fail => {
                        return Err(AppError::ArithmeticFailure(format!(
                            "no usable quote for {}",
                            row.currency_code
                        )));
                    }
                },
            }
        }
        if target.eq_ignore_ascii_case(self.base_currency) {
            return Ok(rates);
        }
        let target_rate = rates
            .iter()
            .find(|r| r.currency_code.eq_ignore_ascii_case(target))
            .map(|r| r.rate)
            .ok_or_else(|| {
                AppError::UnsupportedCurrency(self.locales.get_resource(UNSUPPORTED_CURRENCY_KEY))
            })?;
        info!("Пересчитываю {} курсов относительно {target}", rates.len());
        rates
            .into_iter()
            .map(|r| -> Result<NormalizedRate> {
                let rate = r
                    .rate
                    .checked_div(target_rate)
                    .ok_or_else(|| {
                        AppError::ArithmeticFailure(format!(
                            "cannot rebase {} against {target}",
                            r.currency_code
                        ))
                    })?
                    .round_dp(REBASED_SCALE);
                Ok(NormalizedRate { rate, ..r })
            })
            .collect()
    }
}
