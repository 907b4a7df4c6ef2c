use crate::domain::model::Money;
use crate::utils::error::{GatewayError, Result};
use serde_json::json;

/// 沒有小數位的幣別
const CURRENCIES_WITHOUT_FRACTIONS: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND", "VUV",
    "XAF", "XOF", "XPF",
];

pub fn normalize_currency(currency: &str) -> Result<String> {
    let code = currency.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GatewayError::validation(format!(
            "Invalid currency code: '{}'",
            currency
        )));
    }
    Ok(code)
}

pub fn decimals_for(currency: &str) -> u32 {
    if CURRENCIES_WITHOUT_FRACTIONS.contains(&currency) {
        0
    } else {
        2
    }
}

/// Formats minor units the way the API expects, e.g. `1000 EUR` as `"10.00"`.
pub fn localized_amount(money: &Money) -> Result<String> {
    if money.cents < 0 {
        return Err(GatewayError::validation(format!(
            "Amount must not be negative: {}",
            money.cents
        )));
    }

    let currency = normalize_currency(&money.currency)?;
    let decimals = decimals_for(&currency);
    if decimals == 0 {
        return Ok(money.cents.to_string());
    }

    let divisor = 10_i64.pow(decimals);
    Ok(format!(
        "{}.{:0width$}",
        money.cents / divisor,
        money.cents % divisor,
        width = decimals as usize
    ))
}

pub fn amount_object(money: &Money) -> Result<serde_json::Value> {
    Ok(json!({
        "currency": normalize_currency(&money.currency)?,
        "value": localized_amount(money)?,
    }))
}

/// Converts an API amount string such as `"10.00"` back into minor units.
pub fn parse_amount(value: &str, currency: &str) -> Result<i64> {
    let currency = normalize_currency(currency)?;
    let decimals = decimals_for(&currency) as usize;
    let invalid =
        || GatewayError::validation(format!("Invalid amount '{}' for {}", value, currency));

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    if whole.is_empty()
        || fraction.len() > decimals
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let padded = format!("{}{:0<width$}", whole, fraction, width = decimals);
    padded.parse::<i64>().map_err(|_| invalid())
}
