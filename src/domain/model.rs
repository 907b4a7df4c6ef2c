use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 以最小貨幣單位表示的金額
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub cents: i64,
    pub currency: String,
}

impl Money {
    pub fn new(cents: i64, currency: impl Into<String>) -> Self {
        Self {
            cents,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum PaymentSource {
    /// Hosted checkout method such as `ideal` or `bancontact`.
    Method(String),
    /// Card token produced by the provider's client-side components.
    CardToken(String),
    Mandate {
        customer_id: String,
        mandate_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceType {
    Oneoff,
    First,
    Recurring,
}

impl SequenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceType::Oneoff => "oneoff",
            SequenceType::First => "first",
            SequenceType::Recurring => "recurring",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentOptions {
    pub description: Option<String>,
    pub redirect_url: Option<String>,
    pub cancel_url: Option<String>,
    pub webhook_url: Option<String>,
    pub locale: Option<String>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub sequence_type: Option<SequenceType>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Fallbacks applied when per-call options leave a field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDefaults {
    pub description: Option<String>,
    pub redirect_url: Option<String>,
    pub webhook_url: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub locale: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectDebitMandate {
    pub consumer_name: String,
    pub consumer_account: String,
    pub consumer_bic: Option<String>,
    pub signature_date: Option<NaiveDate>,
    pub mandate_reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    ConfigError,
    NotFound,
    InvalidAmount,
    ProcessingError,
    CardDeclined,
    RateLimited,
}

/// 每一次 API 呼叫正規化後的結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub success: bool,
    pub message: String,
    pub params: serde_json::Value,
    pub authorization: Option<String>,
    pub test: bool,
    pub error_code: Option<ErrorCode>,
    pub status: Option<String>,
    pub redirect_url: Option<String>,
}

impl GatewayResponse {
    pub fn failure(
        message: impl Into<String>,
        error_code: ErrorCode,
        params: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            params,
            authorization: None,
            test: false,
            error_code: Some(error_code),
            status: None,
            redirect_url: None,
        }
    }
}
