use crate::domain::model::{ErrorCode, GatewayResponse};
use serde_json::Value;

/// The operation a response belongs to; each kind has its own notion of success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Payment,
    Void,
    Refund,
    Customer,
    CustomerDeleted,
    Mandate,
    MandateRevoked,
}

const PAYMENT_SUCCESS: &[&str] = &["open", "pending", "authorized", "paid"];
const REFUND_SUCCESS: &[&str] = &["queued", "pending", "processing", "refunded"];
const MANDATE_SUCCESS: &[&str] = &["valid", "pending"];

fn is_success_status(http_status: u16) -> bool {
    (200..300).contains(&http_status)
}

fn error_code_for(http_status: u16, field: Option<&str>) -> ErrorCode {
    match http_status {
        400 => ErrorCode::InvalidRequest,
        401 | 403 => ErrorCode::ConfigError,
        404 | 410 => ErrorCode::NotFound,
        422 if field.is_some_and(|f| f.starts_with("amount")) => ErrorCode::InvalidAmount,
        422 => ErrorCode::InvalidRequest,
        429 => ErrorCode::RateLimited,
        _ => ErrorCode::ProcessingError,
    }
}

fn is_error_object(http_status: u16, json: &Value) -> bool {
    !is_success_status(http_status) || (json["status"].is_u64() && json.get("title").is_some())
}

fn error_response(http_status: u16, json: Value) -> GatewayResponse {
    let message = json["detail"]
        .as_str()
        .or_else(|| json["title"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with HTTP status {}", http_status));
    // 2xx 回應內的錯誤物件以 body 的 status 為準
    let status = if is_success_status(http_status) {
        json["status"]
            .as_u64()
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(http_status)
    } else {
        http_status
    };
    let code = error_code_for(status, json["field"].as_str());
    GatewayResponse::failure(message, code, json)
}

fn resource_outcome(kind: ResponseKind, json: &Value) -> (bool, Option<ErrorCode>) {
    let status = json["status"].as_str().unwrap_or_default();
    match kind {
        ResponseKind::Payment => match status {
            s if PAYMENT_SUCCESS.contains(&s) => (true, None),
            "failed" => (false, Some(ErrorCode::CardDeclined)),
            _ => (false, Some(ErrorCode::ProcessingError)),
        },
        ResponseKind::Void => match status {
            "canceled" => (true, None),
            _ => (false, Some(ErrorCode::ProcessingError)),
        },
        ResponseKind::Refund => match status {
            s if REFUND_SUCCESS.contains(&s) => (true, None),
            _ => (false, Some(ErrorCode::ProcessingError)),
        },
        ResponseKind::Customer => match json["resource"].as_str() {
            Some("customer") => (true, None),
            _ => (false, Some(ErrorCode::ProcessingError)),
        },
        ResponseKind::Mandate => match status {
            s if MANDATE_SUCCESS.contains(&s) => (true, None),
            _ => (false, Some(ErrorCode::ProcessingError)),
        },
        ResponseKind::CustomerDeleted | ResponseKind::MandateRevoked => (true, None),
    }
}

fn success_message(kind: ResponseKind) -> &'static str {
    match kind {
        ResponseKind::Payment | ResponseKind::Refund => "Transaction approved",
        _ => "Succeeded",
    }
}

/// 將 API 回應正規化為 `GatewayResponse`
pub fn normalize(kind: ResponseKind, http_status: u16, body: &str) -> GatewayResponse {
    if body.trim().is_empty() {
        if is_success_status(http_status) {
            return GatewayResponse {
                success: true,
                message: "OK".to_string(),
                params: Value::Null,
                authorization: None,
                test: false,
                error_code: None,
                status: None,
                redirect_url: None,
            };
        }
        return GatewayResponse::failure(
            format!("Request failed with HTTP status {}", http_status),
            error_code_for(http_status, None),
            Value::Null,
        );
    }

    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) => {
            return GatewayResponse::failure(
                format!(
                    "Invalid response received from the Mollie API. (The raw response returned by the API was {})",
                    body
                ),
                ErrorCode::ProcessingError,
                Value::Null,
            );
        }
    };

    if is_error_object(http_status, &json) {
        return error_response(http_status, json);
    }

    let (success, error_code) = resource_outcome(kind, &json);
    let status = json["status"].as_str().map(str::to_string);
    let message = if success {
        success_message(kind).to_string()
    } else {
        json["details"]["failureReason"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Transaction {}", status.as_deref().unwrap_or("unknown")))
    };

    GatewayResponse {
        success,
        message,
        authorization: json["id"].as_str().map(str::to_string),
        test: json["mode"].as_str() == Some("test"),
        error_code,
        status,
        redirect_url: json["_links"]["checkout"]["href"]
            .as_str()
            .map(str::to_string),
        params: json,
    }
}
