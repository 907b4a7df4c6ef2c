use crate::core::amount::amount_object;
use crate::domain::model::{
    Customer, DirectDebitMandate, Money, PaymentDefaults, PaymentOptions, PaymentSource,
    SequenceType,
};
use crate::utils::error::{GatewayError, Result};
use serde_json::{json, Map, Value};

const DEFAULT_DESCRIPTION: &str = "Payment";

fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        body.insert(key.to_string(), Value::String(value.to_string()));
    }
}

fn metadata_with_order_id(options: &PaymentOptions) -> Option<Value> {
    let mut metadata = options.metadata.clone().unwrap_or_default();
    if let Some(order_id) = &options.order_id {
        metadata.insert("order_id".to_string(), Value::String(order_id.clone()));
    }

    if metadata.is_empty() {
        None
    } else {
        Some(Value::Object(metadata))
    }
}

/// 建立 `POST /payments` 的請求內容
pub fn payment_body(
    money: &Money,
    source: Option<&PaymentSource>,
    options: &PaymentOptions,
    defaults: &PaymentDefaults,
) -> Result<Value> {
    let mut body = Map::new();
    body.insert("amount".to_string(), amount_object(money)?);

    let description = options
        .description
        .as_deref()
        .or(defaults.description.as_deref())
        .unwrap_or(DEFAULT_DESCRIPTION);
    body.insert("description".to_string(), json!(description));

    let mut sequence_type = options.sequence_type;
    let mut customer_id = options.customer_id.as_deref();

    // 沒有指定來源時由客戶在付款頁面選擇付款方式
    match source {
        Some(PaymentSource::Method(method)) => {
            body.insert("method".to_string(), json!(method));
        }
        Some(PaymentSource::CardToken(token)) => {
            body.insert("method".to_string(), json!("creditcard"));
            body.insert("cardToken".to_string(), json!(token));
        }
        Some(PaymentSource::Mandate {
            customer_id: mandate_customer,
            mandate_id,
        }) => {
            sequence_type = Some(SequenceType::Recurring);
            customer_id = Some(mandate_customer.as_str());
            body.insert("mandateId".to_string(), json!(mandate_id));
        }
        None => {}
    }

    // 定期扣款不經過付款頁面，不需要 redirectUrl
    let redirect_url = options
        .redirect_url
        .as_deref()
        .or(defaults.redirect_url.as_deref());
    if sequence_type != Some(SequenceType::Recurring) && redirect_url.is_none() {
        return Err(GatewayError::validation(
            "redirect_url is required for payments that go through checkout",
        ));
    }
    insert_opt(&mut body, "redirectUrl", redirect_url);
    insert_opt(&mut body, "cancelUrl", options.cancel_url.as_deref());
    insert_opt(
        &mut body,
        "webhookUrl",
        options
            .webhook_url
            .as_deref()
            .or(defaults.webhook_url.as_deref()),
    );
    insert_opt(
        &mut body,
        "locale",
        options.locale.as_deref().or(defaults.locale.as_deref()),
    );
    insert_opt(&mut body, "customerId", customer_id);

    if matches!(sequence_type, Some(SequenceType::First | SequenceType::Recurring))
        && customer_id.is_none()
    {
        return Err(GatewayError::validation(
            "customer_id is required for first and recurring payments",
        ));
    }
    insert_opt(&mut body, "sequenceType", sequence_type.map(|s| s.as_str()));

    if let Some(metadata) = metadata_with_order_id(options) {
        body.insert("metadata".to_string(), metadata);
    }

    Ok(Value::Object(body))
}

pub fn refund_body(money: &Money, options: &PaymentOptions) -> Result<Value> {
    let mut body = Map::new();
    body.insert("amount".to_string(), amount_object(money)?);
    insert_opt(&mut body, "description", options.description.as_deref());
    if let Some(metadata) = metadata_with_order_id(options) {
        body.insert("metadata".to_string(), metadata);
    }
    Ok(Value::Object(body))
}

pub fn customer_body(customer: &Customer) -> Value {
    let mut body = Map::new();
    insert_opt(&mut body, "name", customer.name.as_deref());
    insert_opt(&mut body, "email", customer.email.as_deref());
    insert_opt(&mut body, "locale", customer.locale.as_deref());
    if let Some(metadata) = &customer.metadata {
        body.insert("metadata".to_string(), Value::Object(metadata.clone()));
    }
    Value::Object(body)
}

pub fn mandate_body(mandate: &DirectDebitMandate) -> Result<Value> {
    if mandate.consumer_name.trim().is_empty() {
        return Err(GatewayError::validation("consumer_name cannot be empty"));
    }

    let account: String = mandate
        .consumer_account
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if account.is_empty() {
        return Err(GatewayError::validation("consumer_account cannot be empty"));
    }

    let mut body = Map::new();
    body.insert("method".to_string(), json!("directdebit"));
    body.insert("consumerName".to_string(), json!(mandate.consumer_name));
    body.insert("consumerAccount".to_string(), json!(account));
    insert_opt(&mut body, "consumerBic", mandate.consumer_bic.as_deref());
    if let Some(date) = mandate.signature_date {
        body.insert(
            "signatureDate".to_string(),
            json!(date.format("%Y-%m-%d").to_string()),
        );
    }
    insert_opt(
        &mut body,
        "mandateReference",
        mandate.mandate_reference.as_deref(),
    );
    Ok(Value::Object(body))
}
