use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use mollie_gateway::domain::model::PaymentDefaults;
use mollie_gateway::{
    Customer, DirectDebitMandate, ErrorCode, GatewayConfig, MollieGateway, Money,
    PaymentGateway, PaymentOptions, PaymentSource,
};
use serde_json::json;

const API_KEY: &str = "test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM";

fn gateway(server: &MockServer) -> MollieGateway {
    let config = GatewayConfig::new(API_KEY)
        .with_base_url(server.url("/v2"))
        .with_defaults(PaymentDefaults {
            description: Some("Webshop order".to_string()),
            redirect_url: Some("https://shop.example/return".to_string()),
            webhook_url: Some("https://shop.example/webhook".to_string()),
            locale: None,
        });
    MollieGateway::new(&config).expect("gateway config is valid")
}

fn payment(id: &str, status: &str) -> serde_json::Value {
    json!({
        "resource": "payment",
        "id": id,
        "mode": "test",
        "status": status,
        "amount": {"currency": "EUR", "value": "10.00"},
        "sequenceType": "oneoff",
        "_links": {
            "self": {"href": format!("https://api.mollie.com/v2/payments/{}", id)}
        }
    })
}

/// 首次付款建立 mandate，之後以 mandate 定期扣款
#[tokio::test]
async fn test_customer_mandate_recurring_flow() -> Result<()> {
    let server = MockServer::start();

    let customer_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/customers").json_body(json!({
            "name": "Jan de Vries",
            "email": "jan@example.org"
        }));
        then.status(201).json_body(json!({
            "resource": "customer",
            "id": "cst_8wmqcHMN4U",
            "mode": "test",
            "name": "Jan de Vries",
            "email": "jan@example.org"
        }));
    });

    let first_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/payments").json_body(json!({
            "amount": {"currency": "EUR", "value": "0.01"},
            "description": "Webshop order",
            "redirectUrl": "https://shop.example/return",
            "webhookUrl": "https://shop.example/webhook",
            "customerId": "cst_8wmqcHMN4U",
            "sequenceType": "first"
        }));
        then.status(201).json_body(json!({
            "resource": "payment",
            "id": "tr_first",
            "mode": "test",
            "status": "open",
            "sequenceType": "first",
            "_links": {"checkout": {"href": "https://www.mollie.com/checkout/select-method/first"}}
        }));
    });

    let recurring_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/payments").json_body(json!({
            "amount": {"currency": "EUR", "value": "25.00"},
            "description": "Monthly subscription",
            "redirectUrl": "https://shop.example/return",
            "webhookUrl": "https://shop.example/webhook",
            "customerId": "cst_8wmqcHMN4U",
            "mandateId": "mdt_pWUnw6pkBN",
            "sequenceType": "recurring"
        }));
        then.status(201).json_body(payment("tr_recurring", "pending"));
    });

    let gateway = gateway(&server);

    let customer = Customer {
        name: Some("Jan de Vries".to_string()),
        email: Some("jan@example.org".to_string()),
        ..Default::default()
    };
    let stored = gateway.store(&customer).await?;
    assert!(stored.success);
    let customer_id = stored.authorization.clone().expect("customer id");

    let first = gateway
        .setup_recurring(&Money::new(1, "EUR"), &customer_id, &PaymentOptions::default())
        .await?;
    assert!(first.success);
    assert_eq!(
        first.redirect_url.as_deref(),
        Some("https://www.mollie.com/checkout/select-method/first")
    );

    let options = PaymentOptions {
        description: Some("Monthly subscription".to_string()),
        ..Default::default()
    };
    let charge = gateway
        .recurring(
            &Money::new(2500, "EUR"),
            &customer_id,
            Some("mdt_pWUnw6pkBN"),
            &options,
        )
        .await?;
    assert!(charge.success);
    assert_eq!(charge.authorization.as_deref(), Some("tr_recurring"));
    assert_eq!(charge.status.as_deref(), Some("pending"));

    customer_mock.assert();
    first_mock.assert();
    recurring_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_purchase_with_mandate_source() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/payments")
            .body_contains("\"sequenceType\":\"recurring\"")
            .body_contains("\"mandateId\":\"mdt_pWUnw6pkBN\"");
        then.status(201).json_body(payment("tr_mandate", "paid"));
    });

    let response = gateway(&server)
        .purchase(
            &Money::new(1000, "EUR"),
            &PaymentSource::Mandate {
                customer_id: "cst_8wmqcHMN4U".to_string(),
                mandate_id: "mdt_pWUnw6pkBN".to_string(),
            },
            &PaymentOptions::default(),
        )
        .await?;

    api_mock.assert();
    assert!(response.success);
    assert_eq!(response.message, "Transaction approved");
    Ok(())
}

#[tokio::test]
async fn test_refund_and_status() -> Result<()> {
    let server = MockServer::start();

    let refund_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/payments/tr_WDqYK6vllg/refunds")
            .json_body(json!({
                "amount": {"currency": "EUR", "value": "5.00"},
                "description": "Damaged item"
            }));
        then.status(201).json_body(json!({
            "resource": "refund",
            "id": "re_4qqhO89gsT",
            "mode": "test",
            "status": "pending",
            "amount": {"currency": "EUR", "value": "5.00"},
            "paymentId": "tr_WDqYK6vllg"
        }));
    });

    let status_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/payments/tr_WDqYK6vllg");
        then.status(200).json_body(payment("tr_WDqYK6vllg", "paid"));
    });

    let gateway = gateway(&server);
    let options = PaymentOptions {
        description: Some("Damaged item".to_string()),
        ..Default::default()
    };

    let refund = gateway
        .refund(&Money::new(500, "EUR"), "tr_WDqYK6vllg", &options)
        .await?;
    assert!(refund.success);
    assert_eq!(refund.authorization.as_deref(), Some("re_4qqhO89gsT"));
    assert_eq!(refund.params["paymentId"], "tr_WDqYK6vllg");

    let status = gateway.status("tr_WDqYK6vllg").await?;
    assert!(status.success);
    assert_eq!(status.status.as_deref(), Some("paid"));
    assert!(status.test);

    refund_mock.assert();
    status_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_refund_exceeding_amount_is_declined() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v2/payments/tr_small/refunds");
        then.status(422).json_body(json!({
            "status": 422,
            "title": "Unprocessable Entity",
            "detail": "The refund amount exceeds the amount remaining",
            "field": "amount.value"
        }));
    });

    let response = gateway(&server)
        .refund(&Money::new(99999, "EUR"), "tr_small", &PaymentOptions::default())
        .await?;

    assert!(!response.success);
    assert_eq!(response.error_code, Some(ErrorCode::InvalidAmount));
    assert_eq!(
        response.message,
        "The refund amount exceeds the amount remaining"
    );
    assert_eq!(response.authorization, None);
    Ok(())
}

#[tokio::test]
async fn test_mandate_lifecycle() -> Result<()> {
    let server = MockServer::start();

    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/customers/cst_8wmqcHMN4U/mandates")
            .json_body(json!({
                "method": "directdebit",
                "consumerName": "Jan de Vries",
                "consumerAccount": "NL55INGB0000000000",
                "consumerBic": "INGBNL2A",
                "signatureDate": "2024-05-07"
            }));
        then.status(201).json_body(json!({
            "resource": "mandate",
            "id": "mdt_h3gAaD5zP",
            "mode": "test",
            "status": "valid",
            "method": "directdebit"
        }));
    });

    let revoke_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/v2/customers/cst_8wmqcHMN4U/mandates/mdt_h3gAaD5zP");
        then.status(204);
    });

    let unstore_mock = server.mock(|when, then| {
        when.method(DELETE).path("/v2/customers/cst_8wmqcHMN4U");
        then.status(204);
    });

    let gateway = gateway(&server);
    let mandate = DirectDebitMandate {
        consumer_name: "Jan de Vries".to_string(),
        consumer_account: "NL55 INGB 0000 0000 00".to_string(),
        consumer_bic: Some("INGBNL2A".to_string()),
        signature_date: NaiveDate::from_ymd_opt(2024, 5, 7),
        mandate_reference: None,
    };

    let created = gateway.create_mandate("cst_8wmqcHMN4U", &mandate).await?;
    assert!(created.success);
    assert_eq!(created.authorization.as_deref(), Some("mdt_h3gAaD5zP"));

    let revoked = gateway
        .revoke_mandate("cst_8wmqcHMN4U", "mdt_h3gAaD5zP")
        .await?;
    assert!(revoked.success);
    assert_eq!(revoked.message, "OK");

    let removed = gateway.unstore("cst_8wmqcHMN4U").await?;
    assert!(removed.success);

    create_mock.assert();
    revoke_mock.assert();
    unstore_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_and_unknown_payment() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/payments/tr_missing");
        then.status(404).json_body(json!({
            "status": 404,
            "title": "Not Found",
            "detail": "No payment exists with token tr_missing."
        }));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/v2/payments/tr_locked");
        then.status(401).json_body(json!({
            "status": 401,
            "title": "Unauthorized Request",
            "detail": "Missing authentication, or failed to authenticate"
        }));
    });

    let gateway = gateway(&server);

    let missing = gateway.status("tr_missing").await?;
    assert!(!missing.success);
    assert_eq!(missing.error_code, Some(ErrorCode::NotFound));

    let locked = gateway.void("tr_locked").await?;
    assert!(!locked.success);
    assert_eq!(locked.error_code, Some(ErrorCode::ConfigError));
    Ok(())
}

#[tokio::test]
async fn test_non_json_response_is_normalized() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v2/customers");
        then.status(503)
            .header("Content-Type", "text/html")
            .body("<html>Service Unavailable</html>");
    });

    let response = gateway(&server).store(&Customer::default()).await?;

    assert!(!response.success);
    assert_eq!(response.error_code, Some(ErrorCode::ProcessingError));
    assert!(response.message.contains("Service Unavailable"));
    Ok(())
}

#[tokio::test]
async fn test_checkout_purchase_without_redirect_url_is_rejected_locally() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(201);
    });

    let config = GatewayConfig::new(API_KEY).with_base_url(server.url("/v2"));
    let gateway = MollieGateway::new(&config).unwrap();

    let result = gateway
        .purchase(
            &Money::new(1000, "EUR"),
            &PaymentSource::Method("ideal".to_string()),
            &PaymentOptions::default(),
        )
        .await;

    tokio_test::assert_err!(result);
    api_mock.assert_hits(0);
}
