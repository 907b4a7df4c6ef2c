use crate::core::request::{customer_body, mandate_body, payment_body, refund_body};
use crate::core::response::{normalize, ResponseKind};
use crate::domain::model::{
    Customer, DirectDebitMandate, GatewayResponse, Money, PaymentDefaults, PaymentOptions,
    PaymentSource, SequenceType,
};
use crate::domain::ports::{ConfigProvider, PaymentGateway};
use crate::utils::error::Result;
use crate::utils::scrub::scrub;
use crate::utils::validation::{validate_api_key, validate_identifier, validate_url};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

pub const LIVE_URL: &str = "https://api.mollie.com/v2";

const USER_AGENT: &str = concat!("mollie-gateway/", env!("CARGO_PKG_VERSION"));

pub struct MollieGateway {
    api_key: String,
    base_url: String,
    defaults: PaymentDefaults,
    client: Client,
}

impl std::fmt::Debug for MollieGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MollieGateway")
            .field("base_url", &self.base_url)
            .field("test_mode", &self.test_mode())
            .finish_non_exhaustive()
    }
}

impl MollieGateway {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_api_key("gateway.api_key", config.api_key())?;
        validate_url("gateway.base_url", config.base_url())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            api_key: config.api_key().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            defaults: config.defaults(),
            client,
        })
    }

    pub fn test_mode(&self) -> bool {
        self.api_key.starts_with("test_")
    }

    pub fn supports_scrubbing(&self) -> bool {
        true
    }

    pub fn scrub(&self, transcript: &str) -> String {
        scrub(transcript)
    }

    /// 發送請求並把回應交給 `normalize`
    async fn commit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        kind: ResponseKind,
    ) -> Result<GatewayResponse> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json");

        if let Some(body) = &body {
            tracing::debug!(
                "{}",
                self.scrub(&format!(
                    "{} {}\nAuthorization: Bearer {}\n{}",
                    method, url, self.api_key, body
                ))
            );
            request = request
                .header("Content-Type", "application/json")
                .body(serde_json::to_string(body)?);
        } else {
            tracing::debug!("{} {}", method, url);
        }

        let response = request.send().await?;
        let http_status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!("Mollie API response status: {}", http_status);

        let normalized = normalize(kind, http_status, &text);
        if normalized.success {
            tracing::info!(
                "✅ {} {} succeeded (status: {})",
                method,
                path,
                normalized.status.as_deref().unwrap_or("-")
            );
        } else {
            tracing::warn!(
                "❌ {} {} failed: {} ({:?})",
                method,
                path,
                normalized.message,
                normalized.error_code
            );
        }

        Ok(normalized)
    }
}

#[async_trait]
impl PaymentGateway for MollieGateway {
    fn name(&self) -> &str {
        "Mollie"
    }

    async fn purchase(
        &self,
        money: &Money,
        source: &PaymentSource,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        let body = payment_body(money, Some(source), options, &self.defaults)?;
        self.commit(Method::POST, "/payments", Some(body), ResponseKind::Payment)
            .await
    }

    async fn setup_recurring(
        &self,
        money: &Money,
        customer_id: &str,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        validate_identifier("customer_id", customer_id)?;

        let options = PaymentOptions {
            customer_id: Some(customer_id.to_string()),
            sequence_type: Some(SequenceType::First),
            ..options.clone()
        };
        let body = payment_body(money, None, &options, &self.defaults)?;

        self.commit(Method::POST, "/payments", Some(body), ResponseKind::Payment)
            .await
    }

    async fn recurring(
        &self,
        money: &Money,
        customer_id: &str,
        mandate_id: Option<&str>,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        validate_identifier("customer_id", customer_id)?;

        let body = match mandate_id {
            Some(mandate_id) => {
                validate_identifier("mandate_id", mandate_id)?;
                let source = PaymentSource::Mandate {
                    customer_id: customer_id.to_string(),
                    mandate_id: mandate_id.to_string(),
                };
                payment_body(money, Some(&source), options, &self.defaults)?
            }
            None => {
                // 沒有指定 mandate 時由 Mollie 選用客戶的有效 mandate
                let options = PaymentOptions {
                    customer_id: Some(customer_id.to_string()),
                    sequence_type: Some(SequenceType::Recurring),
                    ..options.clone()
                };
                payment_body(money, None, &options, &self.defaults)?
            }
        };

        self.commit(Method::POST, "/payments", Some(body), ResponseKind::Payment)
            .await
    }

    async fn refund(
        &self,
        money: &Money,
        authorization: &str,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        validate_identifier("authorization", authorization)?;
        let body = refund_body(money, options)?;
        self.commit(
            Method::POST,
            &format!("/payments/{}/refunds", authorization),
            Some(body),
            ResponseKind::Refund,
        )
        .await
    }

    async fn void(&self, authorization: &str) -> Result<GatewayResponse> {
        validate_identifier("authorization", authorization)?;
        self.commit(
            Method::DELETE,
            &format!("/payments/{}", authorization),
            None,
            ResponseKind::Void,
        )
        .await
    }

    async fn status(&self, authorization: &str) -> Result<GatewayResponse> {
        validate_identifier("authorization", authorization)?;
        self.commit(
            Method::GET,
            &format!("/payments/{}", authorization),
            None,
            ResponseKind::Payment,
        )
        .await
    }

    async fn store(&self, customer: &Customer) -> Result<GatewayResponse> {
        self.commit(
            Method::POST,
            "/customers",
            Some(customer_body(customer)),
            ResponseKind::Customer,
        )
        .await
    }

    async fn unstore(&self, customer_id: &str) -> Result<GatewayResponse> {
        validate_identifier("customer_id", customer_id)?;
        self.commit(
            Method::DELETE,
            &format!("/customers/{}", customer_id),
            None,
            ResponseKind::CustomerDeleted,
        )
        .await
    }

    async fn create_mandate(
        &self,
        customer_id: &str,
        mandate: &DirectDebitMandate,
    ) -> Result<GatewayResponse> {
        validate_identifier("customer_id", customer_id)?;
        let body = mandate_body(mandate)?;
        self.commit(
            Method::POST,
            &format!("/customers/{}/mandates", customer_id),
            Some(body),
            ResponseKind::Mandate,
        )
        .await
    }

    async fn revoke_mandate(&self, customer_id: &str, mandate_id: &str) -> Result<GatewayResponse> {
        validate_identifier("customer_id", customer_id)?;
        validate_identifier("mandate_id", mandate_id)?;
        self.commit(
            Method::DELETE,
            &format!("/customers/{}/mandates/{}", customer_id, mandate_id),
            None,
            ResponseKind::MandateRevoked,
        )
        .await
    }
}
