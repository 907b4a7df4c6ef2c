use crate::domain::model::{
    Customer, DirectDebitMandate, GatewayResponse, Money, PaymentDefaults, PaymentOptions,
    PaymentSource,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Provider-independent payment operations.
///
/// Provider rejections come back as `Ok` with `success == false`; `Err` is
/// reserved for invalid input and transport failures.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn purchase(
        &self,
        money: &Money,
        source: &PaymentSource,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse>;

    async fn setup_recurring(
        &self,
        money: &Money,
        customer_id: &str,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse>;

    async fn recurring(
        &self,
        money: &Money,
        customer_id: &str,
        mandate_id: Option<&str>,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse>;

    async fn refund(
        &self,
        money: &Money,
        authorization: &str,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse>;

    async fn void(&self, authorization: &str) -> Result<GatewayResponse>;

    async fn status(&self, authorization: &str) -> Result<GatewayResponse>;

    async fn store(&self, customer: &Customer) -> Result<GatewayResponse>;

    async fn unstore(&self, customer_id: &str) -> Result<GatewayResponse>;

    async fn create_mandate(
        &self,
        customer_id: &str,
        mandate: &DirectDebitMandate,
    ) -> Result<GatewayResponse>;

    async fn revoke_mandate(&self, customer_id: &str, mandate_id: &str) -> Result<GatewayResponse>;
}

/// 提供 gateway 所需的設定
pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn defaults(&self) -> PaymentDefaults;
}
