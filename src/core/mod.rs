pub mod amount;
pub mod mollie;
pub mod request;
pub mod response;

pub use crate::domain::model::{GatewayResponse, Money};
pub use crate::domain::ports::{ConfigProvider, PaymentGateway};
pub use crate::utils::error::Result;
