pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::GatewayConfig;
pub use core::mollie::MollieGateway;
pub use domain::model::{
    Customer, DirectDebitMandate, ErrorCode, GatewayResponse, Money, PaymentOptions,
    PaymentSource, SequenceType,
};
pub use domain::ports::PaymentGateway;
pub use utils::error::{GatewayError, Result};
