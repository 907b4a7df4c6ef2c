// Application layer: wires CLI commands to a `PaymentGateway`.

#[cfg(feature = "cli")]
pub mod commands;
