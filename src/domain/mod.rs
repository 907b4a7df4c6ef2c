// Domain layer: gateway vocabulary and the provider-independent port.

pub mod model;
pub mod ports;
