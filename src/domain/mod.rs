// Domain layer: request/response payloads and the ports the adapters implement.

pub mod model;
pub mod ports;
