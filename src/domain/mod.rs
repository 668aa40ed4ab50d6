// Domain layer: wire models and ports. Adapters live under core/ and client/.

pub mod model;
pub mod ports;
