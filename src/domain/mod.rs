// Domain layer: portfolio models and the ports (interfaces) the core depends on.

pub mod model;
pub mod ports;
