// Domain layer: entities, API wire shapes and the ports the core depends on.

pub mod model;
pub mod ports;
pub mod resources;
