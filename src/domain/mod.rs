// Domain layer: customer models and the ports the importer talks through.

pub mod model;
pub mod ports;
