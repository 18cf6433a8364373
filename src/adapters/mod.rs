// Adapters layer: concrete implementations of the domain ports (import directory, customer stores).

pub mod json_store;
pub mod local;
pub mod memory;
pub mod table;
