//! HTTP transport abstraction

pub mod ports;
