//! Session acquisition

pub mod ports;
