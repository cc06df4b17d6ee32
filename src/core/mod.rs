//! Configuration and the event/reply types exchanged with the host

pub mod config;
pub mod models;
