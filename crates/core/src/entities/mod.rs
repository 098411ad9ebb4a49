//! Entity use cases shared by every CRM record type

pub mod filter;
pub mod ports;
pub mod service;
