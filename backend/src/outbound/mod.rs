//! Outbound adapters implementing the domain's store and hashing ports.

pub mod crypto;
pub mod memory;
pub mod persistence;
