//! Outbound adapters implementing the domain's driven ports.

pub mod blob;
pub mod chat;
pub mod persistence;
