//! HTTP inbound adapter exposing the REST endpoints.

pub mod chat;
pub mod error;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod uploads;
pub mod validation;
pub mod wardrobe;

pub use error::ApiResult;
