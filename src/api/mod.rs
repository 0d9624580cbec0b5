//! Typed endpoint surfaces over [`NumeraClient::execute`](crate::client::NumeraClient::execute).

pub mod auth;
pub mod compatibility;
pub mod payment;
