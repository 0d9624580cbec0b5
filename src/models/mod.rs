//! Data models for the Numera client.

pub mod auth;
pub mod request;
