//! HTTP transport: header construction and the physical send loop.

pub mod headers;
pub mod http;
