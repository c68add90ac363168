//! Data Transfer Objects for backend communication
//!
//! Request and response bodies as they appear on the wire. Fields the backend
//! may omit are modelled as `Option` so partial responses still decode.

pub mod auth;
pub mod chat;
pub mod document;
pub mod summary;
