//! BCA Core
//!
//! Core types and abstractions for the BCA compliance assistant client.
//!
//! This crate contains:
//! - Domain types: documents, upload batches, job status, sessions, chat, summaries
//! - DTOs: Request and response bodies exchanged with the backend

pub mod domain;
pub mod dto;
pub mod error;

pub use error::ValidationError;
