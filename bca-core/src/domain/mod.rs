//! Core domain types
//!
//! This module contains the structures shared between the HTTP client and the
//! command-line front end. They carry no I/O of their own.

pub mod chat;
pub mod document;
pub mod image;
pub mod job;
pub mod session;
pub mod summary;
