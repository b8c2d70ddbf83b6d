//! Service client implementations
//!
//! This module contains the client for the Aethel backend service.

pub mod aethel;
pub mod common;

pub use common::UserAgent;
