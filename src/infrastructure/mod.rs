//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters and external integrations:
//! - PostgREST client for the hosted backend
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod postgrest;
