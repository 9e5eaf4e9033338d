//! # Swift VO
//!
//! Virtual Observatory query services for the Neil Gehrels Swift Observatory.
//!
//! This crate answers two IVOA protocols over a shared pipeline:
//!
//! - **ObjObsSAP**: when is a fixed sky position observable?
//! - **ObsLocTAP**: which observations are planned inside a cone?
//!
//! Both parse and validate the same query parameters, call the external
//! visibility/planning engine at most once, filter and truncate the result
//! and serialize it as a VOTable.
//!
//! ## Architecture
//!
//! - [`parsing`]: query-string parameters to [`models::QueryParameters`]
//! - [`engine`]: the external engine boundary and its implementations
//! - [`services`]: protocol variants, orchestration, VOSI documents
//! - [`votable`]: VOTable document model and XML writer
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP host

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
pub mod votable;

#[cfg(feature = "http-server")]
pub mod http;
