//! HTTP server module for the Swift VO services.
//!
//! This module provides an axum-based HTTP server that exposes the VO query
//! pipeline. It owns request decoding and error mapping; everything else is
//! delegated to the service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query-string decoding, REQUEST URL echo                │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - ObjObsSAP / ObsLocTAP orchestration                    │
//! │  - VOTable and VOSI documents                             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Engine Layer (engine/)                                   │
//! │  - SwiftApiEngine / StaticEngine                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
