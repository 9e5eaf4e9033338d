//! Service layer: the VO query pipeline and its protocol variants.
//!
//! Both ObjObsSAP and ObsLocTAP run through one [`QueryOrchestrator`];
//! the protocol type parameter supplies the engine call, filter, row
//! resolution and output schema. [`vosi`] serves the support documents.

pub mod document;
pub mod objobssap;
pub mod obsloctap;
pub mod orchestrator;
pub mod protocol;
pub mod vosi;

pub use objobssap::{ObjObsSap, OBJOBSSAP};
pub use obsloctap::{ObsLocTap, OBSLOCTAP};
pub use orchestrator::QueryOrchestrator;
pub use protocol::{ObservabilityProtocol, ProtocolDescriptor, ResolveContext};
pub use vosi::{mark_service_start, service_started_at};
