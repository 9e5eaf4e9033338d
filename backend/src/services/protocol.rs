//! Protocol variants of the VO query pipeline.
//!
//! ObjObsSAP and ObsLocTAP share parsing, orchestration and serialization.
//! What differs between them lives behind [`ObservabilityProtocol`]: which
//! engine call to make, which raw entries to keep, how to resolve a raw entry
//! into a result row and the fixed field schema of the output table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::engine::ObservatoryEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{ModifiedJulianDate, QueryParameters};
use crate::votable::{Cell, FieldSpec};

/// Fixed metadata of a VO protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtocolDescriptor {
    /// Short protocol name (`ObjObsSAP`)
    pub name: &'static str,
    /// Text of the resource `DESCRIPTION`
    pub description: &'static str,
    /// IVOA standard identifier written to `SERVICE_PROTOCOL`
    pub service_protocol: &'static str,
    /// Output columns, in declared order
    pub fields: &'static [FieldSpec],
}

/// Per-request values available when resolving raw entries.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub params: &'a QueryParameters,
    /// Instant the planning rows are stamped with
    pub planned_at: ModifiedJulianDate,
}

/// One VO protocol on top of the shared pipeline.
#[async_trait]
pub trait ObservabilityProtocol: Send + Sync + 'static {
    /// Raw record returned by the engine.
    type Entry: Send + 'static;
    /// Resolved result row.
    type Row: Send + 'static;

    fn descriptor(&self) -> &'static ProtocolDescriptor;

    /// Invoke the engine for `params`.
    async fn fetch(
        &self,
        engine: &dyn ObservatoryEngine,
        params: &QueryParameters,
    ) -> EngineResult<Vec<Self::Entry>>;

    /// Domain filter applied before truncation.
    fn keep(&self, params: &QueryParameters, entry: &Self::Entry) -> bool;

    /// Resolve a kept entry. `index` is its position in the truncated result.
    fn resolve(&self, ctx: &ResolveContext<'_>, index: usize, entry: Self::Entry) -> Self::Row;

    /// Value echoed in the `POS` INFO.
    fn position_value(&self, params: &QueryParameters) -> String;

    /// Cells of `row`, in field order.
    fn cells(&self, row: &Self::Row) -> Vec<Cell>;
}

/// Query window as the engine's instants.
///
/// Fails before any engine call when a bound has no calendar instant.
pub(crate) fn engine_window(params: &QueryParameters) -> EngineResult<(DateTime<Utc>, DateTime<Utc>)> {
    let time = params.time();
    time.datetimes().ok_or_else(|| {
        EngineError::InvalidRequest(format!(
            "time window {}/{} is outside the supported calendar range",
            time.t_min.value(),
            time.t_max.value()
        ))
    })
}
