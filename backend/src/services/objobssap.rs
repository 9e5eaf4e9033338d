//! Object Observability SAP: when is a fixed target observable?

use async_trait::async_trait;

use super::protocol::{engine_window, ObservabilityProtocol, ProtocolDescriptor, ResolveContext};
use crate::engine::{ObservatoryEngine, RawVisibilityEntry, VisibilityRequest};
use crate::error::EngineResult;
use crate::models::{ModifiedJulianDate, QueryParameters, VisibilityWindow};
use crate::votable::{Cell, FieldSpec};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::double("t_start", "time.start", "d")
        .with_utype("Char.TimeAxis.Coverage.Bounds.Limits.StartTime"),
    FieldSpec::double("t_stop", "time.end", "d")
        .with_utype("Char.TimeAxis.Coverage.Bounds.Limits.StopTime"),
    FieldSpec::double("t_observability", "time.duration", "s")
        .with_utype("Char.TimeAxis.Coverage.Support.Extent"),
];

pub const OBJOBSSAP: ProtocolDescriptor = ProtocolDescriptor {
    name: "ObjObsSAP",
    description: "NASA Neil Gehrels Swift Observatory Science Operations Center - \
                  Object Observability Simple Access Protocol (ObjObsSAP)",
    service_protocol: "ivo://ivoa.net/std/ObjObsSAP",
    fields: FIELDS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjObsSap;

#[async_trait]
impl ObservabilityProtocol for ObjObsSap {
    type Entry = RawVisibilityEntry;
    type Row = VisibilityWindow;

    fn descriptor(&self) -> &'static ProtocolDescriptor {
        &OBJOBSSAP
    }

    async fn fetch(
        &self,
        engine: &dyn ObservatoryEngine,
        params: &QueryParameters,
    ) -> EngineResult<Vec<RawVisibilityEntry>> {
        let (begin, end) = engine_window(params)?;
        let request = VisibilityRequest {
            ra: params.position().ra_deg(),
            dec: params.position().dec_deg(),
            begin,
            end,
        };
        engine.visibility(&request).await
    }

    /// Inclusive: a window exactly `MIN_OBS` long qualifies.
    fn keep(&self, params: &QueryParameters, entry: &RawVisibilityEntry) -> bool {
        entry.duration_seconds() >= params.min_obs().value()
    }

    fn resolve(&self, _ctx: &ResolveContext<'_>, _index: usize, entry: RawVisibilityEntry) -> VisibilityWindow {
        VisibilityWindow::new(
            ModifiedJulianDate::from(entry.begin),
            ModifiedJulianDate::from(entry.end),
        )
    }

    /// `RA,DEC` only. A radius in `POS` is accepted but plays no part in
    /// a fixed-target visibility query, so it is neither used nor echoed.
    fn position_value(&self, params: &QueryParameters) -> String {
        let pos = params.position();
        format!("{},{}", pos.ra_deg(), pos.dec_deg())
    }

    fn cells(&self, row: &VisibilityWindow) -> Vec<Cell> {
        vec![
            Cell::from(row.t_start.value()),
            Cell::from(row.t_stop.value()),
            Cell::from(row.observability().value()),
        ]
    }
}
