//! Observation Locator TAP: which observations are planned inside a cone?

use async_trait::async_trait;

use super::protocol::{engine_window, ObservabilityProtocol, ProtocolDescriptor, ResolveContext};
use crate::engine::{ObservatoryEngine, PlanRequest, RawPlanEntry};
use crate::error::EngineResult;
use crate::models::{
    synthetic_obs_id, ModifiedJulianDate, PlannedObservation, QueryParameters, UNKNOWN_TARGET,
};
use crate::votable::{Cell, FieldSpec};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("obs_id", "meta.id;obs").with_utype("obscore:DataID.observationID"),
    FieldSpec::double("s_ra", "pos.eq.ra", "deg")
        .with_utype("obscore:Char.SpatialAxis.Coverage.Location.Coord.Position2D.Value2.C1"),
    FieldSpec::double("s_dec", "pos.eq.dec", "deg")
        .with_utype("obscore:Char.SpatialAxis.Coverage.Location.Coord.Position2D.Value2.C2"),
    FieldSpec::double("t_planning", "time.epoch", "d").with_utype("obsplan:Obsplan.tPlanning"),
    FieldSpec::double("t_start", "time.start", "d")
        .with_utype("obscore:Char.TimeAxis.Coverage.Bounds.Limits.StartTime"),
    FieldSpec::double("t_stop", "time.end", "d")
        .with_utype("obscore:Char.TimeAxis.Coverage.Bounds.Limits.StopTime"),
    FieldSpec::text("target_name", "meta.id;src").with_utype("obscore:Target.name"),
];

pub const OBSLOCTAP: ProtocolDescriptor = ProtocolDescriptor {
    name: "ObsLocTAP",
    description: "NASA Neil Gehrels Swift Observatory Science Operations Center - \
                  Observatory Locator Table Access Protocol (ObsLocTAP)",
    service_protocol: "ivo://ivoa.net/std/ObsLocTAP",
    fields: FIELDS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ObsLocTap;

#[async_trait]
impl ObservabilityProtocol for ObsLocTap {
    type Entry = RawPlanEntry;
    type Row = PlannedObservation;

    fn descriptor(&self) -> &'static ProtocolDescriptor {
        &OBSLOCTAP
    }

    async fn fetch(
        &self,
        engine: &dyn ObservatoryEngine,
        params: &QueryParameters,
    ) -> EngineResult<Vec<RawPlanEntry>> {
        let (begin, end) = engine_window(params)?;
        let pos = params.position();
        let request = PlanRequest {
            ra: pos.ra_deg(),
            dec: pos.dec_deg(),
            radius: pos.radius_deg(),
            begin,
            end,
        };
        engine.planned_observations(&request).await
    }

    /// `MIN_OBS` is not applied to planned observations.
    fn keep(&self, _params: &QueryParameters, _entry: &RawPlanEntry) -> bool {
        true
    }

    fn resolve(&self, ctx: &ResolveContext<'_>, index: usize, entry: RawPlanEntry) -> PlannedObservation {
        let pos = ctx.params.position();
        PlannedObservation {
            obs_id: entry.obs_id.unwrap_or_else(|| synthetic_obs_id(index)),
            ra: qtty::Degrees::new(entry.ra.unwrap_or(pos.ra_deg())),
            dec: qtty::Degrees::new(entry.dec.unwrap_or(pos.dec_deg())),
            t_planning: ctx.planned_at,
            t_start: ModifiedJulianDate::from(entry.begin),
            t_stop: ModifiedJulianDate::from(entry.end),
            target_name: entry.target_name.unwrap_or_else(|| UNKNOWN_TARGET.to_string()),
        }
    }

    fn position_value(&self, params: &QueryParameters) -> String {
        let pos = params.position();
        format!("{},{},{}", pos.ra_deg(), pos.dec_deg(), pos.radius_deg())
    }

    fn cells(&self, row: &PlannedObservation) -> Vec<Cell> {
        vec![
            Cell::from(row.obs_id.as_str()),
            Cell::from(row.ra.value()),
            Cell::from(row.dec.value()),
            Cell::from(row.t_planning.value()),
            Cell::from(row.t_start.value()),
            Cell::from(row.t_stop.value()),
            Cell::from(row.target_name.as_str()),
        ]
    }
}
