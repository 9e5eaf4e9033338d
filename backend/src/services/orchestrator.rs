//! Query orchestration shared by every VO protocol.
//!
//! ```text
//! QueryParameters ──► engine (spawned task) ──► keep() ──► truncate(MAXREC)
//!                                                              │
//!                  XML ◄── VoTableDocument ◄── cells() ◄── resolve()
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::document::build_document;
use super::protocol::{ObservabilityProtocol, ResolveContext};
use crate::engine::ObservatoryEngine;
use crate::error::{EngineResult, QueryResult, VoTableError};
use crate::models::{ModifiedJulianDate, QueryParameters};

/// Runs one protocol's queries against an engine.
pub struct QueryOrchestrator<P: ObservabilityProtocol> {
    protocol: Arc<P>,
    engine: Arc<dyn ObservatoryEngine>,
}

impl<P: ObservabilityProtocol> Clone for QueryOrchestrator<P> {
    fn clone(&self) -> Self {
        Self {
            protocol: Arc::clone(&self.protocol),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<P: ObservabilityProtocol> QueryOrchestrator<P> {
    pub fn new(protocol: P, engine: Arc<dyn ObservatoryEngine>) -> Self {
        Self {
            protocol: Arc::new(protocol),
            engine,
        }
    }

    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Filtered, truncated result rows in engine order.
    pub async fn execute(&self, params: &QueryParameters) -> EngineResult<Vec<P::Row>> {
        self.execute_at(params, ModifiedJulianDate::now()).await
    }

    /// As [`execute`](Self::execute), stamping planning rows with `planned_at`.
    pub async fn execute_at(
        &self,
        params: &QueryParameters,
        planned_at: ModifiedJulianDate,
    ) -> EngineResult<Vec<P::Row>> {
        let name = self.protocol.descriptor().name;
        if params.is_metadata_only() {
            debug!("{}: MAXREC=0, skipping engine", name);
            return Ok(Vec::new());
        }

        // Engine call runs on its own task
        let protocol = Arc::clone(&self.protocol);
        let engine = Arc::clone(&self.engine);
        let task_params = params.clone();
        let entries = tokio::spawn(async move { protocol.fetch(engine.as_ref(), &task_params).await })
            .await?
            .inspect_err(|e| warn!("{}: engine {} failed: {}", name, self.engine.name(), e))?;

        let received = entries.len();
        let mut kept: Vec<P::Entry> = entries
            .into_iter()
            .filter(|entry| self.protocol.keep(params, entry))
            .collect();
        let qualifying = kept.len();
        if let Some(max_rec) = params.max_rec() {
            kept.truncate(usize::try_from(max_rec).unwrap_or(usize::MAX));
        }
        debug!(
            "{}: engine returned {} entries, {} kept, {} after MAXREC",
            name,
            received,
            qualifying,
            kept.len()
        );

        let ctx = ResolveContext { params, planned_at };
        Ok(kept
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.protocol.resolve(&ctx, index, entry))
            .collect())
    }

    /// Serialize `rows` as this protocol's VOTable.
    pub fn render(
        &self,
        params: &QueryParameters,
        rows: &[P::Row],
        query_url: &str,
        now: DateTime<Utc>,
    ) -> Result<String, VoTableError> {
        let cells = rows.iter().map(|row| self.protocol.cells(row)).collect();
        build_document(
            self.protocol.descriptor(),
            params,
            self.protocol.position_value(params),
            cells,
            query_url,
            now,
        )
        .to_xml()
    }

    /// Execute and render in one step.
    pub async fn run(&self, params: &QueryParameters, query_url: &str) -> QueryResult<String> {
        let rows = self.execute(params).await?;
        Ok(self.render(params, &rows, query_url, Utc::now())?)
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
