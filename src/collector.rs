// ABOUTME: Collector orchestrating login, patient resolution, graph fetch, and metric emission
// ABOUTME: Owns exactly one API client and session; one gather cycle at a time via &mut self
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collector
//!
//! Entry point driven by an external scheduler. `init` logs in once;
//! `gather` runs one full poll cycle and either emits exactly one complete
//! metric or returns an error and emits nothing.

use crate::api::LibreLinkUpClient;
use crate::config::{self, CollectorConfig};
use crate::connections::resolve_patient_id;
use crate::metrics::metric_from_graph;
use crate::region::resolve_origin;
use crate::sink::MetricSink;
use librelinkup_core::constants::COLLECTOR_NAME;
use librelinkup_core::{CollectorError, CollectorResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, info_span, warn, Instrument};
use url::Url;

const CONNECTIONS_CONTEXT: &str = "error getting connections";
const GRAPH_CONTEXT: &str = "error getting glucose measurement from the llu backend";

/// Lifecycle of a collector instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// Constructed, not logged in yet
    Uninitialized,
    /// Login succeeded, no cycle finished yet
    Initialized,
    /// Last cycle emitted a metric
    PollSucceeded,
    /// Last cycle failed
    PollFailed,
}

/// LibreLinkUp glucose collector
pub struct Collector {
    config: CollectorConfig,
    client: LibreLinkUpClient,
    state: CollectorState,
}

impl Collector {
    /// Name the collector registers under
    pub const NAME: &'static str = COLLECTOR_NAME;

    /// Resolve the backend origin and build the API client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the region is unknown, the API URL
    /// override is not a valid URL, a timeout is zero, or the protocol
    /// headers are invalid
    pub fn new(config: CollectorConfig) -> CollectorResult<Self> {
        config.http.validate()?;
        let origin = base_origin(&config)?;
        let client = LibreLinkUpClient::new(origin, &config)?;
        info!(
            collector = Self::NAME,
            base_url = client.base_url(),
            "LibreLinkUp collector configured"
        );
        Ok(Self {
            config,
            client,
            state: CollectorState::Uninitialized,
        })
    }

    /// Documented sample configuration
    #[must_use]
    pub const fn sample_config() -> &'static str {
        config::sample_config()
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> CollectorState {
        self.state
    }

    /// Configuration this collector was built from
    #[must_use]
    pub const fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Underlying API client
    #[must_use]
    pub const fn client(&self) -> &LibreLinkUpClient {
        &self.client
    }

    /// Log in; failures here are meant to abort startup
    ///
    /// # Errors
    ///
    /// Returns the login error unchanged
    pub async fn init(&mut self) -> CollectorResult<()> {
        self.client.login().await?;
        self.state = CollectorState::Initialized;
        Ok(())
    }

    /// Run one poll cycle and emit the resulting metric to `sink`
    ///
    /// # Errors
    ///
    /// Returns the first error of the cycle; nothing is emitted in that case
    /// and the session is left as the cycle found it (or as a re-login set it)
    pub async fn gather<S: MetricSink + ?Sized>(&mut self, sink: &mut S) -> CollectorResult<()> {
        let span = info_span!("gather", collector = Self::NAME);
        let result = self.poll(sink).instrument(span).await;
        self.state = if result.is_ok() {
            CollectorState::PollSucceeded
        } else {
            CollectorState::PollFailed
        };
        result
    }

    /// Gather once per `period` until `shutdown` resolves
    ///
    /// Cycle failures are logged and the next tick starts fresh. `shutdown`
    /// is also watched while a cycle is in flight, which abandons that cycle.
    pub async fn run_until<S, F>(&mut self, sink: &mut S, period: Duration, shutdown: F)
    where
        S: MetricSink + ?Sized,
        F: Future<Output = ()>,
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                () = &mut shutdown => break,
                result = self.gather(&mut *sink) => {
                    if let Err(e) = result {
                        warn!(error = %e, kind = ?e.kind(), "LibreLinkUp poll cycle failed");
                    }
                }
            }
        }
        info!("Shutdown signal received, stopping collector");
    }

    async fn poll<S: MetricSink + ?Sized>(&mut self, sink: &mut S) -> CollectorResult<()> {
        let connections = self
            .client
            .connections()
            .await
            .map_err(|e| e.with_context(CONNECTIONS_CONTEXT))?;
        if connections.status != 0 {
            return Err(CollectorError::InvalidData {
                details: format!("connections response carried status {}", connections.status),
            }
            .with_context(CONNECTIONS_CONTEXT));
        }

        let patient_id = resolve_patient_id(&connections.data, self.config.patient_id.as_deref())?;

        let graph = self
            .client
            .graph(&patient_id)
            .await
            .map_err(|e| e.with_context(GRAPH_CONTEXT))?;

        let metric = metric_from_graph(&graph, &patient_id)?;
        info!(
            patient_id = %metric.tags.patient_id,
            sensor_sn = %metric.tags.sensor_sn,
            mg_dl = metric.fields.mg_dl,
            "Glucose measurement collected"
        );
        sink.add_metric(metric)
    }
}

/// API URL override if set, otherwise the regional origin
fn base_origin(config: &CollectorConfig) -> CollectorResult<String> {
    let origin = match &config.api_url {
        Some(url) => url.clone(),
        None => resolve_origin(&config.region),
    };
    if origin.is_empty() {
        return Err(CollectorError::config(format!(
            "unknown region '{}'",
            config.region
        )));
    }
    Url::parse(&origin)
        .map_err(|e| CollectorError::config(format!("invalid API base URL '{origin}': {e}")))?;
    Ok(origin)
}
