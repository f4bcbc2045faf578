use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder once per process and describe the series.
    /// Later calls reuse the installed handle.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe_all();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe_all() {
    describe_counter!("scout_fetch_total", "Fetch requests per category.");
    describe_counter!(
        "scout_fetch_errors_total",
        "Fetches that failed at the model call."
    );
    describe_counter!(
        "scout_items_parsed_total",
        "Records parsed from model answers (before capping)."
    );
    describe_counter!(
        "scout_sources_extracted_total",
        "Source URLs extracted from model answers."
    );
    describe_histogram!("scout_model_latency_ms", "Gemini call latency in milliseconds.");
    describe_gauge!(
        "scout_cached_sources",
        "Sources currently cached per category."
    );
}
