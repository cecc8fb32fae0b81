//! streamgraph-rs: stream graph normalization, layout and rendering.
//!
//! Heterogeneous tabular input (host dashboard payloads or CSV files) is
//! normalized into canonical `(date, category, value)` records, validated,
//! stacked with a baseline offset and laid out into a backend-agnostic
//! `RenderFrame`. Drawing backends implement [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{
    ChartDefaults, ChartElement, ErrorPanel, HostPayload, RenderContext, RenderOutcome,
    StreamChart, StreamGraphConfig, StreamGraphPipeline, StyleBag,
};
pub use error::{StreamGraphError, StreamGraphResult};
