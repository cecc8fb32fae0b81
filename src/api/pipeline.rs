use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::data_source::{DataSource, load_first_available};
use crate::api::normalizer::{normalize_host_payload, normalize_tabular_rows};
use crate::api::stream_chart::{Pointer, StreamChart};
use crate::api::validation::validate_records;
use crate::api::{
    ChartDefaults, HostPayload, NormalizeOptions, PartialRecord, ResolvedChartOptions,
    StreamGraphConfig, StyleBag, TabularRow, TipMode,
};
use crate::core::{CanonicalRecord, Viewport};
use crate::error::{StreamGraphError, StreamGraphResult};
use crate::render::{Renderer, escape_xml};

/// Id of the element the chart is mounted into.
pub const CHART_CONTAINER_ID: &str = "stream-chart";

const ERROR_PANEL_TITLE: &str = "Data Error";
const ERROR_PANEL_HINT: &str = "Check the logs for details";

/// Where a render pass currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderPhase {
    #[default]
    Idle,
    Validating,
    Configuring,
    Rendered,
    Failed,
}

/// Per-call environment reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderContext {
    /// Host container size; enables the hosted dimension clamp.
    pub container: Option<Viewport>,
    pub pointer: Option<Pointer>,
}

impl RenderContext {
    #[must_use]
    pub fn with_container(mut self, container: Viewport) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Inline style applied to the drawable element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyle {
    pub background_color: String,
    pub text_color: String,
}

impl InlineStyle {
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "background-color: {}; color: {}; overflow: visible",
            self.background_color, self.text_color
        )
    }
}

/// Successful render: the backend element plus what is needed to mount it.
#[derive(Debug, Clone)]
pub struct ChartElement<E> {
    pub element: E,
    pub style: InlineStyle,
    pub container_id: &'static str,
    pub chart: StreamChart,
}

/// Human-readable failure shown in place of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
    pub hint: String,
}

impl ErrorPanel {
    #[must_use]
    pub fn from_error(err: &StreamGraphError) -> Self {
        Self {
            title: ERROR_PANEL_TITLE.to_owned(),
            message: err.to_string(),
            hint: ERROR_PANEL_HINT.to_owned(),
        }
    }

    /// HTML fragment that replaces the document body.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"error-container\" style=\"padding: 20px; color: red; text-align: center\">\n  <h3>{}</h3>\n  <p>{}</p>\n  <p>{}</p>\n</div>\n",
            escape_xml(&self.title),
            escape_xml(&self.message),
            escape_xml(&self.hint),
        )
    }
}

#[derive(Debug, Clone)]
pub enum RenderOutcome<E> {
    Rendered(ChartElement<E>),
    Failed(ErrorPanel),
}

impl<E> RenderOutcome<E> {
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    #[must_use]
    pub fn chart_element(&self) -> Option<&ChartElement<E>> {
        match self {
            Self::Rendered(element) => Some(element),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error_panel(&self) -> Option<&ErrorPanel> {
        match self {
            Self::Rendered(_) => None,
            Self::Failed(panel) => Some(panel),
        }
    }
}

/// Runs normalization, validation, configuration and drawing for one payload.
///
/// Each call is independent; only the configured defaults and normalize
/// options persist between calls. Failures never escape a render call:
/// they come back as [`RenderOutcome::Failed`].
pub struct StreamGraphPipeline<R: Renderer> {
    renderer: R,
    defaults: ChartDefaults,
    standalone_tip: Option<TipMode>,
    normalize: NormalizeOptions,
    phase: RenderPhase,
}

impl<R: Renderer> StreamGraphPipeline<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            defaults: ChartDefaults::default(),
            standalone_tip: None,
            normalize: NormalizeOptions::default(),
            phase: RenderPhase::Idle,
        }
    }

    #[must_use]
    pub fn from_config(renderer: R, config: &StreamGraphConfig) -> Self {
        Self::new(renderer)
            .with_defaults(config.defaults.clone())
            .with_standalone_tip(config.standalone.tip)
            .with_normalize_options(config.normalize_options())
    }

    #[must_use]
    pub fn with_standalone_tip(mut self, tip: Option<TipMode>) -> Self {
        self.standalone_tip = tip;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: ChartDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_normalize_options(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    #[must_use]
    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    #[must_use]
    pub fn defaults(&self) -> &ChartDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Renders a host payload, styled by the payload's own style bag.
    pub fn render_host(
        &mut self,
        payload: &HostPayload,
        context: &RenderContext,
    ) -> RenderOutcome<R::Element> {
        info!(rows = payload.rows().len(), "render pass started (host payload)");
        self.phase = RenderPhase::Validating;
        let normalized = normalize_host_payload(payload, self.normalize);
        self.finish(normalized, &payload.style, context)
    }

    /// Renders free-form tabular rows under `style`.
    pub fn render_tabular(
        &mut self,
        rows: &[TabularRow],
        style: &StyleBag,
        context: &RenderContext,
    ) -> RenderOutcome<R::Element> {
        info!(rows = rows.len(), "render pass started (tabular rows)");
        self.phase = RenderPhase::Validating;
        let normalized = normalize_tabular_rows(rows, self.normalize);
        self.finish(normalized, style, context)
    }

    /// Loads the first valid source and renders it with the configured defaults as style.
    pub fn render_standalone(
        &mut self,
        sources: &[Box<dyn DataSource>],
        context: &RenderContext,
    ) -> RenderOutcome<R::Element> {
        info!(candidates = sources.len(), "render pass started (standalone)");
        self.phase = RenderPhase::Validating;
        let mut defaults = self.defaults.clone();
        if let Some(tip) = self.standalone_tip {
            defaults.tip = Some(tip);
        }
        let style = defaults.to_style_bag();
        let normalized = load_first_available(sources)
            .and_then(|rows| normalize_tabular_rows(&rows, self.normalize));
        self.finish(normalized, &style, context)
    }

    fn finish(
        &mut self,
        normalized: StreamGraphResult<Vec<PartialRecord>>,
        style: &StyleBag,
        context: &RenderContext,
    ) -> RenderOutcome<R::Element> {
        match self.try_finish(normalized, style, context) {
            Ok(element) => {
                self.phase = RenderPhase::Rendered;
                info!(
                    width = element.chart.options().width,
                    height = element.chart.options().height,
                    categories = element.chart.layout().layers.len(),
                    "render pass finished"
                );
                RenderOutcome::Rendered(element)
            }
            Err(err) => {
                self.phase = RenderPhase::Failed;
                error!(error = %err, "render pass failed");
                RenderOutcome::Failed(ErrorPanel::from_error(&err))
            }
        }
    }

    fn try_finish(
        &mut self,
        normalized: StreamGraphResult<Vec<PartialRecord>>,
        style: &StyleBag,
        context: &RenderContext,
    ) -> StreamGraphResult<ChartElement<R::Element>> {
        let records = validate_records(normalized?)?;
        debug!(records = records.len(), "validation passed");

        self.phase = RenderPhase::Configuring;
        let options = ResolvedChartOptions::resolve(style, &self.defaults, context.container);
        self.draw(records, options, context).map_err(into_render_error)
    }

    fn draw(
        &mut self,
        records: Vec<CanonicalRecord>,
        options: ResolvedChartOptions,
        context: &RenderContext,
    ) -> StreamGraphResult<ChartElement<R::Element>> {
        let chart = StreamChart::configure(records, &options)?;
        let frame = chart.build_frame(context.pointer)?;
        let element = self.renderer.render(&frame)?;
        Ok(ChartElement {
            element,
            style: InlineStyle {
                background_color: options.background_color.clone(),
                text_color: options.text_color.clone(),
            },
            container_id: CHART_CONTAINER_ID,
            chart,
        })
    }
}

fn into_render_error(err: StreamGraphError) -> StreamGraphError {
    match err {
        StreamGraphError::Render(_) => err,
        other => StreamGraphError::Render(other.to_string()),
    }
}
