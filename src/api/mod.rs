mod app_config;
mod axis_ticks;
mod chart_options;
mod column_roles;
mod config_schema;
mod data_source;
mod host_payload;
mod layout;
mod normalizer;
mod pipeline;
mod stream_chart;
mod style;
mod tooltip;
mod validation;

pub use app_config::{StandaloneConfig, StreamGraphConfig};
pub use chart_options::{
    ChartDefaults, Margins, ResolvedChartOptions, STYLE_CHART_HEIGHT, STYLE_CHART_WIDTH,
    STYLE_COLOR_SCHEME, STYLE_FILL_COLOR, STYLE_FONT_COLOR, STYLE_MARGIN_BOTTOM,
    STYLE_MARGIN_LEFT, STYLE_MARGIN_RIGHT, STYLE_MARGIN_TOP, STYLE_STREAM_OFFSET, STYLE_TIP,
    TipMode,
};
pub use column_roles::{
    ColumnMapping, ColumnMappingOutcome, ColumnRole, resolve_column_mapping, role_for_name,
};
pub use config_schema::{
    Cardinality, ConfigSchema, DataElement, DataElementKind, DataSection, SelectOption,
    StyleElement, StyleElementKind, StyleSection, config_schema,
};
pub use data_source::{
    CsvFileSource, DataSource, InMemorySource, auto_type, load_first_available, parse_csv_rows,
};
pub use host_payload::{FieldMeta, HostPayload, HostRow, HostTables, TabularRow};
pub use layout::{
    LEGEND_ROW_HEIGHT, LEGEND_SWATCH_SIZE, LegendLayout, LegendSlot, resolve_responsive_margins,
};
pub use normalizer::{
    NormalizeOptions, NumericPolicy, PartialRecord, coerce_value, normalize_host_payload,
    normalize_tabular_rows,
};
pub use pipeline::{
    CHART_CONTAINER_ID, ChartElement, ErrorPanel, InlineStyle, RenderContext, RenderOutcome,
    RenderPhase, StreamGraphPipeline,
};
pub use stream_chart::{PlotArea, Pointer, StreamChart, X_AXIS_LABEL, Y_AXIS_LABEL};
pub use style::{StyleBag, extract_color_value};
pub use tooltip::{
    PointTip, TOOLTIP_PANEL_WIDTH, TOOLTIP_RIGHT_CLEARANCE, TooltipEntry, TooltipPanel,
    format_thousands, format_tooltip_date, panel_height,
};
pub use validation::validate_records;
