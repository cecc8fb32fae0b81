use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::axis_ticks::{
    AXIS_TIME_TARGET_SPACING_PX, AXIS_VALUE_TARGET_SPACING_PX, axis_tick_target_count,
    format_value_tick, linear_ticks, nice_step, time_ticks,
};
use crate::api::layout::{LEGEND_SWATCH_SIZE, LegendLayout, resolve_responsive_margins};
use crate::api::tooltip::{
    PointTip, TOOLTIP_INNER_BOTTOM, TOOLTIP_INNER_SIDE, TOOLTIP_INNER_TOP, TooltipEntry,
    TooltipPanel,
};
use crate::api::{Margins, ResolvedChartOptions, TipMode};
use crate::core::primitives::unix_seconds_to_date;
use crate::core::{
    CanonicalRecord, LinearScale, StackLayout, StreamOffset, TimeScale, basis_area_path,
};
use crate::error::StreamGraphResult;
use crate::render::{
    AreaPrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

const AXIS_FONT_SIZE_PX: f64 = 10.0;
const LABEL_FONT_SIZE_PX: f64 = 11.0;
const TOOLTIP_FONT_SIZE_PX: f64 = 12.0;
const TOOLTIP_HEADER_FONT_SIZE_PX: f64 = 13.0;
const TICK_LENGTH_PX: f64 = 6.0;
const GRID_ALPHA: f64 = 0.1;
const MIN_PLOT_HEIGHT_FRACTION: f64 = 0.5;
const POINT_TIP_WIDTH: f64 = 150.0;
const POINT_TIP_LINE_HEIGHT: f64 = 14.0;

pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Value";

/// Pixel rectangle enclosing the stacked areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Pointer position in chart pixels; `y` is optional for x-only hover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: Option<f64>,
}

impl Pointer {
    #[must_use]
    pub fn at_x(x: f64) -> Self {
        Self { x, y: None }
    }

    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }
}

/// A stream graph fully configured for drawing.
///
/// Holds the filtered records, the stacked layers, responsive geometry and
/// both scales, so frames and tooltip queries need no further input.
#[derive(Debug, Clone)]
pub struct StreamChart {
    options: ResolvedChartOptions,
    records: Vec<CanonicalRecord>,
    layout: StackLayout,
    margins: Margins,
    legend: LegendLayout,
    plot: PlotArea,
    x_scale: TimeScale,
    y_scale: LinearScale,
    colors: Vec<String>,
}

impl StreamChart {
    /// Filters, sorts, stacks and lays out `records` under `options`.
    pub fn configure(
        records: Vec<CanonicalRecord>,
        options: &ResolvedChartOptions,
    ) -> StreamGraphResult<Self> {
        let all_dates: Vec<NaiveDate> = records.iter().map(|record| record.date).collect();
        let received = records.len();
        let mut kept: Vec<CanonicalRecord> = records
            .into_iter()
            .filter(|record| record.value.is_finite() && record.value > 0.0)
            .collect();
        kept.sort_by_key(|record| record.date);
        debug!(received, kept = kept.len(), "filtered non-positive values");

        let layout = StackLayout::from_records(&kept, options.stream_offset);
        let width = f64::from(options.width);
        let height = f64::from(options.height);
        let margins = resolve_responsive_margins(options.margins, width, height);

        let legend = LegendLayout::for_width(width);
        let categories = layout.layers.len();
        let plot_bottom = height - margins.bottom;
        let max_band = ((plot_bottom - margins.top) * (1.0 - MIN_PLOT_HEIGHT_FRACTION)).max(0.0);
        let band = legend.band_height(categories).min(max_band);
        let plot = PlotArea {
            left: margins.left,
            top: band + margins.top,
            right: width - margins.right,
            bottom: plot_bottom,
        };
        debug!(?margins, ?plot, legend_columns = legend.columns, "resolved chart geometry");

        let x_scale = if layout.dates.is_empty() {
            TimeScale::from_dates(all_dates, plot.left, plot.right)?
        } else {
            TimeScale::from_dates(layout.dates.iter().copied(), plot.left, plot.right)?
        };
        let (low, high) = match (layout.extent(), options.stream_offset) {
            (None, _) => (0.0, 1.0),
            (Some((low, high)), StreamOffset::None | StreamOffset::Expand) => {
                (low.min(0.0), high.max(0.0))
            }
            (Some(extent), _) => extent,
        };
        let y_scale = if high > low {
            LinearScale::new(low, high, plot.bottom, plot.top)?
        } else {
            LinearScale::from_extent(low, high, 1.0, plot.bottom, plot.top)?
        };

        let colors = (0..categories)
            .map(|index| options.color_scheme.color_at(index).to_owned())
            .collect();

        Ok(Self {
            options: options.clone(),
            records: kept,
            layout,
            margins,
            legend,
            plot,
            x_scale,
            y_scale,
            colors,
        })
    }

    #[must_use]
    pub fn options(&self) -> &ResolvedChartOptions {
        &self.options
    }

    /// Records that reach the renderer: positive values, ascending by date.
    #[must_use]
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    #[must_use]
    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.layout.categories()
    }

    /// Margins after the responsive clamp.
    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    #[must_use]
    pub fn legend(&self) -> LegendLayout {
        self.legend
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn x_scale(&self) -> TimeScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn category_color(&self, category: &str) -> Option<&str> {
        self.layout
            .layers
            .iter()
            .position(|layer| layer.category == category)
            .and_then(|index| self.colors.get(index))
            .map(String::as_str)
    }

    /// Index into `layout().dates` of the date closest to `pointer_x`.
    pub fn nearest_date_index(&self, pointer_x: f64) -> StreamGraphResult<Option<usize>> {
        let mut best: Option<(OrderedFloat<f64>, usize)> = None;
        for (index, &date) in self.layout.dates.iter().enumerate() {
            let distance = OrderedFloat((self.x_scale.date_to_pixel(date)? - pointer_x).abs());
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, index));
            }
        }
        Ok(best.map(|(_, index)| index))
    }

    /// Grouped tooltip panel for the date nearest to `pointer_x`.
    pub fn tooltip_at(&self, pointer_x: f64) -> StreamGraphResult<Option<TooltipPanel>> {
        let Some(column) = self.nearest_date_index(pointer_x)? else {
            return Ok(None);
        };
        let date = self.layout.dates[column];
        let entries = self
            .layout
            .layers
            .iter()
            .zip(&self.colors)
            .filter_map(|(layer, color)| {
                let value = layer.points.get(column)?.value;
                (value > 0.0).then(|| TooltipEntry {
                    category: layer.category.clone(),
                    value,
                    color: color.clone(),
                })
            })
            .collect();

        Ok(Some(TooltipPanel::layout(
            date,
            entries,
            pointer_x,
            f64::from(self.options.width),
            self.margins.right,
            self.plot.top,
            self.plot.bottom,
        )))
    }

    /// Single-point tip at the nearest date.
    ///
    /// With a pointer `y`, the layer whose band contains it wins; otherwise
    /// the layer with the largest value at that date.
    pub fn point_tip_at(&self, pointer: Pointer) -> StreamGraphResult<Option<PointTip>> {
        let Some(column) = self.nearest_date_index(pointer.x)? else {
            return Ok(None);
        };

        let mut candidate: Option<(usize, OrderedFloat<f64>)> = None;
        for (index, layer) in self.layout.layers.iter().enumerate() {
            let Some(point) = layer.points.get(column) else {
                continue;
            };
            if point.value <= 0.0 {
                continue;
            }
            let score = match pointer.y {
                Some(y) => {
                    let top = self.y_scale.to_pixel(point.y1)?;
                    let bottom = self.y_scale.to_pixel(point.y0)?;
                    if y < top.min(bottom) || y > top.max(bottom) {
                        continue;
                    }
                    OrderedFloat(point.value)
                }
                None => OrderedFloat(point.value),
            };
            if candidate.is_none_or(|(_, best)| score > best) {
                candidate = Some((index, score));
            }
        }

        let Some((index, _)) = candidate else {
            return Ok(None);
        };
        let layer = &self.layout.layers[index];
        let point = layer.points[column];
        let x = self.x_scale.date_to_pixel(point.date)?;
        let y = self.y_scale.to_pixel((point.y0 + point.y1) / 2.0)?;
        Ok(Some(PointTip {
            category: layer.category.clone(),
            date: point.date,
            value: point.value,
            color: self.colors[index].clone(),
            x,
            y,
        }))
    }

    /// Builds the backend-agnostic frame, with the hover overlay for `pointer`.
    pub fn build_frame(&self, pointer: Option<Pointer>) -> StreamGraphResult<RenderFrame> {
        let background = theme_color(&self.options.background_color, Color::WHITE);
        let foreground = theme_color(&self.options.text_color, Color::BLACK);
        let mut frame =
            RenderFrame::new(self.options.viewport()).with_colors(background, foreground);

        self.push_value_axis(&mut frame, foreground)?;
        self.push_areas(&mut frame)?;
        self.push_time_axis(&mut frame, foreground)?;
        self.push_legend(&mut frame, foreground)?;

        match (self.options.tip, pointer) {
            (TipMode::Custom, Some(pointer)) => {
                if let Some(panel) = self.tooltip_at(pointer.x)? {
                    push_tooltip_panel(&mut frame, &panel, background, foreground)?;
                }
            }
            (TipMode::Default, Some(pointer)) => {
                if let Some(tip) = self.point_tip_at(pointer)? {
                    self.push_point_tip(&mut frame, &tip, background, foreground)?;
                }
            }
            _ => {}
        }

        debug!(
            areas = frame.areas.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "built stream graph frame"
        );
        Ok(frame)
    }

    fn push_areas(&self, frame: &mut RenderFrame) -> StreamGraphResult<()> {
        for (layer, color) in self.layout.layers.iter().zip(&self.colors) {
            let mut top = Vec::with_capacity(layer.points.len());
            let mut bottom = Vec::with_capacity(layer.points.len());
            for point in &layer.points {
                let x = self.x_scale.date_to_pixel(point.date)?;
                top.push((x, self.y_scale.to_pixel(point.y1)?));
                bottom.push((x, self.y_scale.to_pixel(point.y0)?));
            }
            let path = basis_area_path(&top, &bottom);
            if path.is_empty() {
                continue;
            }
            let mut area = AreaPrimitive::new(path, Color::from_hex(color)?);
            if self.options.tip == TipMode::Default {
                area = area.with_title(layer.category.clone());
            }
            frame.areas.push(area);
        }
        Ok(())
    }

    fn push_value_axis(&self, frame: &mut RenderFrame, foreground: Color) -> StreamGraphResult<()> {
        let (start, end) = self.y_scale.domain();
        let count = axis_tick_target_count(self.plot.height(), AXIS_VALUE_TARGET_SPACING_PX, 2, 10);
        let step = nice_step(start, end, count).unwrap_or(1.0);
        for value in linear_ticks(start, end, count) {
            let y = self.y_scale.to_pixel(value)?;
            frame.lines.push(LinePrimitive::new(
                self.plot.left,
                y,
                self.plot.right,
                y,
                1.0,
                foreground.with_alpha(GRID_ALPHA),
            ));
            frame.lines.push(LinePrimitive::new(
                self.plot.left - TICK_LENGTH_PX,
                y,
                self.plot.left,
                y,
                1.0,
                foreground,
            ));
            frame.texts.push(TextPrimitive::new(
                format_value_tick(value, step),
                self.plot.left - TICK_LENGTH_PX - 2.0,
                y + AXIS_FONT_SIZE_PX / 3.0,
                AXIS_FONT_SIZE_PX,
                foreground,
                TextHAlign::Right,
            ));
        }
        frame.texts.push(TextPrimitive::new(
            Y_AXIS_LABEL,
            (self.plot.left - TICK_LENGTH_PX).max(0.0),
            (self.plot.top - 6.0).max(LABEL_FONT_SIZE_PX),
            LABEL_FONT_SIZE_PX,
            foreground,
            TextHAlign::Right,
        ));
        Ok(())
    }

    fn push_time_axis(&self, frame: &mut RenderFrame, foreground: Color) -> StreamGraphResult<()> {
        let bottom = self.plot.bottom;
        frame.lines.push(LinePrimitive::new(
            self.plot.left,
            bottom,
            self.plot.right,
            bottom,
            1.0,
            foreground,
        ));

        let (start_seconds, end_seconds) = self.x_scale.domain_seconds();
        let (Some(start), Some(end)) = (
            unix_seconds_to_date(start_seconds),
            unix_seconds_to_date(end_seconds),
        ) else {
            return Ok(());
        };
        let count = axis_tick_target_count(self.plot.width(), AXIS_TIME_TARGET_SPACING_PX, 2, 12);
        let (interval, ticks) = time_ticks(start, end, count);
        for date in ticks {
            let x = self.x_scale.date_to_pixel(date)?;
            if x < self.plot.left - 0.5 || x > self.plot.right + 0.5 {
                continue;
            }
            frame.lines.push(LinePrimitive::new(
                x,
                bottom,
                x,
                bottom + TICK_LENGTH_PX,
                1.0,
                foreground,
            ));
            frame.texts.push(TextPrimitive::new(
                interval.format(date),
                x,
                bottom + TICK_LENGTH_PX + AXIS_FONT_SIZE_PX + 2.0,
                AXIS_FONT_SIZE_PX,
                foreground,
                TextHAlign::Center,
            ));
        }

        let height = f64::from(self.options.height);
        frame.texts.push(TextPrimitive::new(
            X_AXIS_LABEL,
            self.plot.right,
            (bottom + TICK_LENGTH_PX + 2.0 * AXIS_FONT_SIZE_PX + 8.0).min(height - 2.0),
            LABEL_FONT_SIZE_PX,
            foreground,
            TextHAlign::Right,
        ));
        Ok(())
    }

    fn push_legend(&self, frame: &mut RenderFrame, foreground: Color) -> StreamGraphResult<()> {
        let layers = &self.layout.layers;
        let slots = self.legend.slots(
            layers.len(),
            f64::from(self.options.width),
            self.margins.left,
        );
        for ((layer, color), slot) in layers.iter().zip(&self.colors).zip(slots) {
            let y = slot.y;
            frame.rects.push(RectPrimitive::new(
                slot.x,
                y,
                LEGEND_SWATCH_SIZE,
                LEGEND_SWATCH_SIZE,
                Color::from_hex(color)?,
            ));
            frame.texts.push(TextPrimitive::new(
                layer.category.clone(),
                slot.x + LEGEND_SWATCH_SIZE + 4.0,
                y + LEGEND_SWATCH_SIZE - 2.0,
                LABEL_FONT_SIZE_PX,
                foreground,
                TextHAlign::Left,
            ));
        }
        Ok(())
    }

    fn push_point_tip(
        &self,
        frame: &mut RenderFrame,
        tip: &PointTip,
        background: Color,
        foreground: Color,
    ) -> StreamGraphResult<()> {
        let lines: Vec<String> = tip.label().lines().map(str::to_owned).collect();
        let height = lines.len() as f64 * POINT_TIP_LINE_HEIGHT + 8.0;
        let chart_width = f64::from(self.options.width);
        let x = (tip.x + 8.0).min(chart_width - POINT_TIP_WIDTH).max(0.0);
        let y = (tip.y - height / 2.0).max(0.0);
        frame.overlay_rects.push(
            RectPrimitive::new(x, y, POINT_TIP_WIDTH, height, background).with_stroke(foreground),
        );
        for (index, line) in lines.into_iter().enumerate() {
            let mut text = TextPrimitive::new(
                line,
                x + 8.0,
                y + (index + 1) as f64 * POINT_TIP_LINE_HEIGHT,
                TOOLTIP_FONT_SIZE_PX,
                foreground,
                TextHAlign::Left,
            );
            if index == 0 {
                text = text.bold();
            }
            frame.overlay_texts.push(text);
        }
        Ok(())
    }
}

fn push_tooltip_panel(
    frame: &mut RenderFrame,
    panel: &TooltipPanel,
    background: Color,
    foreground: Color,
) -> StreamGraphResult<()> {
    frame.overlay_lines.push(LinePrimitive::new(
        panel.rule_x,
        panel.rule_top,
        panel.rule_x,
        panel.rule_bottom,
        1.0,
        foreground,
    ));
    frame.overlay_rects.push(
        RectPrimitive::new(panel.x, 0.0, panel.width, panel.height, background)
            .with_stroke(foreground),
    );
    frame.overlay_texts.push(
        TextPrimitive::new(
            panel.header(),
            panel.x + TOOLTIP_INNER_SIDE,
            TOOLTIP_HEADER_FONT_SIZE_PX,
            TOOLTIP_HEADER_FONT_SIZE_PX,
            foreground,
            TextHAlign::Left,
        )
        .bold(),
    );

    let rows = panel.entries.len().max(1) as f64;
    let band = (panel.height - TOOLTIP_INNER_TOP - TOOLTIP_INNER_BOTTOM) / rows;
    for (index, entry) in panel.entries.iter().enumerate() {
        let center = TOOLTIP_INNER_TOP + band * (index as f64 + 0.5);
        frame.overlay_rects.push(RectPrimitive::new(
            panel.x + TOOLTIP_INNER_SIDE + 6.0,
            center - 6.0,
            12.0,
            12.0,
            Color::from_hex(&entry.color)?,
        ));
        frame.overlay_texts.push(TextPrimitive::new(
            entry.category.clone(),
            panel.x + TOOLTIP_INNER_SIDE + 24.0,
            center + TOOLTIP_FONT_SIZE_PX / 3.0,
            TOOLTIP_FONT_SIZE_PX,
            foreground,
            TextHAlign::Left,
        ));
        frame.overlay_texts.push(
            TextPrimitive::new(
                entry.value_label(),
                panel.right() - TOOLTIP_INNER_SIDE - 12.0,
                center + TOOLTIP_FONT_SIZE_PX / 3.0,
                TOOLTIP_FONT_SIZE_PX,
                foreground,
                TextHAlign::Right,
            )
            .bold(),
        );
    }
    Ok(())
}

fn theme_color(text: &str, fallback: Color) -> Color {
    Color::from_hex(text).unwrap_or_else(|err| {
        warn!(color = text, error = %err, "unparseable theme color, using fallback");
        fallback
    })
}
