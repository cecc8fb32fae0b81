use crate::core::Viewport;
use crate::error::{StreamGraphError, StreamGraphResult};
use crate::render::{AreaPrimitive, Color, LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// Backends paint in field order: background, rects, areas, lines, texts.
/// The `overlay_*` layers follow last so hover decorations sit above the
/// streams.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub foreground: Color,
    pub rects: Vec<RectPrimitive>,
    pub areas: Vec<AreaPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub overlay_rects: Vec<RectPrimitive>,
    pub overlay_lines: Vec<LinePrimitive>,
    pub overlay_texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::WHITE,
            foreground: Color::BLACK,
            rects: Vec::new(),
            areas: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            overlay_rects: Vec::new(),
            overlay_lines: Vec::new(),
            overlay_texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, background: Color, foreground: Color) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: AreaPrimitive) -> Self {
        self.areas.push(area);
        self
    }

    #[must_use]
    pub fn with_overlay_rect(mut self, rect: RectPrimitive) -> Self {
        self.overlay_rects.push(rect);
        self
    }

    #[must_use]
    pub fn has_overlay(&self) -> bool {
        !(self.overlay_rects.is_empty() && self.overlay_lines.is_empty() && self.overlay_texts.is_empty())
    }

    pub fn validate(&self) -> StreamGraphResult<()> {
        if !self.viewport.is_valid() {
            return Err(StreamGraphError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        self.background.validate()?;
        self.foreground.validate()?;
        for rect in self.rects.iter().chain(&self.overlay_rects) {
            rect.validate()?;
        }
        for area in &self.areas {
            area.validate()?;
        }
        for line in self.lines.iter().chain(&self.overlay_lines) {
            line.validate()?;
        }
        for text in self.texts.iter().chain(&self.overlay_texts) {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.areas.is_empty()
            && !self.has_overlay()
    }
}
