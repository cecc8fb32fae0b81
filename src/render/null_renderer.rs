use crate::error::StreamGraphResult;
use crate::render::{RenderFrame, Renderer};

/// Primitive counts of the last validated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub areas: usize,
    pub lines: usize,
    pub rects: usize,
    pub texts: usize,
    pub overlays: usize,
}

/// No-op renderer used by tests and headless pipeline usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// without a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_stats: RenderStats,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    type Element = RenderStats;

    fn render(&mut self, frame: &RenderFrame) -> StreamGraphResult<RenderStats> {
        frame.validate()?;
        self.last_stats = RenderStats {
            areas: frame.areas.len(),
            lines: frame.lines.len(),
            rects: frame.rects.len(),
            texts: frame.texts.len(),
            overlays: frame.overlay_rects.len() + frame.overlay_lines.len() + frame.overlay_texts.len(),
        };
        self.frames_rendered += 1;
        Ok(self.last_stats)
    }
}
