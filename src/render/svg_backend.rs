use std::fmt::Write as _;

use crate::core::PathSegment;
use crate::error::{StreamGraphError, StreamGraphResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

const FONT_FAMILY: &str = "system-ui, sans-serif";

/// Renders frames into standalone SVG documents.
///
/// The root element carries the resolved background and text colors as
/// inline style, mirroring how the chart is themed inside a host panel.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    last_document: Option<String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    #[must_use]
    pub fn last_document(&self) -> Option<&str> {
        self.last_document.as_deref()
    }
}

impl Renderer for SvgRenderer {
    type Element = String;

    fn render(&mut self, frame: &RenderFrame) -> StreamGraphResult<String> {
        frame.validate()?;
        let document = write_document(frame).map_err(|err| {
            StreamGraphError::Render(format!("failed to write svg document: {err}"))
        })?;
        self.last_document = Some(document.clone());
        Ok(document)
    }
}

fn write_document(frame: &RenderFrame) -> Result<String, std::fmt::Error> {
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    let mut out = String::with_capacity(4096);

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}" style="background-color:{};color:{};overflow:visible">"#,
        frame.background.to_hex(),
        frame.foreground.to_hex(),
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
        frame.background.to_hex()
    )?;

    write_rects(&mut out, &frame.rects)?;

    for area in &frame.areas {
        write!(
            out,
            r#"<path d="{}"{}"#,
            path_data(&area.path),
            paint_attr("fill", area.fill)
        )?;
        match &area.title {
            Some(title) => writeln!(out, "><title>{}</title></path>", escape_xml(title))?,
            None => writeln!(out, "/>")?,
        }
    }

    write_lines(&mut out, &frame.lines)?;
    write_texts(&mut out, &frame.texts)?;

    write_rects(&mut out, &frame.overlay_rects)?;
    write_lines(&mut out, &frame.overlay_lines)?;
    write_texts(&mut out, &frame.overlay_texts)?;

    out.push_str("</svg>\n");
    Ok(out)
}

fn write_rects(out: &mut String, rects: &[RectPrimitive]) -> std::fmt::Result {
    for rect in rects {
        write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            paint_attr("fill", rect.fill),
        )?;
        if let Some(stroke) = rect.stroke {
            write!(out, r#"{} stroke-width="1""#, paint_attr("stroke", stroke))?;
        }
        writeln!(out, "/>")?;
    }
    Ok(())
}

fn write_lines(out: &mut String, lines: &[LinePrimitive]) -> std::fmt::Result {
    for line in lines {
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}"/>"#,
            num(line.x1),
            num(line.y1),
            num(line.x2),
            num(line.y2),
            paint_attr("stroke", line.color),
            num(line.stroke_width),
        )?;
    }
    Ok(())
}

fn write_texts(out: &mut String, texts: &[TextPrimitive]) -> std::fmt::Result {
    for text in texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{}{}>{}</text>"#,
            num(text.x),
            num(text.y),
            num(text.font_size_px),
            paint_attr("fill", text.color),
            if text.bold { r#" font-weight="bold""# } else { "" },
            escape_xml(&text.text),
        )?;
    }
    Ok(())
}

fn paint_attr(name: &str, color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            r#" {name}="{}" {name}-opacity="{}""#,
            color.to_hex(),
            num(color.alpha)
        )
    } else {
        format!(r#" {name}="{}""#, color.to_hex())
    }
}

fn path_data(path: &[PathSegment]) -> String {
    let mut data = String::with_capacity(path.len() * 24);
    for segment in path {
        // Writing into a String cannot fail.
        let _ = match *segment {
            PathSegment::MoveTo { x, y } => write!(data, "M{},{}", num(x), num(y)),
            PathSegment::LineTo { x, y } => write!(data, "L{},{}", num(x), num(y)),
            PathSegment::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => write!(
                data,
                "C{},{},{},{},{},{}",
                num(x1),
                num(y1),
                num(x2),
                num(y2),
                num(x),
                num(y)
            ),
            PathSegment::Close => write!(data, "Z"),
        };
    }
    data
}

fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Escapes text for XML/HTML content and attribute values.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.345), "12.35");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(0.5), "0.5");
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
