use serde::{Deserialize, Serialize};

/// One command of a pixel-space path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathSegment {
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => x.is_finite() && y.is_finite(),
            Self::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => [x1, y1, x2, y2, x, y].iter().all(|value| value.is_finite()),
            Self::Close => true,
        }
    }
}

/// Uniform cubic B-spline through control points.
///
/// The curve starts at the first point and ends at the last one, like the
/// "basis" interpolation of d3-shape. With fewer than three points it
/// degrades to straight segments.
struct BasisCurve<'a> {
    out: &'a mut Vec<PathSegment>,
    connect: bool,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    seen: usize,
}

impl<'a> BasisCurve<'a> {
    fn new(out: &'a mut Vec<PathSegment>, connect: bool) -> Self {
        Self {
            out,
            connect,
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            seen: 0,
        }
    }

    fn bezier_to(&mut self, x: f64, y: f64) {
        self.out.push(PathSegment::CubicTo {
            x1: (2.0 * self.x0 + self.x1) / 3.0,
            y1: (2.0 * self.y0 + self.y1) / 3.0,
            x2: (self.x0 + 2.0 * self.x1) / 3.0,
            y2: (self.y0 + 2.0 * self.y1) / 3.0,
            x: (self.x0 + 4.0 * self.x1 + x) / 6.0,
            y: (self.y0 + 4.0 * self.y1 + y) / 6.0,
        });
    }

    fn point(&mut self, x: f64, y: f64) {
        match self.seen {
            0 => {
                self.seen = 1;
                if self.connect {
                    self.out.push(PathSegment::LineTo { x, y });
                } else {
                    self.out.push(PathSegment::MoveTo { x, y });
                }
            }
            1 => self.seen = 2,
            2 => {
                self.seen = 3;
                self.out.push(PathSegment::LineTo {
                    x: (5.0 * self.x0 + self.x1) / 6.0,
                    y: (5.0 * self.y0 + self.y1) / 6.0,
                });
                self.bezier_to(x, y);
            }
            _ => self.bezier_to(x, y),
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
    }

    fn finish(mut self) {
        match self.seen {
            3 => {
                let (x, y) = (self.x1, self.y1);
                self.bezier_to(x, y);
                self.out.push(PathSegment::LineTo { x, y });
            }
            2 => self.out.push(PathSegment::LineTo {
                x: self.x1,
                y: self.y1,
            }),
            _ => {}
        }
    }
}

/// Closed area between a top and a bottom line sharing the same x values.
///
/// `top` and `bottom` are both given left to right; the bottom edge is
/// traversed backwards so the outline closes on itself.
#[must_use]
pub fn basis_area_path(top: &[(f64, f64)], bottom: &[(f64, f64)]) -> Vec<PathSegment> {
    if top.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(top.len() + bottom.len() + 6);
    let mut upper = BasisCurve::new(&mut out, false);
    for &(x, y) in top {
        upper.point(x, y);
    }
    upper.finish();

    let mut lower = BasisCurve::new(&mut out, true);
    for &(x, y) in bottom.iter().rev() {
        lower.point(x, y);
    }
    lower.finish();

    out.push(PathSegment::Close);
    out
}
