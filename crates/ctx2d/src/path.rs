//! Path construction
//!
//! Accumulates the segments of the current canvas path. Coordinates stay in
//! user space; the CTM is applied once, when the path is filled or stroked.

use std::f64::consts::{PI, TAU};

/// Point in user space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Same rectangle with non-negative width and height
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0.0 { (self.x + self.width, -self.width) } else { (self.x, self.width) };
        let (y, height) = if self.height < 0.0 { (self.y + self.height, -self.height) } else { (self.y, self.height) };
        Self { x, y, width, height }
    }

    /// Corners in drawing order, starting at `(x, y)`
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }
}

/// Elliptical arc appended as its own subpath
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse axes, radians
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl ArcSegment {
    /// Bounding box of the full (unrotated) ellipse
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.rx,
            self.center.y - self.ry,
            2.0 * self.rx,
            2.0 * self.ry,
        )
    }

    /// Signed angular extent, derived from both angles and the direction.
    ///
    /// Positive sweeps run clockwise on a y-down surface. A difference of a
    /// full turn or more in the drawing direction yields a full circle.
    pub fn sweep(&self) -> f64 {
        if self.anticlockwise {
            let delta = self.start_angle - self.end_angle;
            if delta >= TAU { -TAU } else { -delta.rem_euclid(TAU) }
        } else {
            let delta = self.end_angle - self.start_angle;
            if delta >= TAU { TAU } else { delta.rem_euclid(TAU) }
        }
    }

    /// Point on the ellipse at `angle`
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        self.map_unit(cos, sin)
    }

    /// Map a point of the unit circle onto this ellipse
    pub fn map_unit(&self, ux: f64, uy: f64) -> Point {
        let (rot_sin, rot_cos) = self.rotation.sin_cos();
        let x = self.rx * ux;
        let y = self.ry * uy;
        Point::new(
            self.center.x + x * rot_cos - y * rot_sin,
            self.center.y + x * rot_sin + y * rot_cos,
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep())
    }
}

/// Path segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, end: Point },
    CubicTo { c1: Point, c2: Point, end: Point },
    ArcAppend(ArcSegment),
    RectAppend(Rect),
    Close,
}

/// Flattened subpath
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    fn starting_at(point: Point) -> Self {
        Self { points: vec![point], closed: false }
    }

    fn end(&self) -> Point {
        self.points.last().copied().unwrap_or_default()
    }
}

const CURVE_STEPS: usize = 16;
const ARC_STEP: f64 = PI / 32.0;

/// Canvas path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl Path {
    /// Create new empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all segments and the current point
    pub fn begin(&mut self) {
        self.segments.clear();
        self.current = None;
        self.subpath_start = None;
    }

    /// Start a new subpath
    pub fn move_to(&mut self, x: f64, y: f64) {
        if !all_finite(&[x, y]) {
            return;
        }
        let point = Point::new(x, y);
        self.segments.push(PathSegment::MoveTo(point));
        self.current = Some(point);
        self.subpath_start = Some(point);
    }

    /// Line to point
    pub fn line_to(&mut self, x: f64, y: f64) {
        if !all_finite(&[x, y]) || !self.has_current_point("lineTo") {
            return;
        }
        let point = Point::new(x, y);
        self.segments.push(PathSegment::LineTo(point));
        self.current = Some(point);
    }

    /// Quadratic curve
    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        if !all_finite(&[cpx, cpy, x, y]) || !self.has_current_point("quadraticCurveTo") {
            return;
        }
        let end = Point::new(x, y);
        self.segments.push(PathSegment::QuadTo { ctrl: Point::new(cpx, cpy), end });
        self.current = Some(end);
    }

    /// Bezier curve
    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        if !all_finite(&[cp1x, cp1y, cp2x, cp2y, x, y]) || !self.has_current_point("bezierCurveTo") {
            return;
        }
        let end = Point::new(x, y);
        self.segments.push(PathSegment::CubicTo {
            c1: Point::new(cp1x, cp1y),
            c2: Point::new(cp2x, cp2y),
            end,
        });
        self.current = Some(end);
    }

    /// Append a closed rectangle; the current point is left untouched
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !all_finite(&[x, y, width, height]) {
            return;
        }
        self.segments.push(PathSegment::RectAppend(Rect::new(x, y, width, height)));
    }

    /// Circular arc
    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        self.ellipse(x, y, radius, radius, 0.0, start_angle, end_angle, anticlockwise);
    }

    /// Elliptical arc
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        if !all_finite(&[x, y, rx, ry, rotation, start_angle, end_angle]) {
            return;
        }
        if rx < 0.0 || ry < 0.0 {
            tracing::debug!("ignoring arc with negative radius ({}, {})", rx, ry);
            return;
        }
        let arc = ArcSegment {
            center: Point::new(x, y),
            rx,
            ry,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        };
        self.segments.push(PathSegment::ArcAppend(arc));
        self.subpath_start = Some(arc.start_point());
        self.current = Some(arc.end_point());
    }

    /// Close the current subpath
    pub fn close_path(&mut self) {
        let Some(start) = self.subpath_start else {
            tracing::trace!("closePath without a subpath ignored");
            return;
        };
        self.segments.push(PathSegment::Close);
        self.current = Some(start);
    }

    /// Get segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether anything besides bare `MoveTo`s has been appended
    pub fn is_drawable(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| !matches!(segment, PathSegment::MoveTo(_)))
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Flatten curves and arcs into polylines, one per subpath.
    /// Rectangles come out as their own closed polylines.
    pub fn flatten(&self) -> Vec<Polyline> {
        let mut out = Vec::new();
        let mut open: Option<Polyline> = None;

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(point) => {
                    flush(&mut out, open.take());
                    open = Some(Polyline::starting_at(point));
                }
                PathSegment::LineTo(point) => {
                    if let Some(line) = open.as_mut() {
                        line.points.push(point);
                    }
                }
                PathSegment::QuadTo { ctrl, end } => {
                    if let Some(line) = open.as_mut() {
                        let from = line.end();
                        for step in 1..=CURVE_STEPS {
                            let t = step as f64 / CURVE_STEPS as f64;
                            line.points.push(quad_point(from, ctrl, end, t));
                        }
                    }
                }
                PathSegment::CubicTo { c1, c2, end } => {
                    if let Some(line) = open.as_mut() {
                        let from = line.end();
                        for step in 1..=CURVE_STEPS {
                            let t = step as f64 / CURVE_STEPS as f64;
                            line.points.push(cubic_point(from, c1, c2, end, t));
                        }
                    }
                }
                PathSegment::ArcAppend(arc) => {
                    flush(&mut out, open.take());
                    let sweep = arc.sweep();
                    let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(1);
                    let mut line = Polyline::starting_at(arc.start_point());
                    for step in 1..=steps {
                        let angle = arc.start_angle + sweep * step as f64 / steps as f64;
                        line.points.push(arc.point_at(angle));
                    }
                    open = Some(line);
                }
                PathSegment::RectAppend(rect) => {
                    out.push(Polyline {
                        points: rect.corners().to_vec(),
                        closed: true,
                    });
                }
                PathSegment::Close => {
                    if let Some(mut line) = open.take() {
                        let start = line.points[0];
                        line.closed = true;
                        out.push(line);
                        open = Some(Polyline::starting_at(start));
                    }
                }
            }
        }

        flush(&mut out, open.take());
        out
    }

    /// Non-zero winding test against the flattened path, every subpath
    /// implicitly closed as for a fill.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        let mut winding = 0i32;

        for line in self.flatten() {
            let points = &line.points;
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if a.y <= point.y {
                    if b.y > point.y && cross(a, b, point) > 0.0 {
                        winding += 1;
                    }
                } else if b.y <= point.y && cross(a, b, point) < 0.0 {
                    winding -= 1;
                }
            }
        }

        winding != 0
    }

    fn has_current_point(&self, op: &str) -> bool {
        if self.current.is_none() {
            tracing::trace!("{} before moveTo ignored", op);
            return false;
        }
        true
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn flush(out: &mut Vec<Polyline>, line: Option<Polyline>) {
    if let Some(line) = line {
        if line.points.len() > 1 {
            out.push(line);
        }
    }
}

fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

fn cross(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}
