//! Conversion of ctx2d geometry into tiny-skia types

use std::f64::consts::FRAC_PI_2;

use ctx2d::{ArcSegment, LineCap, LineJoin, Path, PathSegment, Rect, SyncedState, TransformMatrix};
use tiny_skia::{PathBuilder, Stroke, StrokeDash, Transform};

/// Convert to tiny-skia Transform
pub fn to_skia_transform(m: &TransformMatrix) -> Transform {
    Transform::from_row(m.a as f32, m.b as f32, m.c as f32, m.d as f32, m.e as f32, m.f as f32)
}

pub(crate) fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.normalized();
    tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
}

/// Build a tiny-skia path from user-space segments.
///
/// Rectangles are independent closed loops that leave the current point
/// alone, so they are appended after every other contour.
pub fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let mut rects = Vec::new();

    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathSegment::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathSegment::QuadTo { ctrl, end } => {
                pb.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            }
            PathSegment::CubicTo { c1, c2, end } => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathSegment::ArcAppend(arc) => append_arc(&mut pb, &arc),
            PathSegment::RectAppend(rect) => rects.push(rect),
            PathSegment::Close => pb.close(),
        }
    }

    for rect in rects {
        if let Some(rect) = to_skia_rect(rect) {
            pb.push_rect(rect);
        }
    }

    pb.finish()
}

/// Approximate the arc with one cubic per quarter turn (or less)
fn append_arc(pb: &mut PathBuilder, arc: &ArcSegment) {
    let start = arc.start_point();
    pb.move_to(start.x as f32, start.y as f32);

    let sweep = arc.sweep();
    if sweep == 0.0 {
        return;
    }

    let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut angle = arc.start_angle;
    for _ in 0..pieces {
        let next = angle + step;
        let (s0, c0) = angle.sin_cos();
        let (s1, c1) = next.sin_cos();

        let p1 = arc.map_unit(c0 - k * s0, s0 + k * c0);
        let p2 = arc.map_unit(c1 + k * s1, s1 - k * c1);
        let p3 = arc.map_unit(c1, s1);
        pb.cubic_to(
            p1.x as f32,
            p1.y as f32,
            p2.x as f32,
            p2.y as f32,
            p3.x as f32,
            p3.y as f32,
        );
        angle = next;
    }
}

/// Stroke settings from the synchronized state
pub(crate) fn to_skia_stroke(state: &SyncedState) -> Stroke {
    let dash = if state.line_dash.is_empty() {
        None
    } else {
        let intervals = state.line_dash.iter().map(|v| *v as f32).collect();
        StrokeDash::new(intervals, state.line_dash_offset as f32)
    };

    Stroke {
        width: state.line_width as f32,
        miter_limit: state.miter_limit as f32,
        line_cap: match state.line_cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: match state.line_join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        },
        dash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctx2d::{DrawMode, GraphicsState};
    use std::f64::consts::PI;

    #[test]
    fn test_transform_conversion() {
        let t = to_skia_transform(&TransformMatrix::new(2.0, 0.0, 0.0, 3.0, 4.0, 5.0));
        assert_eq!((t.sx, t.sy, t.tx, t.ty), (2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn test_empty_path_has_no_skia_path() {
        assert!(to_skia_path(&Path::new()).is_none());
    }

    #[test]
    fn test_triangle_bounds() {
        let mut path = Path::new();
        path.move_to(10.0, 10.0);
        path.line_to(90.0, 10.0);
        path.line_to(50.0, 90.0);
        path.close_path();

        let bounds = to_skia_path(&path).unwrap().bounds();
        assert_eq!((bounds.left(), bounds.top(), bounds.right(), bounds.bottom()), (10.0, 10.0, 90.0, 90.0));
    }

    #[test]
    fn test_full_circle_bounds() {
        let mut path = Path::new();
        path.arc(50.0, 50.0, 20.0, 0.0, 2.0 * PI, false);

        let bounds = to_skia_path(&path).unwrap().bounds();
        assert!((bounds.left() - 30.0).abs() < 0.01);
        assert!((bounds.right() - 70.0).abs() < 0.01);
        assert!((bounds.top() - 30.0).abs() < 0.01);
        assert!((bounds.bottom() - 70.0).abs() < 0.01);
    }

    #[test]
    fn test_half_arc_direction() {
        let mut clockwise = Path::new();
        clockwise.arc(0.0, 0.0, 10.0, 0.0, PI, false);
        let bounds = to_skia_path(&clockwise).unwrap().bounds();
        assert!(bounds.bottom() > 9.9);
        assert!(bounds.top() > -0.01);

        let mut anticlockwise = Path::new();
        anticlockwise.arc(0.0, 0.0, 10.0, 0.0, PI, true);
        let bounds = to_skia_path(&anticlockwise).unwrap().bounds();
        assert!(bounds.top() < -9.9);
        assert!(bounds.bottom() < 0.01);
    }

    #[test]
    fn test_rects_are_appended() {
        let mut path = Path::new();
        path.rect(60.0, 60.0, -20.0, 10.0);

        let bounds = to_skia_path(&path).unwrap().bounds();
        assert_eq!((bounds.left(), bounds.right()), (40.0, 60.0));
    }

    #[test]
    fn test_stroke_conversion() {
        let mut state = GraphicsState::default();
        state.line_width = 3.0;
        state.line_cap = LineCap::Square;
        state.line_dash = vec![4.0, 2.0];
        let stroke = to_skia_stroke(&SyncedState::capture(&state, DrawMode::Stroke));

        assert_eq!(stroke.width, 3.0);
        assert_eq!(stroke.line_cap, tiny_skia::LineCap::Square);
        assert!(stroke.dash.is_some());
    }
}
