//! Pixel tests for the Skia surface
//!
//! Drives the canvas context against a real pixmap and checks the output.

use std::f64::consts::PI;

use ctx2d::{BackendCall, BackendError, CanvasError, CanvasRenderingContext2D, Color, RecordingBackend};
use ctx2d_skia::{SkiaSurface, SurfaceConfig};

fn canvas(width: u32, height: u32) -> CanvasRenderingContext2D<SkiaSurface> {
    CanvasRenderingContext2D::new(SkiaSurface::default(), width, height).unwrap()
}

fn pixel(ctx: &CanvasRenderingContext2D<SkiaSurface>, x: u32, y: u32) -> Color {
    ctx.backend().pixel(x, y).unwrap()
}

// ============================================================================
// FILLING
// ============================================================================

#[test]
fn test_red_triangle() {
    let mut ctx = canvas(100, 100);
    ctx.set_fill_style("red").unwrap();
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(90.0, 10.0);
    ctx.line_to(50.0, 90.0);
    ctx.close_path();
    ctx.fill();

    assert_eq!(pixel(&ctx, 50, 30), Color::RED);
    assert_eq!(pixel(&ctx, 5, 95).a, 0);
    assert_eq!(pixel(&ctx, 15, 80).a, 0);
}

#[test]
fn test_fill_rect_with_transform() {
    let mut ctx = canvas(50, 50);
    ctx.set_fill_style("#0000ff").unwrap();
    ctx.scale(2.0, 2.0);
    ctx.translate(10.0, 0.0);
    ctx.fill_rect(0.0, 0.0, 5.0, 5.0);

    // Rect lands on x in [20, 30), y in [0, 10)
    assert_eq!(pixel(&ctx, 25, 5), Color::rgb(0, 0, 255));
    assert_eq!(pixel(&ctx, 5, 5).a, 0);
    assert_eq!(pixel(&ctx, 25, 15).a, 0);
}

#[test]
fn test_circle_fill() {
    let mut ctx = canvas(60, 60);
    ctx.set_fill_style("black").unwrap();
    ctx.begin_path();
    ctx.arc(30.0, 30.0, 20.0, 0.0, 2.0 * PI, false);
    ctx.fill();

    assert_eq!(pixel(&ctx, 30, 30), Color::BLACK);
    assert_eq!(pixel(&ctx, 30, 15), Color::BLACK);
    assert_eq!(pixel(&ctx, 3, 3).a, 0);
    assert_eq!(pixel(&ctx, 30, 55).a, 0);
}

#[test]
fn test_global_alpha_blends() {
    let mut ctx = canvas(10, 10);
    ctx.set_fill_style("white").unwrap();
    ctx.set_global_alpha(0.5);
    ctx.fill_rect(0.0, 0.0, 10.0, 10.0);

    let a = pixel(&ctx, 5, 5).a;
    assert!((127..=128).contains(&a));
}

#[test]
fn test_fill_style_alpha() {
    let mut ctx = canvas(10, 10);
    ctx.set_fill_style("rgba(0, 0, 0, 0.25)").unwrap();
    ctx.fill_rect(0.0, 0.0, 10.0, 10.0);

    let a = pixel(&ctx, 5, 5).a;
    assert!((63..=64).contains(&a));
}

// ============================================================================
// STROKING
// ============================================================================

#[test]
fn test_stroke_uses_stroke_color() {
    let mut ctx = canvas(40, 40);
    ctx.set_fill_style("red").unwrap();
    ctx.set_stroke_style("#00ff00").unwrap();
    ctx.set_line_width(4.0);
    ctx.begin_path();
    ctx.move_to(0.0, 20.0);
    ctx.line_to(40.0, 20.0);
    ctx.stroke();

    assert_eq!(pixel(&ctx, 20, 20), Color::rgb(0, 255, 0));
    assert_eq!(pixel(&ctx, 20, 10).a, 0);
}

#[test]
fn test_stroke_rect_leaves_interior() {
    let mut ctx = canvas(40, 40);
    ctx.set_stroke_style("black").unwrap();
    ctx.set_line_width(2.0);
    ctx.stroke_rect(10.0, 10.0, 20.0, 20.0);

    assert_eq!(pixel(&ctx, 10, 20), Color::BLACK);
    assert_eq!(pixel(&ctx, 20, 20).a, 0);
}

// ============================================================================
// CLEARING AND STATE
// ============================================================================

#[test]
fn test_clear_rect() {
    let mut ctx = canvas(20, 20);
    ctx.set_fill_style("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0);
    ctx.clear_rect(5.0, 5.0, 10.0, 10.0);

    assert_eq!(pixel(&ctx, 10, 10).a, 0);
    assert_eq!(pixel(&ctx, 2, 2), Color::RED);
}

#[test]
fn test_restore_reverts_color() {
    let mut ctx = canvas(20, 20);
    ctx.set_fill_style("red").unwrap();
    ctx.save();
    ctx.set_fill_style("blue").unwrap();
    ctx.fill_rect(0.0, 0.0, 10.0, 20.0);
    ctx.restore();
    ctx.fill_rect(10.0, 0.0, 10.0, 20.0);

    assert_eq!(pixel(&ctx, 5, 5), Color::rgb(0, 0, 255));
    assert_eq!(pixel(&ctx, 15, 5), Color::RED);
}

#[test]
fn test_resize_clears_surface() {
    let mut ctx = canvas(20, 20);
    ctx.set_fill_style("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0);
    ctx.resize(30, 10).unwrap();

    assert_eq!(ctx.backend().width(), 30);
    assert_eq!(ctx.backend().height(), 10);
    assert_eq!(pixel(&ctx, 5, 5).a, 0);

    // Fill style reset to black
    ctx.fill_rect(0.0, 0.0, 30.0, 10.0);
    assert_eq!(pixel(&ctx, 5, 5), Color::BLACK);
}

#[test]
fn test_failed_resize_keeps_drawing_state() {
    let mut ctx = canvas(20, 20);
    ctx.set_fill_style("red").unwrap();
    ctx.fill_rect(0.0, 0.0, 5.0, 5.0);

    let err = ctx.resize(u32::MAX, 1).unwrap_err();
    assert_eq!(
        err,
        CanvasError::Backend(BackendError::SurfaceAllocation { width: u32::MAX, height: 1 })
    );
    assert_eq!(ctx.width(), 20);
    assert_eq!(ctx.fill_style(), "#ff0000");

    ctx.fill_rect(5.0, 5.0, 5.0, 5.0);
    assert_eq!(pixel(&ctx, 7, 7), Color::RED);
    assert_eq!(pixel(&ctx, 2, 2), Color::RED);
}

#[test]
fn test_background_config() {
    let surface = SkiaSurface::new(SurfaceConfig {
        background: Color::WHITE,
        ..SurfaceConfig::default()
    });
    let ctx = CanvasRenderingContext2D::new(surface, 8, 8).unwrap();
    assert_eq!(pixel(&ctx, 4, 4), Color::WHITE);
}

// ============================================================================
// TEXT
// ============================================================================

#[test]
fn test_measure_text_follows_font() {
    let mut ctx = canvas(10, 10);
    let small = ctx.measure_text("hello").width;
    ctx.set_font("28px serif");
    let large = ctx.measure_text("hello").width;

    assert!((small - 5.0 * 14.0 * 0.55).abs() < 1e-9);
    assert!((large - 2.0 * small).abs() < 1e-9);
}

#[test]
fn test_fill_text_marks_pixels() {
    let mut ctx = canvas(100, 40);
    ctx.set_font("20px sans-serif");
    ctx.fill_text("MM", 10.0, 30.0);

    // First glyph box spans roughly x in [10, 18.8), y in [16, 30)
    assert_eq!(pixel(&ctx, 14, 24), Color::BLACK);
    assert_eq!(pixel(&ctx, 14, 35).a, 0);
}

// ============================================================================
// REPLAY
// ============================================================================

#[test]
fn test_replay_recording_onto_surface() {
    let mut recorded = CanvasRenderingContext2D::new(RecordingBackend::new(), 20, 20).unwrap();
    recorded.set_fill_style("lime").unwrap();
    recorded.fill_rect(0.0, 0.0, 20.0, 20.0);

    let recording = recorded.into_backend();
    assert!(matches!(recording.calls()[0], BackendCall::AllocateSurface { width: 20, height: 20 }));

    let mut surface = SkiaSurface::default();
    recording.replay(&mut surface).unwrap();
    assert_eq!(surface.pixel(10, 10), Some(Color::rgb(0, 255, 0)));
}
