//! ctx2d demo - renders a sample scene to PNG

use std::f64::consts::PI;

use anyhow::Context as _;
use ctx2d::CanvasRenderingContext2D;
use ctx2d_skia::{SkiaSurface, SurfaceConfig};
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "ctx2d-demo.png".to_string());

    let surface = SkiaSurface::new(SurfaceConfig {
        background: ctx2d::Color::WHITE,
        ..SurfaceConfig::default()
    });
    let mut ctx = CanvasRenderingContext2D::new(surface, WIDTH, HEIGHT)?;
    draw_scene(&mut ctx)?;

    let stats = ctx.sync_stats();
    tracing::info!(
        "State pushes: {} (skipped {}, text {})",
        stats.pushes,
        stats.skipped,
        stats.text_pushes
    );

    ctx.backend()
        .save_png(&output)
        .with_context(|| format!("writing {output}"))?;
    tracing::info!("Wrote {}", output);
    Ok(())
}

fn draw_scene(ctx: &mut CanvasRenderingContext2D<SkiaSurface>) -> anyhow::Result<()> {
    // Triangle
    ctx.set_fill_style("red")?;
    ctx.begin_path();
    ctx.move_to(20.0, 20.0);
    ctx.line_to(140.0, 20.0);
    ctx.line_to(80.0, 120.0);
    ctx.close_path();
    ctx.fill();

    // Rotated square
    ctx.save();
    ctx.translate(230.0, 70.0);
    ctx.rotate(PI / 6.0);
    ctx.set_fill_style("rgba(0, 128, 255, 0.7)")?;
    ctx.fill_rect(-40.0, -40.0, 80.0, 80.0);
    ctx.set_stroke_style("#003366")?;
    ctx.set_line_width(3.0);
    ctx.stroke_rect(-40.0, -40.0, 80.0, 80.0);
    ctx.restore();

    // Dashed circle
    ctx.set_stroke_style("darkgreen")?;
    ctx.set_line_width(4.0);
    ctx.set_line_dash(&[10.0, 6.0]);
    ctx.set_line_cap_keyword("round");
    ctx.begin_path();
    ctx.arc(80.0, 180.0, 40.0, 0.0, 2.0 * PI, false);
    ctx.stroke();
    ctx.set_line_dash(&[]);

    // Text
    ctx.set_fill_style("black")?;
    ctx.set_font("bold 18px sans-serif");
    let label = "ctx2d";
    let width = ctx.measure_text(label).width;
    ctx.fill_text(label, 230.0 - width / 2.0, 200.0);

    // Punch a hole
    ctx.clear_rect(60.0, 50.0, 40.0, 20.0);
    Ok(())
}
