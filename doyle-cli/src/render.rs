//! SVG rendering for spirals and arc-group cells.

use std::fmt::Write;

use doyle_core::geometry::fill;
use doyle_core::geometry::r2::R2;
use doyle_core::{ArcGroup, Circle, GroupKey, Result, Spiral};

/// SVG rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Square canvas size in pixels.
    pub size: f64,
    /// Stroke width for outlines.
    pub stroke_width: f64,
    /// Fill opacity for debug cell fills.
    pub fill_opacity: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 800.,
            stroke_width: 1.,
            fill_opacity: 0.25,
        }
    }
}

/// Options for the arc-group (cell) rendering mode.
#[derive(Debug, Clone, Default)]
pub struct GroupRenderOptions {
    pub add_fill_pattern: bool,
    pub fill_spacing: f64,
    /// Per-ring hatch rotation increment, degrees.
    pub fill_angle: f64,
    /// Inward inset applied before clipping fill lines.
    pub fill_offset: f64,
    pub draw_group_outline: bool,
    /// Fill each cell with a deterministic per-cell color.
    pub debug_groups: bool,
    /// Draw closure arcs in red.
    pub red_outline: bool,
}

/// Scale factor fitting all circles (center + radius extent) into the
/// canvas, with a small margin.
fn normalization_scale(circles: &[Circle], size: f64) -> f64 {
    let max_extent = circles
        .iter()
        .map(|c| (c.c.re.abs() + c.r).max(c.c.im.abs() + c.r))
        .fold(0., f64::max);
    if max_extent > 0. {
        (size / 2.1) / max_extent
    } else {
        1.
    }
}

fn svg_open(out: &mut String, size: f64) {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        size,
        size,
        -size / 2.,
        -size / 2.,
        size,
        size
    )
    .unwrap();
}

fn polyline(out: &mut String, points: &[R2], stroke: &str, stroke_width: f64) {
    let coords: Vec<String> = points.iter().map(|p| format!("{:.3},{:.3}", p.x, p.y)).collect();
    writeln!(
        out,
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        coords.join(" "),
        stroke,
        stroke_width
    )
    .unwrap();
}

fn polygon_fill(out: &mut String, points: &[R2], fill: &str, opacity: f64) {
    let coords: Vec<String> = points.iter().map(|p| format!("{:.3},{:.3}", p.x, p.y)).collect();
    writeln!(
        out,
        r##"<polygon points="{}" fill="{}" fill-opacity="{}" stroke="#000000" stroke-width="0.5"/>"##,
        coords.join(" "),
        fill,
        opacity
    )
    .unwrap();
}

/// Deterministic per-cell debug color (Knuth multiplicative hash).
pub fn debug_color(idx: usize) -> String {
    let h = (idx as u32).wrapping_mul(2654435761) >> 8;
    format!("#{:06x}", h & 0xFF_FFFF)
}

/// Render the `doyle` mode: every visible circle as-is.
pub fn render_circles(spiral: &Spiral, config: &RenderConfig) -> String {
    let factor = normalization_scale(spiral.visible_circles(), config.size);
    let mut out = String::new();
    svg_open(&mut out, config.size);
    for c in spiral.visible_circles() {
        writeln!(
            &mut out,
            r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" stroke="#000000" stroke-width="{}"/>"##,
            c.c.re * factor,
            c.c.im * factor,
            c.r * factor,
            config.stroke_width
        )
        .unwrap();
    }
    out.push_str("</svg>\n");
    out
}

fn scaled_outline(group: &ArcGroup, circles: &[Circle], factor: f64) -> Vec<R2> {
    group
        .closed_outline(circles)
        .into_iter()
        .map(|p| p * factor)
        .collect()
}

/// Render the `arram_boyle` mode: cell outlines, optional clipped line
/// fill rotated per ring, optional debug fills, closure arcs.
pub fn render_groups(
    spiral: &Spiral,
    config: &RenderConfig,
    opts: &GroupRenderOptions,
) -> Result<String> {
    let factor = normalization_scale(&spiral.circles, config.size);
    let max_ring = spiral.groups.values().map(|g| g.ring_index).max().unwrap_or(0);
    let mut out = String::new();
    svg_open(&mut out, config.size);

    for (key, group) in &spiral.groups {
        let outline = scaled_outline(group, &spiral.circles, factor);
        if outline.len() < 3 {
            continue;
        }
        match key {
            GroupKey::Cell(idx) => {
                if opts.debug_groups {
                    polygon_fill(&mut out, &outline, &debug_color(*idx), config.fill_opacity);
                }
                if opts.add_fill_pattern {
                    let angle = group.ring_index as f64 * opts.fill_angle;
                    let segments =
                        fill::clip_lines(&outline, opts.fill_spacing, angle, opts.fill_offset)?;
                    if opts.draw_group_outline {
                        polyline(&mut out, &outline, "#000000", config.stroke_width);
                    }
                    for (a, b) in segments {
                        writeln!(
                            &mut out,
                            r##"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="#000000" stroke-width="0.5"/>"##,
                            a.x, a.y, b.x, b.y
                        )
                        .unwrap();
                    }
                } else if opts.draw_group_outline {
                    polyline(&mut out, &outline, "#000000", config.stroke_width);
                }
                // Outermost ring: re-stroke arcs 2 and 3 in red.
                if opts.red_outline && group.ring_index == max_ring {
                    for arc in group.arcs.iter().skip(2).take(2) {
                        let points: Vec<R2> = arc
                            .sample(&spiral.circles)
                            .into_iter()
                            .map(|p| p * factor)
                            .collect();
                        polyline(&mut out, &points, "#ff0000", 1.2);
                    }
                }
            }
            GroupKey::Closure(_) => {
                // Closure arcs are drawn individually, never filled.
                if opts.red_outline || (!opts.add_fill_pattern && opts.draw_group_outline) {
                    let color = if opts.red_outline { "#ff0000" } else { "#000000" };
                    for arc in &group.arcs {
                        let points: Vec<R2> = arc
                            .sample(&spiral.circles)
                            .into_iter()
                            .map(|p| p * factor)
                            .collect();
                        polyline(&mut out, &points, color, 1.2);
                    }
                }
            }
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}
