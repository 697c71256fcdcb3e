//! Kernel drawing.
//!
//! Fits a [`Layout`] onto a single PDF page and draws, in order: arcs with
//! arrowheads, vertex markers in their property-map color and size, and the
//! 0-based vertex index on top of each marker.

pub mod pdf;

use crate::error::{LayoutError, RenderError};
use crate::graph::{Kernel, Rgba};
use crate::layout::Layout;
use pdf::Canvas;
use petgraph::graph::NodeIndex;
use serde::Deserialize;
use std::path::Path;

/// Helvetica digit advance width, in ems.
const DIGIT_WIDTH_EM: f64 = 0.556;

/// Page and styling options. Every field may be overridden from `.kvisrc.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Blank border kept around the drawing, in points.
    pub margin: f64,
    /// Draw vertex indices.
    pub labels: bool,
    pub label_font_size: f64,
    pub label_color: Rgba,
    pub edge_color: Rgba,
    pub edge_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            margin: 20.0,
            labels: true,
            label_font_size: 2.0,
            label_color: [0.0, 0.0, 0.0, 1.0],
            edge_color: [0.179, 0.203, 0.210, 0.8],
            edge_width: 0.3,
        }
    }
}

/// Maps layout coordinates onto the page, preserving aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    scale: f64,
    dx: f64,
    dy: f64,
}

impl Transform {
    fn fit(layout: &Layout, options: &RenderOptions) -> Self {
        let avail_w = options.width - 2.0 * options.margin;
        let avail_h = options.height - 2.0 * options.margin;
        let center = (options.width / 2.0, options.height / 2.0);

        let Some((min_x, min_y, max_x, max_y)) = layout.bounds() else {
            return Transform {
                scale: 1.0,
                dx: center.0,
                dy: center.1,
            };
        };

        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (avail_w / span_x).min(avail_h / span_y),
            (true, false) => avail_w / span_x,
            (false, true) => avail_h / span_y,
            (false, false) => 1.0,
        };

        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;
        Transform {
            scale,
            dx: center.0 - mid_x * scale,
            dy: center.1 - mid_y * scale,
        }
    }

    fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x * self.scale + self.dx, y * self.scale + self.dy)
    }
}

fn validate(options: &RenderOptions) -> Result<(), RenderError> {
    let numbers = [
        ("width", options.width),
        ("height", options.height),
        ("margin", options.margin),
        ("label_font_size", options.label_font_size),
        ("edge_width", options.edge_width),
    ];
    if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
        return Err(RenderError::InvalidPage {
            message: format!("{} must be a finite number, got {}", name, value),
        });
    }
    if !(options.width > 0.0 && options.height > 0.0) {
        return Err(RenderError::InvalidPage {
            message: format!(
                "page size must be positive, got {}x{}",
                options.width, options.height
            ),
        });
    }
    if options.margin < 0.0
        || 2.0 * options.margin >= options.width
        || 2.0 * options.margin >= options.height
    {
        return Err(RenderError::InvalidPage {
            message: format!(
                "margin {} leaves no room on a {}x{} page",
                options.margin, options.width, options.height
            ),
        });
    }
    Ok(())
}

/// Draw an arc from `from` to `to`, stopping at the target marker's rim.
fn draw_arc(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64), target_radius: f64, width: f64) {
    let (vx, vy) = (to.0 - from.0, to.1 - from.1);
    let len = (vx * vx + vy * vy).sqrt();
    if len <= target_radius {
        return;
    }
    let (ux, uy) = (vx / len, vy / len);
    let tip = (to.0 - ux * target_radius, to.1 - uy * target_radius);

    let head_len = (width * 6.0).max(1.0).min(len / 3.0);
    let head_half = head_len * 0.4;
    let base = (tip.0 - ux * head_len, tip.1 - uy * head_len);

    canvas.line(from, base);
    canvas.polygon(
        &[
            tip,
            (base.0 - uy * head_half, base.1 + ux * head_half),
            (base.0 + uy * head_half, base.1 - ux * head_half),
        ],
        false,
    );
}

/// Render `kernel` at the positions in `layout` to PDF bytes.
pub fn render_pdf(
    kernel: &Kernel,
    layout: &Layout,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    validate(options)?;
    if layout.len() != kernel.vertex_count() {
        return Err(LayoutError::SizeMismatch {
            positions: layout.len(),
            vertices: kernel.vertex_count(),
        }
        .into());
    }

    let transform = Transform::fit(layout, options);
    let points: Vec<(f64, f64)> = layout
        .positions
        .iter()
        .map(|&p| transform.apply(p))
        .collect();
    let radius = |v: usize| kernel.sizes[NodeIndex::new(v)] as f64 / 2.0;

    let mut canvas = Canvas::new();

    // Arcs first so markers sit on top.
    canvas.save();
    canvas.set_fill(options.edge_color);
    canvas.set_stroke(options.edge_color, options.edge_width);
    for (source, target) in kernel.edges() {
        if source == target {
            let r = radius(source);
            let (x, y) = points[source];
            canvas.ring((x, y + r * 1.5), r);
        } else {
            draw_arc(
                &mut canvas,
                points[source],
                points[target],
                radius(target),
                options.edge_width,
            );
        }
    }
    canvas.restore();

    for (v, &center) in points.iter().enumerate() {
        let node = NodeIndex::new(v);
        canvas.set_fill(kernel.colors[node]);
        canvas.set_stroke(options.edge_color, radius(v) * 0.1);
        canvas.circle(center, radius(v), true);
    }

    if options.labels {
        canvas.set_fill(options.label_color);
        let size = options.label_font_size;
        for (v, &(x, y)) in points.iter().enumerate() {
            let label = v.to_string();
            let text_width = label.len() as f64 * DIGIT_WIDTH_EM * size;
            canvas.text((x - text_width / 2.0, y - size * 0.35), size, &label);
        }
    }

    Ok(canvas.finish(options.width, options.height))
}

/// Write rendered bytes to `path`.
pub fn write_pdf(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    std::fs::write(path, bytes).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}
