//! Minimal single-page PDF 1.4 writer.
//!
//! Supports what the renderer draws: straight paths, Bézier circles, filled
//! polygons, Helvetica text, and constant fill/stroke alpha through ExtGState
//! resources. Coordinates are PDF points with the origin at the bottom left.
//!
//! Object layout:
//!
//! ```text
//! 1 Catalog   2 Pages   3 Page   4 Font (Helvetica)
//! 5.. ExtGState per distinct alpha   last: content stream
//! ```

use std::fmt::Write;

/// Control point factor for approximating a quarter circle with a cubic.
const KAPPA: f64 = 0.552_284_749_8;

/// Format a number the compact way PDF content streams usually carry them.
pub fn fmt_num(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Escape a string for use inside a PDF literal `( ... )`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Drawing surface that accumulates content-stream operators.
#[derive(Debug, Default)]
pub struct Canvas {
    ops: String,
    alphas: Vec<f64>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graphics state name for `alpha`, registering it on first use.
    fn alpha_state(&mut self, alpha: f64) -> String {
        let alpha = alpha.clamp(0.0, 1.0);
        let pos = match self.alphas.iter().position(|&a| a == alpha) {
            Some(pos) => pos,
            None => {
                self.alphas.push(alpha);
                self.alphas.len() - 1
            }
        };
        format!("GS{}", pos + 1)
    }

    fn op(&mut self, line: &str) {
        self.ops.push_str(line);
        self.ops.push('\n');
    }

    pub fn save(&mut self) {
        self.op("q");
    }

    pub fn restore(&mut self) {
        self.op("Q");
    }

    /// Set fill color and opacity from an RGBA quadruple.
    pub fn set_fill(&mut self, rgba: [f64; 4]) {
        let gs = self.alpha_state(rgba[3]);
        let line = format!(
            "/{} gs {} {} {} rg",
            gs,
            fmt_num(rgba[0]),
            fmt_num(rgba[1]),
            fmt_num(rgba[2])
        );
        self.op(&line);
    }

    /// Set stroke color and width. Stroke alpha follows the last fill state.
    pub fn set_stroke(&mut self, rgba: [f64; 4], width: f64) {
        let line = format!(
            "{} {} {} RG {} w",
            fmt_num(rgba[0]),
            fmt_num(rgba[1]),
            fmt_num(rgba[2]),
            fmt_num(width)
        );
        self.op(&line);
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let line = format!(
            "{} {} m {} {} l S",
            fmt_num(from.0),
            fmt_num(from.1),
            fmt_num(to.0),
            fmt_num(to.1)
        );
        self.op(&line);
    }

    /// Closed polygon; filled, and stroked too when `stroke` is set.
    pub fn polygon(&mut self, points: &[(f64, f64)], stroke: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = format!("{} {} m", fmt_num(first.0), fmt_num(first.1));
        for p in rest {
            let _ = write!(path, " {} {} l", fmt_num(p.0), fmt_num(p.1));
        }
        path.push_str(if stroke { " h B" } else { " h f" });
        self.op(&path);
    }

    fn circle_path(&self, center: (f64, f64), radius: f64) -> String {
        let (cx, cy) = center;
        let k = radius * KAPPA;
        let mut path = format!("{} {} m", fmt_num(cx + radius), fmt_num(cy));
        let segments = [
            ((cx + radius, cy + k), (cx + k, cy + radius), (cx, cy + radius)),
            ((cx - k, cy + radius), (cx - radius, cy + k), (cx - radius, cy)),
            ((cx - radius, cy - k), (cx - k, cy - radius), (cx, cy - radius)),
            ((cx + k, cy - radius), (cx + radius, cy - k), (cx + radius, cy)),
        ];
        for (c1, c2, end) in segments {
            let _ = write!(
                path,
                " {} {} {} {} {} {} c",
                fmt_num(c1.0),
                fmt_num(c1.1),
                fmt_num(c2.0),
                fmt_num(c2.1),
                fmt_num(end.0),
                fmt_num(end.1)
            );
        }
        path.push_str(" h");
        path
    }

    /// Filled circle, optionally outlined with the current stroke.
    pub fn circle(&mut self, center: (f64, f64), radius: f64, stroke: bool) {
        let mut path = self.circle_path(center, radius);
        path.push_str(if stroke { " B" } else { " f" });
        self.op(&path);
    }

    /// Outline-only circle.
    pub fn ring(&mut self, center: (f64, f64), radius: f64) {
        let mut path = self.circle_path(center, radius);
        path.push_str(" S");
        self.op(&path);
    }

    /// Helvetica text with its baseline starting at `origin`.
    pub fn text(&mut self, origin: (f64, f64), size: f64, text: &str) {
        let line = format!(
            "BT /F1 {} Tf {} {} Td ({}) Tj ET",
            fmt_num(size),
            fmt_num(origin.0),
            fmt_num(origin.1),
            escape_text(text)
        );
        self.op(&line);
    }

    /// Serialize a one-page document of `width` x `height` points.
    pub fn finish(self, width: f64, height: f64) -> Vec<u8> {
        let mut objects: Vec<String> = Vec::new();

        let content_id = 5 + self.alphas.len();

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        objects.push("<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string());

        let mut gstates = String::new();
        for i in 0..self.alphas.len() {
            let _ = write!(gstates, " /GS{} {} 0 R", i + 1, 5 + i);
        }
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 4 0 R >> /ExtGState <<{} >> >> \
             /Contents {} 0 R >>",
            fmt_num(width),
            fmt_num(height),
            gstates,
            content_id
        ));
        objects
            .push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());
        for alpha in &self.alphas {
            objects.push(format!(
                "<< /Type /ExtGState /ca {} /CA {} >>",
                fmt_num(*alpha),
                fmt_num(*alpha)
            ));
        }
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            self.ops.len(),
            self.ops
        ));

        let mut out: Vec<u8> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            let _ = writeln!(xref, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}
