//! kvis core - kernel parsing, layout and rendering.
//!
//! This crate turns graph kernel files (a vertex count followed by one
//! adjacency line per vertex) into PDF drawings.
//!
//! # Pipeline
//!
//! ```text
//! scanner -> parser -> layout -> render -> PDF file
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use kvis_core::{compute_layout, read_kernel_file, render_pdf, write_pdf};
//! use kvis_core::{LayoutParams, RenderOptions};
//! use std::path::Path;
//!
//! # fn main() -> kvis_core::Result<()> {
//! let kernel = read_kernel_file(Path::new("kernels/k1"), None)?;
//! let layout = compute_layout(&kernel, &LayoutParams::default())?;
//! let pdf = render_pdf(&kernel, &layout, &RenderOptions::default())?;
//! write_pdf(Path::new("graphs/k1-vis.pdf"), &pdf)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod parser;
pub mod render;
pub mod scanner;
pub mod solution;

pub use error::{Error, LayoutError, ParseError, RenderError, Result, ScanError, SolutionError};
pub use graph::{Kernel, Rgba, SolutionSet, VertexPropertyMap};
pub use layout::{compute_layout, Layout, LayoutParams};
pub use parser::{read_kernel, read_kernel_file};
pub use render::{render_pdf, write_pdf, RenderOptions};
pub use scanner::scan_kernels;
pub use solution::{read_solution, read_solution_file};

/// Output file name for a kernel file name: `<name>-vis.pdf`.
pub fn output_file_name(input_name: &str) -> String {
    format!("{}-vis.pdf", input_name)
}
