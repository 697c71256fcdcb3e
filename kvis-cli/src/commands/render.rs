//! Render command - batch kernel visualization
//!
//! Walks the input directory and, for every kernel file, parses it, computes a
//! layout and writes `<output>/<name>-vis.pdf`.
//!
//! Parse failures abort the whole batch. Layout, render and write failures
//! only skip the file they happened on.

use anyhow::{Context, Result};
use kvis_core::{
    compute_layout, output_file_name, read_kernel_file, render_pdf, scan_kernels, write_pdf,
    Kernel, LayoutParams, RenderOptions, SolutionSet,
};
use std::path::{Path, PathBuf};

/// Everything one batch run needs.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub solution: Option<SolutionSet>,
    pub layout: LayoutParams,
    pub render: RenderOptions,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// PDFs written, in processing order.
    pub rendered: Vec<PathBuf>,
    /// Input files that failed to render, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.rendered.len() + self.failed.len()
    }
}

/// Layout, render and write a single parsed kernel.
fn render_kernel(
    kernel: &Kernel,
    output: &Path,
    options: &BatchOptions,
) -> kvis_core::Result<()> {
    let layout = compute_layout(kernel, &options.layout)?;
    let pdf = render_pdf(kernel, &layout, &options.render)?;
    write_pdf(output, &pdf)?;
    Ok(())
}

/// Run the batch described by `options`.
pub fn run(options: &BatchOptions) -> Result<BatchSummary> {
    let files = scan_kernels(&options.input_dir)
        .with_context(|| format!("Failed to list {}", options.input_dir.display()))?;

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    tracing::info!(
        input = %options.input_dir.display(),
        output = %options.output_dir.display(),
        files = files.len(),
        "Starting batch"
    );

    let mut summary = BatchSummary::default();

    for path in files {
        println!("{}", path.display());

        let kernel = read_kernel_file(&path, options.solution.as_ref())
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let output = options.output_dir.join(output_file_name(&name));

        match render_kernel(&kernel, &output, options) {
            Ok(()) => {
                tracing::debug!(output = %output.display(), "Rendered kernel");
                summary.rendered.push(output);
            }
            Err(e) => {
                println!("{} had an error: {}", path.display(), e);
                tracing::warn!(path = %path.display(), error = %e, "Rendering failed");
                summary.failed.push((path, e.to_string()));
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(input: &Path, output: &Path) -> BatchOptions {
        BatchOptions {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            layout: LayoutParams {
                iterations: 20,
                ..LayoutParams::default()
            },
            ..BatchOptions::default()
        }
    }

    #[test]
    fn test_run_renders_every_file() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a"), "3\n2 3\n1\n1\n").unwrap();
        fs::write(input.path().join("b"), "2\n2\n\n").unwrap();

        let summary = run(&options(input.path(), output.path())).unwrap();

        assert_eq!(summary.total(), 2);
        assert!(summary.failed.is_empty());
        for name in ["a-vis.pdf", "b-vis.pdf"] {
            let bytes = fs::read(output.path().join(name)).unwrap();
            assert!(bytes.starts_with(b"%PDF-1.4"));
        }
    }

    #[test]
    fn test_run_creates_output_directory() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let nested = output.path().join("graphs").join("run1");
        fs::write(input.path().join("k"), "1\n\n").unwrap();

        run(&options(input.path(), &nested)).unwrap();
        assert!(nested.join("k-vis.pdf").exists());
    }

    #[test]
    fn test_run_continues_after_render_failure() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a"), "2\n2\n1\n").unwrap();
        fs::write(input.path().join("b"), "2\n2\n1\n").unwrap();
        // A directory in the way of a's output makes that write fail.
        fs::create_dir(output.path().join("a-vis.pdf")).unwrap();

        let summary = run(&options(input.path(), output.path())).unwrap();

        assert_eq!(summary.rendered.len(), 1);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].0.ends_with("a"));
        assert!(output.path().join("b-vis.pdf").is_file());
    }

    #[test]
    fn test_run_aborts_on_parse_error() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a"), "2\n5\n").unwrap();
        fs::write(input.path().join("b"), "2\n2\n1\n").unwrap();

        let err = run(&options(input.path(), output.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));
        assert!(!output.path().join("b-vis.pdf").exists());
    }

    #[test]
    fn test_run_missing_input_directory() {
        let output = TempDir::new().unwrap();
        let err = run(&options(Path::new("/no/such/kernels"), output.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("does not exist"));
    }
}
