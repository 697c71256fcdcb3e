//! Error types for kvis-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kvis-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error covering every stage of the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Solution(#[from] SolutionError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors raised while reading a kernel file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input had no header line.
    #[error("Missing vertex count header")]
    MissingHeader,

    /// A token that should be a non-negative integer was not.
    #[error("Line {line}: '{token}' is not a valid vertex number")]
    InvalidNumber {
        /// 1-based line number in the input.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The header declares more vertices than a graph can index.
    #[error("Line {line}: vertex count {vertices} exceeds the limit of {max}")]
    TooManyVertices {
        /// 1-based line number of the header.
        line: usize,
        /// Declared vertex count.
        vertices: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// A neighbor index outside `1..=vertices`.
    #[error("Line {line}: vertex {index} out of range (graph has {vertices} vertices)")]
    VertexOutOfRange {
        /// 1-based line number in the input.
        line: usize,
        /// The 1-based index as written in the file.
        index: usize,
        /// Declared vertex count.
        vertices: usize,
    },

    /// An adjacency line for a vertex slot past the declared count.
    #[error("Line {line}: adjacency list for vertex slot {slot} but graph has {vertices} vertices")]
    TooManyLines {
        /// 1-based line number in the input.
        line: usize,
        /// 0-based vertex slot the line would describe.
        slot: usize,
        /// Declared vertex count.
        vertices: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a solution file.
#[derive(Error, Debug)]
pub enum SolutionError {
    #[error("Line {line}: '{token}' is not a valid 1-based vertex number")]
    InvalidVertex {
        /// 1-based line number in the input.
        line: usize,
        /// Offending token.
        token: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while enumerating the input directory.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Errors raised by the force simulation.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The simulation produced NaN or infinite coordinates.
    #[error("Layout diverged at vertex {vertex}")]
    Diverged {
        /// 0-based vertex whose position is not finite.
        vertex: usize,
    },

    /// Layout and graph disagree on the vertex count.
    #[error("Layout has {positions} positions but graph has {vertices} vertices")]
    SizeMismatch {
        positions: usize,
        vertices: usize,
    },
}

/// Errors raised while producing or writing the PDF.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid page geometry: {message}")]
    InvalidPage {
        /// Description of the geometry problem.
        message: String,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
