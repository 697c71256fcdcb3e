//! Kernel file reader.
//!
//! # Format
//!
//! ```text
//! % optional comment lines anywhere
//! <vertex_count> [ignored tokens...]
//! <1-based neighbors of vertex 0>
//! <1-based neighbors of vertex 1>
//! ...
//! ```
//!
//! Every non-comment line after the header describes the next vertex slot. A
//! blank line still consumes its slot, so the vertex it stands for keeps no
//! outgoing arcs. Comment lines (`%`) consume nothing.

use crate::error::ParseError;
use crate::graph::{Kernel, SolutionSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Largest vertex count accepted in a header. Stays well inside the `u32`
/// index space of the underlying graph.
pub const MAX_VERTICES: usize = 1 << 24;

fn is_comment(line: &str) -> bool {
    line.starts_with('%')
}

fn parse_number(token: &str, line: usize) -> Result<usize, ParseError> {
    token.parse::<usize>().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Read a kernel from any buffered reader, styling vertices against `solution`.
pub fn read_kernel<R: BufRead>(
    reader: R,
    solution: Option<&SolutionSet>,
) -> Result<Kernel, ParseError> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let vertices = loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(ParseError::MissingHeader);
        };
        let line = line?;
        if is_comment(&line) {
            continue;
        }
        let token = line
            .split_whitespace()
            .next()
            .ok_or(ParseError::MissingHeader)?;
        let vertices = parse_number(token, line_no)?;
        if vertices > MAX_VERTICES {
            return Err(ParseError::TooManyVertices {
                line: line_no,
                vertices,
                max: MAX_VERTICES,
            });
        }
        break vertices;
    };

    let mut kernel = Kernel::with_vertices(vertices, solution);
    let mut slot = 0usize;

    for (line_no, line) in lines {
        let line = line?;
        if is_comment(&line) {
            continue;
        }

        let current = slot;
        slot += 1;

        if line.trim().is_empty() {
            continue;
        }
        if current >= vertices {
            return Err(ParseError::TooManyLines {
                line: line_no,
                slot: current,
                vertices,
            });
        }

        for token in line.split_whitespace() {
            let index = parse_number(token, line_no)?;
            if index == 0 || index > vertices {
                return Err(ParseError::VertexOutOfRange {
                    line: line_no,
                    index,
                    vertices,
                });
            }
            kernel.add_arc(current, index - 1);
        }
    }

    tracing::debug!(
        vertices = kernel.vertex_count(),
        edges = kernel.edge_count(),
        "Parsed kernel"
    );
    Ok(kernel)
}

/// Open `path` and read it as a kernel file.
pub fn read_kernel_file(
    path: &Path,
    solution: Option<&SolutionSet>,
) -> Result<Kernel, ParseError> {
    let file = File::open(path)?;
    read_kernel(BufReader::new(file), solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DEFAULT_COLOR, DEFAULT_SIZE, SOLUTION_COLOR, SOLUTION_SIZE};
    use petgraph::graph::NodeIndex;
    use std::io::Cursor;

    fn parse(input: &str) -> Result<Kernel, ParseError> {
        read_kernel(Cursor::new(input), None)
    }

    #[test]
    fn test_parse_triangle_star() {
        let kernel = parse("3\n2 3\n1\n1\n").unwrap();
        assert_eq!(kernel.vertex_count(), 3);
        assert_eq!(kernel.edges(), vec![(0, 1), (0, 2), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_header_extra_tokens_ignored() {
        let kernel = parse("2 1 0\n2\n").unwrap();
        assert_eq!(kernel.vertex_count(), 2);
        assert_eq!(kernel.edges(), vec![(0, 1)]);
    }

    #[test]
    fn test_blank_line_consumes_slot() {
        let kernel = parse("3\n2\n\n1\n").unwrap();
        assert_eq!(kernel.edges(), vec![(0, 1), (2, 0)]);
        assert_eq!(
            kernel
                .graph
                .neighbors(NodeIndex::new(1))
                .count(),
            0
        );
    }

    #[test]
    fn test_trailing_blank_lines_allowed() {
        let kernel = parse("2\n2\n1\n\n\n").unwrap();
        assert_eq!(kernel.edge_count(), 2);
    }

    #[test]
    fn test_comment_lines_do_not_consume_slot() {
        let kernel = parse("% kernel\n3\n2\n% note\n3\n").unwrap();
        assert_eq!(kernel.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_out_of_range_index() {
        let err = parse("2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::VertexOutOfRange {
                line: 2,
                index: 3,
                vertices: 2
            }
        ));
    }

    #[test]
    fn test_zero_index_is_out_of_range() {
        let err = parse("2\n0\n").unwrap_err();
        assert!(matches!(err, ParseError::VertexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn test_too_many_lines() {
        let err = parse("1\n1\n1\n").unwrap_err();
        assert!(matches!(err, ParseError::TooManyLines { line: 3, slot: 1, .. }));
    }

    #[test]
    fn test_malformed_count() {
        let err = parse("three\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_malformed_neighbor() {
        let err = parse("2\n2 x\n").unwrap_err();
        match err {
            ParseError::InvalidNumber { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_vertex_count_rejected() {
        for header in ["18446744073709551615\n", "4294967296\n", "16777217 5\n"] {
            let err = parse(header).unwrap_err();
            assert!(
                matches!(err, ParseError::TooManyVertices { line: 1, .. }),
                "header {header:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse("").unwrap_err(), ParseError::MissingHeader));
    }

    #[test]
    fn test_solution_styling() {
        let solution: SolutionSet = [0, 2].into_iter().collect();
        let kernel = read_kernel(Cursor::new("3\n2\n3\n1\n"), Some(&solution)).unwrap();

        assert_eq!(kernel.colors[NodeIndex::new(0)], SOLUTION_COLOR);
        assert_eq!(kernel.sizes[NodeIndex::new(0)], SOLUTION_SIZE);
        assert_eq!(kernel.colors[NodeIndex::new(1)], DEFAULT_COLOR);
        assert_eq!(kernel.sizes[NodeIndex::new(1)], DEFAULT_SIZE);
        assert_eq!(kernel.colors[NodeIndex::new(2)], SOLUTION_COLOR);
    }

    #[test]
    fn test_read_kernel_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("k1");
        std::fs::write(&path, "2\n2\n1\n").unwrap();

        let kernel = read_kernel_file(&path, None).unwrap();
        assert_eq!(kernel.edges(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_kernel_file(Path::new("/definitely/not/here"), None).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
