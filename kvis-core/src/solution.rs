//! Solution file reader.
//!
//! A solution file lists one 1-based vertex per line, the format a vertex
//! cover solver prints. Blank lines and `%` comments are ignored.

use crate::error::SolutionError;
use crate::graph::SolutionSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a solution set, converting each entry to a 0-based vertex index.
pub fn read_solution<R: BufRead>(reader: R) -> Result<SolutionSet, SolutionError> {
    let mut solution = SolutionSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('%') {
            continue;
        }

        let vertex = token
            .parse::<usize>()
            .ok()
            .and_then(|v| v.checked_sub(1))
            .ok_or_else(|| SolutionError::InvalidVertex {
                line: i + 1,
                token: token.to_string(),
            })?;
        solution.insert(vertex);
    }

    Ok(solution)
}

pub fn read_solution_file(path: &Path) -> Result<SolutionSet, SolutionError> {
    let file = File::open(path)?;
    let solution = read_solution(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), vertices = solution.len(), "Loaded solution");
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_solution_converts_to_zero_based() {
        let solution = read_solution(Cursor::new("1\n3\n\n% done\n")).unwrap();
        assert_eq!(solution.len(), 2);
        assert!(solution.contains(0));
        assert!(solution.contains(2));
        assert!(!solution.contains(1));
    }

    #[test]
    fn test_read_solution_rejects_zero() {
        let err = read_solution(Cursor::new("0\n")).unwrap_err();
        assert!(matches!(err, SolutionError::InvalidVertex { line: 1, .. }));
    }

    #[test]
    fn test_read_solution_rejects_garbage() {
        let err = read_solution(Cursor::new("2\nfoo\n")).unwrap_err();
        match err {
            SolutionError::InvalidVertex { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "foo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_solution_duplicates_collapse() {
        let solution = read_solution(Cursor::new("4\n4\n")).unwrap();
        assert_eq!(solution.len(), 1);
    }
}
