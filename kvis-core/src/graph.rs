//! In-memory kernel graph powered by petgraph.
//!
//! A [`Kernel`] holds a directed graph whose vertex `k` is `NodeIndex::new(k)`,
//! together with two vertex property maps (fill color and marker size) that the
//! renderer consumes. Everything is built once by the parser and never mutated.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;
use std::ops::Index;

/// RGBA fill color, each channel in `0.0..=1.0`.
pub type Rgba = [f64; 4];

/// Fill color of highlighted (solution) vertices.
pub const SOLUTION_COLOR: Rgba = [1.0, 165.0 / 255.0, 0.0, 0.8];

/// Fill color of all other vertices.
pub const DEFAULT_COLOR: Rgba = [0.0, 1.0, 1.0, 0.8];

/// Marker size of highlighted vertices, in points.
pub const SOLUTION_SIZE: u32 = 5;

/// Marker size of all other vertices, in points.
pub const DEFAULT_SIZE: u32 = 2;

/// Upper bound on up-front allocation; larger graphs grow as vertices are added.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Per-vertex values addressable by `NodeIndex`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexPropertyMap<T> {
    values: Vec<T>,
}

impl<T> VertexPropertyMap<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn get(&self, vertex: NodeIndex) -> Option<&T> {
        self.values.get(vertex.index())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T> Index<NodeIndex> for VertexPropertyMap<T> {
    type Output = T;

    fn index(&self, vertex: NodeIndex) -> &T {
        &self.values[vertex.index()]
    }
}

/// Vertex indices to highlight, 0-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet {
    vertices: HashSet<usize>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vertex: usize) -> bool {
        self.vertices.insert(vertex)
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl FromIterator<usize> for SolutionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

/// Color and size for a vertex, depending on solution membership.
pub fn vertex_style(vertex: usize, solution: Option<&SolutionSet>) -> (Rgba, u32) {
    match solution {
        Some(set) if set.contains(vertex) => (SOLUTION_COLOR, SOLUTION_SIZE),
        _ => (DEFAULT_COLOR, DEFAULT_SIZE),
    }
}

/// A parsed kernel: the graph plus its per-vertex drawing attributes.
#[derive(Debug, Clone)]
pub struct Kernel {
    pub graph: DiGraph<(), ()>,
    pub colors: VertexPropertyMap<Rgba>,
    pub sizes: VertexPropertyMap<u32>,
}

impl Kernel {
    /// Create a kernel with `vertices` isolated vertices styled against `solution`.
    pub fn with_vertices(vertices: usize, solution: Option<&SolutionSet>) -> Self {
        let capacity = vertices.min(PREALLOC_LIMIT);
        let mut graph = DiGraph::with_capacity(capacity, 0);
        let mut colors = VertexPropertyMap::with_capacity(capacity);
        let mut sizes = VertexPropertyMap::with_capacity(capacity);

        for i in 0..vertices {
            graph.add_node(());
            let (color, size) = vertex_style(i, solution);
            colors.push(color);
            sizes.push(size);
        }

        Kernel {
            graph,
            colors,
            sizes,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All arcs as 0-based `(source, target)` pairs, in insertion order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    /// Add an arc between two existing 0-based vertices.
    pub(crate) fn add_arc(&mut self, source: usize, target: usize) {
        self.graph
            .add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
    }
}
