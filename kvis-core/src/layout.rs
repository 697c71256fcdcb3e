//! Force-directed layout driven by the `force_graph` simulation.
//!
//! Vertices start evenly spaced on a circle (so no two share a position) and the
//! spring/charge simulation is stepped a fixed number of times with a constant
//! time step. The result is deterministic for a given graph and parameters.

use crate::error::LayoutError;
use crate::graph::Kernel;
use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

/// Simulation settings. Every field may be overridden from `.kvisrc.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Number of simulation steps.
    pub iterations: usize,
    /// Time step per iteration, in seconds.
    pub time_step: f32,
    /// Repulsion between every pair of vertices.
    pub charge: f32,
    /// Attraction along arcs.
    pub spring: f32,
    /// Upper bound on the force applied to a single vertex.
    pub max_force: f32,
    pub node_speed: f32,
    pub damping: f32,
    pub node_mass: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            iterations: 500,
            time_step: 0.035,
            charge: 150.0,
            spring: 0.05,
            max_force: 100.0,
            node_speed: 3000.0,
            damping: 0.9,
            node_mass: 10.0,
        }
    }
}

impl LayoutParams {
    fn simulation(&self) -> SimulationParameters {
        SimulationParameters {
            force_charge: self.charge,
            force_spring: self.spring,
            force_max: self.max_force,
            node_speed: self.node_speed,
            damping_factor: self.damping,
        }
    }
}

/// 2D coordinates for each vertex, indexed by 0-based vertex number.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub positions: Vec<(f64, f64)>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let (&(x0, y0), rest) = self.positions.split_first()?;
        Some(rest.iter().fold((x0, y0, x0, y0), |(ax, ay, bx, by), &(x, y)| {
            (ax.min(x), ay.min(y), bx.max(x), by.max(y))
        }))
    }
}

/// Starting position of vertex `i` out of `n` on a circle around the origin.
fn initial_position(i: usize, n: usize) -> (f32, f32) {
    let radius = 20.0 * (n as f32).sqrt().max(1.0);
    let angle = i as f32 * 2.0 * PI / n as f32;
    (radius * angle.cos(), radius * angle.sin())
}

/// Compute a force-directed layout for `kernel`.
pub fn compute_layout(kernel: &Kernel, params: &LayoutParams) -> Result<Layout, LayoutError> {
    let n = kernel.vertex_count();
    let mut graph: ForceGraph<(), ()> = ForceGraph::new(params.simulation());

    let indices: Vec<DefaultNodeIdx> = (0..n)
        .map(|i| {
            let (x, y) = initial_position(i, n);
            graph.add_node(NodeData {
                x,
                y,
                mass: params.node_mass,
                is_anchor: false,
                user_data: (),
            })
        })
        .collect();

    // One spring per unordered pair; self-loops pull nothing.
    let mut springs = HashSet::new();
    for (source, target) in kernel.edges() {
        if source == target {
            continue;
        }
        let key = (source.min(target), source.max(target));
        if springs.insert(key) {
            graph.add_edge(indices[key.0], indices[key.1], EdgeData::default());
        }
    }

    for _ in 0..params.iterations {
        graph.update(params.time_step);
    }

    let mut by_index = HashMap::with_capacity(n);
    graph.visit_nodes(|node| {
        by_index.insert(node.index(), (node.x() as f64, node.y() as f64));
    });

    let mut positions = Vec::with_capacity(n);
    for (vertex, idx) in indices.iter().enumerate() {
        match by_index.get(idx) {
            Some(&(x, y)) if x.is_finite() && y.is_finite() => positions.push((x, y)),
            _ => return Err(LayoutError::Diverged { vertex }),
        }
    }

    tracing::debug!(
        vertices = n,
        springs = springs.len(),
        iterations = params.iterations,
        "Computed layout"
    );
    Ok(Layout { positions })
}
