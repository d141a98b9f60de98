use super::progress::{Progress, ProgressReporter};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// A vertex payload that can be fused with another payload of the same type.
pub trait Mergeable: Sized {
    /// Combines two payloads into one, consuming both.
    fn merge(self, other: Self) -> Self;

    /// Cost of the payload counted against a graph's maximum vertex size.
    fn size(&self) -> usize;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex index {index} is out of range for a graph with {n_vertices} vertices")]
    VertexOutOfRange { index: usize, n_vertices: usize },
    #[error("Edge would connect vertex {vertex} to itself")]
    SelfLoop { vertex: usize },
}

/// An undirected weighted edge, stored with `v1 < v2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub v1: usize,
    pub v2: usize,
    pub weight: f64,
}

impl Edge {
    fn canonical(a: usize, b: usize, weight: f64) -> Self {
        Self {
            v1: a.min(b),
            v2: a.max(b),
            weight,
        }
    }

    /// The unordered endpoint pair, smaller index first.
    #[inline]
    pub fn pair(&self) -> (usize, usize) {
        (self.v1, self.v2)
    }

    fn map_endpoints(&mut self, f: impl Fn(usize) -> usize) {
        *self = Self::canonical(f(self.v1), f(self.v2), self.weight);
    }
}

/// Vertices with arbitrary payloads joined by weighted undirected edges.
///
/// Vertices are addressed by position. Edges and their weights are kept together, so
/// [`WeightedGraph::edge_pairs`] and [`WeightedGraph::weights`] are always aligned.
#[derive(Debug, Clone)]
pub struct WeightedGraph<V> {
    vertices: Vec<V>,
    edges: Vec<Edge>,
}

impl<V> Default for WeightedGraph<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<V> WeightedGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, payload: V) -> usize {
        self.vertices.push(payload);
        self.vertices.len() - 1
    }

    pub fn add_vertices(&mut self, payloads: impl IntoIterator<Item = V>) {
        self.vertices.extend(payloads);
    }

    /// Adds an undirected edge between two existing vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either index does not name a vertex,
    /// or [`GraphError::SelfLoop`] if both indices are equal.
    pub fn add_edge(&mut self, v1: usize, v2: usize, weight: f64) -> Result<(), GraphError> {
        self.check_index(v1)?;
        self.check_index(v2)?;
        if v1 == v2 {
            return Err(GraphError::SelfLoop { vertex: v1 });
        }
        self.edges.push(Edge::canonical(v1, v2, weight));
        Ok(())
    }

    /// Exchanges the vertices at `v1` and `v2` and rewrites every edge endpoint to match.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either index does not name a vertex.
    pub fn swap_vertices(&mut self, v1: usize, v2: usize) -> Result<(), GraphError> {
        self.check_index(v1)?;
        self.check_index(v2)?;
        if v1 == v2 {
            return Ok(());
        }
        self.vertices.swap(v1, v2);
        for edge in &mut self.edges {
            edge.map_endpoints(|v| match v {
                _ if v == v1 => v2,
                _ if v == v2 => v1,
                _ => v,
            });
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&V> {
        self.vertices.get(index)
    }

    /// Mutable access to a vertex payload. Edges are not affected.
    pub fn vertex_mut(&mut self, index: usize) -> Option<&mut V> {
        self.vertices.get_mut(index)
    }

    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(Edge::pair).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.edges.iter().map(|e| e.weight).collect()
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges.
    pub fn size(&self) -> usize {
        self.n_edges()
    }

    fn check_index(&self, index: usize) -> Result<(), GraphError> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                index,
                n_vertices: self.vertices.len(),
            })
        }
    }

    fn sort_edges_by_weight(&mut self) {
        self.edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    }

    /// Drops self-loops and keeps only the first edge of every endpoint pair.
    fn dedup_edges(&mut self) {
        let mut seen = HashSet::with_capacity(self.edges.len());
        self.edges.retain(|e| e.v1 != e.v2 && seen.insert(e.pair()));
    }
}

/// A [`WeightedGraph`] whose edges can be contracted while merged vertices stay within
/// `max_vertex_size`.
#[derive(Debug, Clone)]
pub struct ContractableGraph<V: Mergeable> {
    graph: WeightedGraph<V>,
    max_vertex_size: usize,
}

impl<V: Mergeable> ContractableGraph<V> {
    pub fn new(max_vertex_size: usize) -> Self {
        Self {
            graph: WeightedGraph::new(),
            max_vertex_size,
        }
    }

    pub fn max_vertex_size(&self) -> usize {
        self.max_vertex_size
    }

    pub fn graph(&self) -> &WeightedGraph<V> {
        &self.graph
    }

    pub fn into_graph(self) -> WeightedGraph<V> {
        self.graph
    }

    pub fn add_vertex(&mut self, payload: V) -> usize {
        self.graph.add_vertex(payload)
    }

    pub fn add_vertices(&mut self, payloads: impl IntoIterator<Item = V>) {
        self.graph.add_vertices(payloads);
    }

    /// See [`WeightedGraph::add_edge`].
    pub fn add_edge(&mut self, v1: usize, v2: usize, weight: f64) -> Result<(), GraphError> {
        self.graph.add_edge(v1, v2, weight)
    }

    /// See [`WeightedGraph::swap_vertices`].
    pub fn swap_vertices(&mut self, v1: usize, v2: usize) -> Result<(), GraphError> {
        self.graph.swap_vertices(v1, v2)
    }

    pub fn vertices(&self) -> &[V] {
        self.graph.vertices()
    }

    pub fn vertex(&self, index: usize) -> Option<&V> {
        self.graph.vertex(index)
    }

    pub fn vertex_mut(&mut self, index: usize) -> Option<&mut V> {
        self.graph.vertex_mut(index)
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.graph.edge_pairs()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.graph.weights()
    }

    pub fn n_vertices(&self) -> usize {
        self.graph.n_vertices()
    }

    pub fn n_edges(&self) -> usize {
        self.graph.n_edges()
    }

    /// Number of edges.
    pub fn size(&self) -> usize {
        self.graph.size()
    }

    /// Greedily contracts the lightest edge whose endpoints fit together under
    /// `max_vertex_size`, until no such edge remains.
    ///
    /// Each contraction removes both endpoints, appends their merge (lower index merged
    /// with higher) as the last vertex, and shifts the remaining indices down. Parallel
    /// edges created by a merge collapse to the lightest one; ties keep the edge that was
    /// added first. Running it again on a contracted graph changes nothing.
    pub fn contract_by_smallest_weight(&mut self) {
        self.contract_with_progress(&ProgressReporter::new());
    }

    /// Same as [`ContractableGraph::contract_by_smallest_weight`], reporting one task
    /// increment per contraction.
    #[instrument(skip_all, name = "graph_contraction", fields(vertices = self.graph.n_vertices(), edges = self.graph.n_edges()))]
    pub fn contract_with_progress(&mut self, reporter: &ProgressReporter) {
        reporter.report(Progress::TaskStart {
            total_steps: self.graph.n_vertices().saturating_sub(1) as u64,
        });

        self.graph.sort_edges_by_weight();
        self.graph.dedup_edges();

        let mut contractions = 0usize;
        loop {
            self.graph.sort_edges_by_weight();
            let Some(position) = self.find_contractable_edge() else {
                break;
            };
            self.contract_edge(position);
            contractions += 1;
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        debug!(
            contractions,
            vertices = self.graph.n_vertices(),
            edges = self.graph.n_edges(),
            "Contraction reached a fixed point."
        );
    }

    fn find_contractable_edge(&self) -> Option<usize> {
        let vertices = &self.graph.vertices;
        self.graph.edges.iter().position(|e| {
            vertices[e.v1].size() + vertices[e.v2].size() <= self.max_vertex_size
        })
    }

    fn contract_edge(&mut self, position: usize) {
        let edge = self.graph.edges.remove(position);
        let (low, high) = edge.pair();
        trace!(low, high, weight = edge.weight, "Contracting edge.");

        let higher = self.graph.vertices.remove(high);
        let lower = self.graph.vertices.remove(low);
        let merged = self.graph.add_vertex(lower.merge(higher));

        for e in &mut self.graph.edges {
            e.map_endpoints(|v| reindex(v, low, high, merged));
        }
        self.graph.dedup_edges();
    }
}

/// New index of vertex `v` after the vertices at `low < high` were removed and their
/// merge appended at `merged`.
#[inline]
fn reindex(v: usize, low: usize, high: usize, merged: usize) -> usize {
    if v == low || v == high {
        merged
    } else if v > high {
        v - 2
    } else if v > low {
        v - 1
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Blob(Vec<usize>);

    impl Mergeable for Blob {
        fn merge(mut self, other: Self) -> Self {
            self.0.extend(other.0);
            self
        }

        fn size(&self) -> usize {
            self.0.len()
        }
    }

    fn singletons(n: usize, max_size: usize) -> ContractableGraph<Blob> {
        let mut graph = ContractableGraph::new(max_size);
        graph.add_vertices((0..n).map(|i| Blob(vec![i])));
        graph
    }

    fn assert_fixed_point(graph: &ContractableGraph<Blob>) {
        for e in graph.edges() {
            let combined = graph.vertices()[e.v1].size() + graph.vertices()[e.v2].size();
            assert!(combined > graph.max_vertex_size());
        }
    }

    fn assert_no_duplicate_pairs(graph: &ContractableGraph<Blob>) {
        let pairs = graph.graph().edge_pairs();
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), pairs.len());
        assert!(pairs.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn add_edge_stores_smaller_index_first() {
        let mut graph = WeightedGraph::new();
        graph.add_vertices([1, 2, 3, 4]);
        graph.add_edge(0, 1, 0.2).unwrap();
        graph.add_edge(2, 0, 0.5).unwrap();
        graph.add_edge(3, 2, 0.1).unwrap();
        graph.add_edge(3, 1, 0.3).unwrap();

        assert_eq!(graph.edge_pairs(), vec![(0, 1), (0, 2), (2, 3), (1, 3)]);
        assert_eq!(graph.weights(), vec![0.2, 0.5, 0.1, 0.3]);
        assert_eq!(graph.size(), 4);
        assert_eq!(graph.n_vertices(), 4);
    }

    #[test]
    fn add_edge_rejects_out_of_range_vertices() {
        let mut graph = WeightedGraph::new();
        graph.add_vertices(["a", "b"]);
        assert_eq!(
            graph.add_edge(0, 2, 1.0),
            Err(GraphError::VertexOutOfRange {
                index: 2,
                n_vertices: 2
            })
        );
        assert_eq!(graph.n_edges(), 0);
    }

    #[test]
    fn add_edge_rejects_self_loops() {
        let mut graph = WeightedGraph::new();
        graph.add_vertex("a");
        assert_eq!(
            graph.add_edge(0, 0, 1.0),
            Err(GraphError::SelfLoop { vertex: 0 })
        );
    }

    #[test]
    fn contraction_of_water_like_graph_merges_shortest_bond() {
        // H(0), H(1), O(2) with O-H bonds of slightly different length.
        let mut graph = singletons(3, 2);
        graph.add_edge(0, 2, 1.0997).unwrap();
        graph.add_edge(1, 2, 1.1000).unwrap();

        graph.contract_by_smallest_weight();

        assert_eq!(graph.vertices(), &[Blob(vec![1]), Blob(vec![0, 2])]);
        assert_eq!(graph.vertex(1), Some(&Blob(vec![0, 2])));
        assert_eq!(graph.edge_pairs(), vec![(0, 1)]);
        assert_eq!(graph.weights(), vec![1.1000]);
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn contraction_of_chain_follows_weight_order_and_reindexing() {
        let mut graph = singletons(6, 2);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(2, 3, 1.5).unwrap();
        graph.add_edge(3, 4, 3.0).unwrap();
        graph.add_edge(4, 5, 1.2).unwrap();

        graph.contract_by_smallest_weight();

        assert_eq!(
            graph.vertices(),
            &[Blob(vec![0, 1]), Blob(vec![4, 5]), Blob(vec![2, 3])]
        );
        assert_eq!(graph.graph().edge_pairs(), vec![(0, 2), (1, 2)]);
        assert_eq!(graph.graph().weights(), vec![2.0, 3.0]);
        assert_fixed_point(&graph);
    }

    #[test]
    fn contraction_keeps_lightest_of_parallel_edges() {
        let mut graph = singletons(3, 2);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(0, 2, 2.0).unwrap();
        graph.add_edge(1, 2, 1.5).unwrap();

        graph.contract_by_smallest_weight();

        assert_eq!(graph.vertices(), &[Blob(vec![2]), Blob(vec![0, 1])]);
        assert_eq!(graph.graph().edge_pairs(), vec![(0, 1)]);
        assert_eq!(graph.graph().weights(), vec![1.5]);
    }

    #[test]
    fn contraction_collapses_duplicate_input_edges() {
        let mut graph = singletons(2, 1);
        graph.add_edge(0, 1, 2.0).unwrap();
        graph.add_edge(1, 0, 0.5).unwrap();

        graph.contract_by_smallest_weight();

        assert_eq!(graph.n_vertices(), 2);
        assert_eq!(graph.graph().edge_pairs(), vec![(0, 1)]);
        assert_eq!(graph.graph().weights(), vec![0.5]);
    }

    #[test]
    fn contraction_with_equal_weights_prefers_earlier_edge() {
        let mut graph = singletons(3, 2);
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(0, 1, 1.0).unwrap();

        graph.contract_by_smallest_weight();

        assert_eq!(graph.vertices(), &[Blob(vec![0]), Blob(vec![1, 2])]);
    }

    #[test]
    fn oversized_vertex_stays_isolated() {
        let mut graph = ContractableGraph::new(2);
        graph.add_vertex(Blob(vec![0, 1, 2]));
        graph.add_vertex(Blob(vec![3]));
        graph.add_edge(0, 1, 0.1).unwrap();

        graph.contract_by_smallest_weight();

        assert_eq!(graph.n_vertices(), 2);
        assert_eq!(graph.n_edges(), 1);
    }

    #[test]
    fn contraction_conserves_payload_and_removes_one_vertex_per_step() {
        let n = 12;
        let mut graph = singletons(n, 4);
        for i in 0..n {
            for j in (i + 1)..n {
                if (i * 7 + j * 3) % 4 == 0 || j == i + 1 {
                    graph.add_edge(i, j, ((i * 31 + j * 17) % 11) as f64 + 0.5).unwrap();
                }
            }
        }

        let increments = Arc::new(Mutex::new(0usize));
        let counter = increments.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if matches!(event, Progress::TaskIncrement) {
                *counter.lock().unwrap() += 1;
            }
        }));
        graph.contract_with_progress(&reporter);

        let contractions = *increments.lock().unwrap();
        assert!(contractions > 0);
        assert_eq!(graph.n_vertices(), n - contractions);

        let mut all: Vec<usize> = graph.vertices().iter().flat_map(|b| b.0.clone()).collect();
        all.sort_unstable();
        assert_eq!(all, (0..n).collect::<Vec<_>>());
        assert!(graph.vertices().iter().all(|b| b.size() <= 4));
        assert_fixed_point(&graph);
        assert_no_duplicate_pairs(&graph);
    }

    #[test]
    fn contracting_twice_is_a_no_op() {
        let mut graph = singletons(5, 2);
        for i in 0..4 {
            graph.add_edge(i, i + 1, 1.0 + i as f64).unwrap();
        }
        graph.contract_by_smallest_weight();
        let vertices = graph.vertices().to_vec();
        let edges = graph.edges().to_vec();

        graph.contract_by_smallest_weight();

        assert_eq!(graph.vertices(), vertices.as_slice());
        assert_eq!(graph.edges(), edges.as_slice());
    }

    #[test]
    fn swap_vertices_rewrites_edge_endpoints() {
        let mut graph = singletons(3, 1);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();

        graph.swap_vertices(0, 2).unwrap();

        assert_eq!(
            graph.vertices(),
            &[Blob(vec![2]), Blob(vec![1]), Blob(vec![0])]
        );
        assert_eq!(graph.graph().edge_pairs(), vec![(1, 2), (0, 1)]);
        assert_eq!(graph.graph().weights(), vec![1.0, 2.0]);
    }

    #[test]
    fn swap_vertices_rejects_out_of_range_index() {
        let mut graph = singletons(2, 1);
        assert!(matches!(
            graph.swap_vertices(0, 5),
            Err(GraphError::VertexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn reindex_shifts_indices_around_removed_pair() {
        // Vertices 0..6, contracting 1 and 3; merged vertex lands at 4.
        let mapped: Vec<usize> = (0..6).map(|v| reindex(v, 1, 3, 4)).collect();
        assert_eq!(mapped, vec![0, 4, 1, 4, 2, 3]);
    }
}
