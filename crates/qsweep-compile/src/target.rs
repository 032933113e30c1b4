//! Connectivity and gate set of the device being compiled for.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

const UNREACHABLE: u32 = u32::MAX;

/// Which physical qubit pairs can run a two-qubit gate. Edges are undirected.
///
/// Hop counts and shortest-path predecessors for every pair are computed
/// once, when the map is built, so routing queries are table lookups.
///
/// ```
/// use qsweep_compile::CouplingMap;
///
/// let cm = CouplingMap::from_edges([(0, 1), (1, 2)]);
/// assert!(cm.is_connected(1, 0));
/// assert!(!cm.is_connected(0, 2));
/// assert_eq!(cm.shortest_path(0, 2), Some(vec![0, 1, 2]));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "EdgeList", into = "EdgeList")]
pub struct CouplingMap {
    num_qubits: u32,
    edges: Vec<(u32, u32)>,
    neighbors: Vec<Vec<u32>>,
    /// Row-major `n × n` hop counts.
    hops: Vec<u32>,
    /// `via[from * n + to]` precedes `to` on a shortest path from `from`.
    via: Vec<u32>,
}

#[derive(Clone, Serialize, Deserialize)]
struct EdgeList {
    num_qubits: u32,
    edges: Vec<(u32, u32)>,
}

impl From<EdgeList> for CouplingMap {
    fn from(list: EdgeList) -> Self {
        Self::with_edges(list.num_qubits, list.edges)
    }
}

impl From<CouplingMap> for EdgeList {
    fn from(map: CouplingMap) -> Self {
        Self {
            num_qubits: map.num_qubits,
            edges: map.edges,
        }
    }
}

impl CouplingMap {
    /// `num_qubits` physical qubits joined by `edges`.
    ///
    /// The register grows to cover any qubit an edge mentions. Self-loops and
    /// repeated edges, in either direction, are dropped.
    pub fn with_edges(num_qubits: u32, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let edges: Vec<(u32, u32)> = edges.into_iter().collect();
        let num_qubits = edges
            .iter()
            .map(|&(a, b)| a.max(b) + 1)
            .fold(num_qubits, u32::max);
        let n = num_qubits as usize;

        let mut neighbors = vec![Vec::new(); n];
        let mut kept = Vec::with_capacity(edges.len());
        for (a, b) in edges {
            if a == b || neighbors[a as usize].contains(&b) {
                continue;
            }
            neighbors[a as usize].push(b);
            neighbors[b as usize].push(a);
            kept.push((a, b));
        }

        let mut hops = vec![UNREACHABLE; n * n];
        let mut via = vec![UNREACHABLE; n * n];
        let mut queue = VecDeque::new();
        for src in 0..n {
            let row = src * n;
            hops[row + src] = 0;
            queue.push_back(src);
            while let Some(current) = queue.pop_front() {
                for &next in &neighbors[current] {
                    let next = next as usize;
                    if hops[row + next] == UNREACHABLE {
                        hops[row + next] = hops[row + current] + 1;
                        via[row + next] = current as u32;
                        queue.push_back(next);
                    }
                }
            }
        }

        Self {
            num_qubits,
            edges: kept,
            neighbors,
            hops,
            via,
        }
    }

    /// Map sized by the largest qubit the edges mention.
    pub fn from_edges(edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self::with_edges(0, edges)
    }

    /// Chain 0-1-2-...-(n-1).
    pub fn linear(n: u32) -> Self {
        Self::with_edges(n, (1..n).map(|i| (i - 1, i)))
    }

    /// Every pair connected.
    pub fn full(n: u32) -> Self {
        Self::with_edges(n, (0..n).flat_map(|a| (a + 1..n).map(move |b| (a, b))))
    }

    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    #[inline]
    pub fn is_connected(&self, a: u32, b: u32) -> bool {
        self.neighbors
            .get(a as usize)
            .is_some_and(|adjacent| adjacent.contains(&b))
    }

    pub fn neighbors(&self, qubit: u32) -> &[u32] {
        self.neighbors.get(qubit as usize).map_or(&[], Vec::as_slice)
    }

    fn index(&self, from: u32, to: u32) -> Option<usize> {
        (from < self.num_qubits && to < self.num_qubits)
            .then(|| from as usize * self.num_qubits as usize + to as usize)
    }

    /// Edges on a shortest path, `None` when no path exists.
    pub fn distance(&self, from: u32, to: u32) -> Option<u32> {
        let hops = self.hops[self.index(from, to)?];
        (hops != UNREACHABLE).then_some(hops)
    }

    /// A shortest path including both endpoints.
    pub fn shortest_path(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        let len = self.distance(from, to)? as usize;
        let mut path = Vec::with_capacity(len + 1);
        let mut at = to;
        path.push(at);
        while at != from {
            at = self.via[self.index(from, at)?];
            path.push(at);
        }
        path.reverse();
        Some(path)
    }
}

/// Gate names the device runs natively, in OpenQASM spelling.
///
/// `measure`, `reset` and `barrier` never need listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisGates(Vec<String>);

impl BasisGates {
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(gates.into_iter().map(Into::into).collect())
    }

    /// `id`, `rz`, `sx`, `x` and `cx`.
    pub fn rz_sx_cx() -> Self {
        Self::new(["id", "rz", "sx", "x", "cx"])
    }

    /// `u` and `cx`.
    pub fn u_cx() -> Self {
        Self::new(["u", "cx"])
    }

    pub fn contains(&self, gate: &str) -> bool {
        self.0.iter().any(|g| g == gate)
    }

    pub fn gates(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_sizes_register() {
        let cm = CouplingMap::from_edges([(0, 1), (1, 2)]);
        assert_eq!(cm.num_qubits(), 3);
        assert!(cm.is_connected(2, 1));
        assert_eq!(cm.distance(0, 2), Some(2));
        assert_eq!(cm.shortest_path(2, 0), Some(vec![2, 1, 0]));
    }

    #[test]
    fn test_duplicates_and_islands() {
        let cm = CouplingMap::with_edges(4, [(0, 1), (1, 0), (2, 3), (3, 3)]);
        assert_eq!(cm.edges(), &[(0, 1), (2, 3)]);
        assert_eq!(cm.distance(0, 3), None);
        assert_eq!(cm.shortest_path(0, 3), None);
        assert_eq!(cm.shortest_path(1, 1), Some(vec![1]));
        assert_eq!(cm.distance(0, 9), None);
    }

    #[test]
    fn test_full_map_is_one_hop() {
        let cm = CouplingMap::full(4);
        assert_eq!(cm.edges().len(), 6);
        assert!((0..4).all(|a| cm.neighbors(a).len() == 3));
        assert_eq!(cm.distance(0, 3), Some(1));
    }

    #[test]
    fn test_serde_recomputes_paths() {
        let cm = CouplingMap::linear(4);
        let json = serde_json::to_string(&cm).unwrap();
        let back: CouplingMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back.edges(), cm.edges());
        assert_eq!(back.shortest_path(0, 3), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_basis_gates() {
        let basis = BasisGates::rz_sx_cx();
        assert!(basis.contains("cx"));
        assert!(!basis.contains("h"));
        assert_eq!(BasisGates::u_cx().gates(), ["u", "cx"]);
    }
}
