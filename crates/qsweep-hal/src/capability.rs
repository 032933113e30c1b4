//! What a backend can run.
//!
//! The transpiler reads the native gates and the coupling topology to decide
//! what to rewrite; backends read qubit and shot limits to reject
//! submissions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend name, as reported by `Backend::name`.
    pub name: String,
    /// Largest circuit width the backend accepts.
    pub num_qubits: u32,
    pub gates: GateSet,
    pub topology: Topology,
    /// Largest shot count per job.
    pub max_shots: u32,
    /// Simulation methods accepted in the backend config, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}

impl Capabilities {
    /// All-to-all simulator accepting every IR gate and any `u32` shot count.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gates: GateSet::universal(),
            topology: Topology::AllToAll,
            max_shots: u32::MAX,
            methods: names(&["automatic", "statevector", "stabilizer"]),
        }
    }

    #[must_use]
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    #[must_use]
    pub fn with_gates(mut self, gates: GateSet) -> Self {
        self.gates = gates;
        self
    }

    /// Whether `method` is one of the advertised simulation methods.
    pub fn supports_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Gates by OpenQASM 3 name.
///
/// An empty `native` list means every supported gate runs as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Gates the backend accepts.
    pub supported: Vec<String>,
    /// Subset that runs without translation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub native: Vec<String>,
}

impl GateSet {
    /// Every gate the qsweep IR can express.
    pub fn universal() -> Self {
        Self {
            supported: names(&[
                "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz",
                "p", "u", "cx", "cy", "cz", "swap", "rzz", "ccx",
            ]),
            native: Vec::new(),
        }
    }

    /// `rz`, `sx`, `x` and `cx`, as on superconducting devices.
    pub fn rz_sx_cx() -> Self {
        let basis = names(&["id", "x", "sx", "rz", "cx"]);
        Self {
            supported: basis.clone(),
            native: basis,
        }
    }

    pub fn supports(&self, gate: &str) -> bool {
        self.supported.iter().any(|g| g == gate)
    }

    /// The restricted basis circuits must be translated into, if there is one.
    pub fn basis(&self) -> Option<&[String]> {
        (!self.native.is_empty()).then_some(self.native.as_slice())
    }
}

fn names(gates: &[&str]) -> Vec<String> {
    gates.iter().map(|g| (*g).to_owned()).collect()
}

/// Which qubit pairs can interact. Edges are undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Every pair of qubits is coupled.
    AllToAll,
    /// Only the listed pairs are coupled.
    Edges(Vec<(u32, u32)>),
}

impl Topology {
    /// Chain `0 - 1 - ... - n-1`.
    pub fn linear(n: u32) -> Self {
        Self::Edges((1..n).map(|i| (i - 1, i)).collect())
    }

    /// Coupling edges, or `None` when every pair is connected.
    pub fn edges(&self) -> Option<&[(u32, u32)]> {
        match self {
            Self::AllToAll => None,
            Self::Edges(edges) => Some(edges),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_is_unconstrained() {
        let caps = Capabilities::simulator(5);
        assert_eq!(caps.topology.edges(), None);
        assert_eq!(caps.max_shots, u32::MAX);
        assert!(caps.gates.basis().is_none());
        assert!(caps.gates.supports("t"));
        assert!(caps.supports_method("stabilizer"));
        assert!(!caps.supports_method("mps"));
    }

    #[test]
    fn test_linear_topology() {
        let topo = Topology::linear(3);
        assert_eq!(topo.edges(), Some(&[(0, 1), (1, 2)][..]));
        assert_eq!(Topology::linear(0).edges(), Some(&[][..]));
    }

    #[test]
    fn test_restricted_basis() {
        let gates = GateSet::rz_sx_cx();
        assert!(gates.basis().is_some_and(|b| b.iter().any(|g| g == "rz")));
        assert!(!gates.supports("h"));
        assert_eq!(gates.basis().map(<[String]>::len), Some(5));
    }
}
