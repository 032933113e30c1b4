//! State that passes hand to each other.

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use qsweep_ir::QubitId;

use crate::target::{BasisGates, CouplingMap};

/// Where each logical qubit currently sits on the device.
///
/// Routing permutes this as it inserts SWAPs, so after compilation it holds
/// the final placement rather than the initial one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Indexed by logical qubit.
    physical: Vec<u32>,
    /// Indexed by physical qubit.
    logical: Vec<Option<QubitId>>,
}

impl Layout {
    /// Logical qubit `i` on physical qubit `i`.
    pub fn trivial(num_qubits: u32) -> Self {
        Self {
            physical: (0..num_qubits).collect(),
            logical: (0..num_qubits).map(|i| Some(QubitId(i))).collect(),
        }
    }

    pub fn physical(&self, logical: QubitId) -> Option<u32> {
        self.physical.get(logical.0 as usize).copied()
    }

    pub fn logical(&self, physical: u32) -> Option<QubitId> {
        self.logical.get(physical as usize).copied().flatten()
    }

    /// Exchange whatever the two physical qubits hold. Either may be idle.
    pub fn swap_physical(&mut self, a: u32, b: u32) {
        let needed = a.max(b) as usize + 1;
        if self.logical.len() < needed {
            self.logical.resize(needed, None);
        }
        self.logical.swap(a as usize, b as usize);
        for p in [a, b] {
            if let Some(q) = self.logical[p as usize] {
                self.physical[q.0 as usize] = p;
            }
        }
    }

    /// Number of logical qubits placed.
    pub fn len(&self) -> usize {
        self.physical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.physical.is_empty()
    }

    /// `(logical, physical)` in logical order.
    pub fn pairs(&self) -> impl Iterator<Item = (QubitId, u32)> + '_ {
        self.physical
            .iter()
            .enumerate()
            .map(|(l, &p)| (QubitId(l as u32), p))
    }
}

/// Shared pass state: the target, the layout once chosen, and any typed
/// values a pass wants to leave for later passes or the caller.
///
/// Typed values are keyed by type, so each type holds at most one value.
#[derive(Debug, Default)]
pub struct PropertySet {
    pub coupling_map: Option<CouplingMap>,
    pub basis_gates: Option<BasisGates>,
    pub layout: Option<Layout>,
    extra: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.extra.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.extra.get(&TypeId::of::<T>())?.downcast_ref()
    }

    pub fn take<T: Any>(&mut self) -> Option<T> {
        let boxed = self.extra.remove(&TypeId::of::<T>())?;
        boxed.downcast().ok().map(|value| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_physical_tracks_both_directions() {
        let mut layout = Layout::trivial(3);
        layout.swap_physical(0, 2);

        assert_eq!(layout.physical(QubitId(0)), Some(2));
        assert_eq!(layout.physical(QubitId(2)), Some(0));
        assert_eq!(layout.logical(0), Some(QubitId(2)));
        assert_eq!(layout.physical(QubitId(1)), Some(1));
    }

    #[test]
    fn test_swap_onto_idle_qubit() {
        let mut layout = Layout::trivial(2);
        layout.swap_physical(1, 3);

        assert_eq!(layout.physical(QubitId(1)), Some(3));
        assert_eq!(layout.logical(1), None);
        assert_eq!(layout.logical(3), Some(QubitId(1)));
        assert_eq!(layout.len(), 2);
        assert_eq!(
            layout.pairs().collect::<Vec<_>>(),
            [(QubitId(0), 0), (QubitId(1), 3)]
        );
    }

    #[test]
    fn test_typed_values() {
        #[derive(Debug, PartialEq)]
        struct Marker(u8);

        let mut props = PropertySet::new();
        props.insert(Marker(7));
        assert_eq!(props.get::<Marker>(), Some(&Marker(7)));
        assert_eq!(props.take::<Marker>(), Some(Marker(7)));
        assert_eq!(props.get::<Marker>(), None);
    }
}
