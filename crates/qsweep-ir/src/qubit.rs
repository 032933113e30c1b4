//! Wire identifiers.
//!
//! Qubits and classical bits share one representation, [`Wire`], and differ
//! only in their id type, so they cannot be mixed up in an instruction.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! wire_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }
    };
}

wire_id!(
    /// Position of a qubit in its circuit.
    QubitId,
    "q"
);
wire_id!(
    /// Position of a classical bit in its circuit. Bitstrings put clbit 0 rightmost.
    ClbitId,
    "c"
);

/// A wire and, if it was declared in one, its register slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire<I> {
    pub id: I,
    pub register: Option<String>,
    pub index: Option<u32>,
}

pub type Qubit = Wire<QubitId>;
pub type Clbit = Wire<ClbitId>;

impl<I> Wire<I> {
    pub fn new(id: I) -> Self {
        Self {
            id,
            register: None,
            index: None,
        }
    }

    /// Wire `id` as slot `index` of `register`.
    pub fn in_register(id: I, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some(register.into()),
            index: Some(index),
        }
    }
}

impl<I: fmt::Display> fmt::Display for Wire<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.register, self.index) {
            (Some(reg), Some(idx)) => write!(f, "{reg}[{idx}]"),
            _ => fmt::Display::fmt(&self.id, f),
        }
    }
}
