use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic ID generator shared across all entity types.
/// Guarantees globally unique IDs — no two objects of any type share an ID.
#[derive(Debug)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn starting_from(start: u64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare a typed entity id wrapping the shared `u64` id space.
///
/// The wrappers prevent handing a town id to a resident lookup while keeping
/// the underlying ids globally unique and stable across snapshots.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Stable id of a [`Resident`](crate::model::Resident).
    ResidentId
);
entity_id!(
    /// Stable id of a [`Town`](crate::model::Town).
    TownId
);
entity_id!(
    /// Stable id of a [`Nation`](crate::model::Nation).
    NationId
);
entity_id!(
    /// Stable id of a [`Plot`](crate::model::Plot).
    PlotId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids() {
        let mut id_gen = IdGenerator::new();
        assert_eq!(id_gen.next_id(), 1);
        assert_eq!(id_gen.next_id(), 2);
        assert_eq!(id_gen.next_id(), 3);
    }

    #[test]
    fn starting_from() {
        let mut id_gen = IdGenerator::starting_from(100);
        assert_eq!(id_gen.next_id(), 100);
        assert_eq!(id_gen.next_id(), 101);
    }

    #[test]
    fn typed_ids_display_raw_value() {
        assert_eq!(ResidentId(7).to_string(), "7");
        assert_eq!(PlotId(42).to_string(), "42");
    }

    #[test]
    fn typed_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&TownId(3)).unwrap(), "3");
        let back: NationId = serde_json::from_str("9").unwrap();
        assert_eq!(back, NationId(9));
    }
}
