use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::{NationId, ResidentId, TownId};

/// An aggregation of towns under one banner, with a capital, an optional
/// leader, and its own view of foreign relations.
///
/// The ally and enemy sets are DIRECTED: this nation listing another says
/// nothing about the reverse edge. Access resolution always reads the
/// plot-owning nation's sets, so asymmetric diplomacy is observable and is
/// kept as-is rather than symmetrized.
///
/// Invariants, upheld by the `World` mutation API: a nation never lists
/// itself, and never lists the same nation as both ally and enemy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Nation {
    pub id: NationId,
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub leader: Option<ResidentId>,

    pub capital: TownId,

    /// Kept consistent with `Town::nation` by the `World` mutation API.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub towns: BTreeSet<TownId>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub allies: BTreeSet<NationId>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub enemies: BTreeSet<NationId>,
}
