use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::{ResidentId, TownId};
use crate::ranks::RankId;

/// A tracked player identity. Created on first observed presence, removed
/// only by explicit action.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Resident {
    pub id: ResidentId,
    pub name: String,

    /// Town membership, at most one. Kept consistent with `Town::residents`
    /// by the `World` mutation API.
    pub town: Option<TownId>,

    /// Directed friend set: listing another resident here grants *them* this
    /// resident's friend-group permissions, not the reverse.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub friends: BTreeSet<ResidentId>,

    #[serde(default)]
    pub town_rank: Option<RankId>,

    #[serde(default)]
    pub nation_rank: Option<RankId>,
}

impl Resident {
    /// Whether this resident has listed `other` as a friend.
    pub fn has_friend(&self, other: ResidentId) -> bool {
        self.friends.contains(&other)
    }
}
