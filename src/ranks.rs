//! Town and nation rank ladders.
//!
//! Ranks gate administrative actions (renaming plots, inviting residents),
//! which are distinct from the world capabilities held in a plot's
//! permission groups. The ladder is plain configuration handed to the
//! operations that consult it — nothing here is process-wide state.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::macros::string_enum_open;

/// Interned rank identifier, unique within its ladder.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankId(String);

impl RankId {
    /// # Panics
    /// Panics on an empty identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "RankId::new: identifier cannot be empty");
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Administrative action gated by rank.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GovernanceAction {
    RenamePlot,
    GrantPlot,
    ClaimPlot,
    UnclaimPlot,
    InviteResident,
    Custom(String),
}

string_enum_open!(GovernanceAction, "governance action", {
    RenamePlot => "rename_plot",
    GrantPlot => "grant_plot",
    ClaimPlot => "claim_plot",
    UnclaimPlot => "unclaim_plot",
    InviteResident => "invite_resident",
});

/// A single rank on a ladder.
///
/// A rank permits its own actions plus everything its child chain permits,
/// so a ladder only states what each step *adds*.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RankDef {
    pub id: RankId,
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub actions: BTreeSet<GovernanceAction>,

    /// Next rank down the ladder, whose grants are inherited.
    #[serde(default)]
    pub child: Option<RankId>,

    /// Nation rank granted by default to holders of this town rank when
    /// their town belongs to a nation. Meaningful for town ranks only.
    #[serde(default)]
    pub default_nation_rank: Option<RankId>,
}

/// The town and nation rank ladders, passed explicitly to the operations
/// that consult them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RankConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    town_ranks: BTreeMap<RankId, RankDef>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    nation_ranks: BTreeMap<RankId, RankDef>,
}

impl RankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if a town rank with the same id is already configured.
    pub fn add_town_rank(&mut self, def: RankDef) {
        assert!(
            !self.town_ranks.contains_key(&def.id),
            "add_town_rank: duplicate rank id {}",
            def.id
        );
        self.town_ranks.insert(def.id.clone(), def);
    }

    /// # Panics
    /// Panics if a nation rank with the same id is already configured.
    pub fn add_nation_rank(&mut self, def: RankDef) {
        assert!(
            !self.nation_ranks.contains_key(&def.id),
            "add_nation_rank: duplicate rank id {}",
            def.id
        );
        self.nation_ranks.insert(def.id.clone(), def);
    }

    /// Whether the town rank permits `action`, walking the child chain.
    /// Unknown rank ids permit nothing.
    pub fn town_allows(&self, rank: &RankId, action: &GovernanceAction) -> bool {
        Self::ladder_allows(&self.town_ranks, rank, action)
    }

    /// Whether the nation rank permits `action`, walking the child chain.
    /// Unknown rank ids permit nothing.
    pub fn nation_allows(&self, rank: &RankId, action: &GovernanceAction) -> bool {
        Self::ladder_allows(&self.nation_ranks, rank, action)
    }

    /// The nation rank a holder of `town_rank` receives by default.
    pub fn default_nation_rank(&self, town_rank: &RankId) -> Option<&RankId> {
        self.town_ranks
            .get(town_rank)?
            .default_nation_rank
            .as_ref()
    }

    fn ladder_allows(
        ladder: &BTreeMap<RankId, RankDef>,
        rank: &RankId,
        action: &GovernanceAction,
    ) -> bool {
        let mut visited = BTreeSet::new();
        let mut current = Some(rank);
        while let Some(id) = current {
            if !visited.insert(id) {
                // misconfigured cycle in the child chain
                return false;
            }
            let Some(def) = ladder.get(id) else {
                return false;
            };
            if def.actions.contains(action) {
                return true;
            }
            current = def.child.as_ref();
        }
        false
    }
}
