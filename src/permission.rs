use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::TownsError;
use crate::model::Capability;
use crate::model::macros::string_enum;

/// The five permission groups attached to a plot, selected by relation class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GroupKind {
    Friend,
    Town,
    Ally,
    Enemy,
    Neutral,
}

string_enum!(GroupKind {
    Friend => "friend",
    Town => "town",
    Ally => "ally",
    Enemy => "enemy",
    Neutral => "neutral",
});

impl GroupKind {
    /// All groups in reporting order.
    pub const ALL: [GroupKind; 5] = [
        GroupKind::Friend,
        GroupKind::Town,
        GroupKind::Ally,
        GroupKind::Enemy,
        GroupKind::Neutral,
    ];
}

/// Per-plot capability sets, one per [`GroupKind`].
///
/// Mutation is explicit: `add` rejects a capability already present rather
/// than deduplicating, and `remove` rejects an absent one, so callers always
/// learn whether they changed anything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionGroups {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    friend: BTreeSet<Capability>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    town: BTreeSet<Capability>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    ally: BTreeSet<Capability>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    enemy: BTreeSet<Capability>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    neutral: BTreeSet<Capability>,
}

impl PermissionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    fn group(&self, kind: GroupKind) -> &BTreeSet<Capability> {
        match kind {
            GroupKind::Friend => &self.friend,
            GroupKind::Town => &self.town,
            GroupKind::Ally => &self.ally,
            GroupKind::Enemy => &self.enemy,
            GroupKind::Neutral => &self.neutral,
        }
    }

    fn group_mut(&mut self, kind: GroupKind) -> &mut BTreeSet<Capability> {
        match kind {
            GroupKind::Friend => &mut self.friend,
            GroupKind::Town => &mut self.town,
            GroupKind::Ally => &mut self.ally,
            GroupKind::Enemy => &mut self.enemy,
            GroupKind::Neutral => &mut self.neutral,
        }
    }

    /// Grant `capability` to the group. Fails with `DuplicatePermission` if
    /// the group already holds it.
    pub fn add(&mut self, kind: GroupKind, capability: Capability) -> Result<(), TownsError> {
        if self.group(kind).contains(&capability) {
            return Err(TownsError::DuplicatePermission { kind, capability });
        }
        self.group_mut(kind).insert(capability);
        Ok(())
    }

    /// Revoke `capability` from the group. Fails with `PermissionNotFound`
    /// if the group does not hold it.
    pub fn remove(&mut self, kind: GroupKind, capability: &Capability) -> Result<(), TownsError> {
        if !self.group_mut(kind).remove(capability) {
            return Err(TownsError::PermissionNotFound {
                kind,
                capability: capability.clone(),
            });
        }
        Ok(())
    }

    pub fn contains(&self, kind: GroupKind, capability: &Capability) -> bool {
        self.group(kind).contains(capability)
    }

    /// Every group granting `capability`, in [`GroupKind::ALL`] order.
    pub fn groups_containing(&self, capability: &Capability) -> Vec<GroupKind> {
        GroupKind::ALL
            .into_iter()
            .filter(|kind| self.group(*kind).contains(capability))
            .collect()
    }

    /// Every capability granted by any group, deduplicated and ordered.
    pub fn capabilities(&self) -> BTreeSet<&Capability> {
        GroupKind::ALL
            .into_iter()
            .flat_map(|kind| self.group(kind).iter())
            .collect()
    }

    /// Inspection view over all five groups at once: each granted capability
    /// with the groups granting it.
    pub fn summary(&self) -> Vec<(Capability, Vec<GroupKind>)> {
        self.capabilities()
            .into_iter()
            .map(|cap| (cap.clone(), self.groups_containing(cap)))
            .collect()
    }
}
