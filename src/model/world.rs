use std::collections::BTreeMap;

use crate::error::TownsError;
use crate::geometry::PlotBounds;
use crate::id::{IdGenerator, NationId, PlotId, ResidentId, TownId};
use crate::permission::{GroupKind, PermissionGroups};
use crate::ranks::{GovernanceAction, RankConfig, RankId};

use super::capability::Capability;
use super::nation::Nation;
use super::plot::Plot;
use super::resident::Resident;
use super::town::Town;

/// Arena of all governance entities, addressed by stable ids.
///
/// Entities hold forward references only (resident → town id, town → nation
/// id); the reverse registries (`Town::residents`, `Nation::towns`,
/// `Town::plots`) are maintained by the mutation methods here. Storage
/// enforces none of this.
///
/// Reads never mutate, so shared references are safe to use from concurrent
/// callers. Mutations require `&mut World`; serializing them per entity is
/// the integration boundary's job.
#[derive(Debug)]
pub struct World {
    pub residents: BTreeMap<ResidentId, Resident>,
    pub towns: BTreeMap<TownId, Town>,
    pub nations: BTreeMap<NationId, Nation>,
    pub plots: BTreeMap<PlotId, Plot>,
    pub id_gen: IdGenerator,
}

impl World {
    pub fn new() -> Self {
        Self {
            residents: BTreeMap::new(),
            towns: BTreeMap::new(),
            nations: BTreeMap::new(),
            plots: BTreeMap::new(),
            id_gen: IdGenerator::new(),
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// # Panics
    /// Panics if the id is not in the arena.
    pub fn resident(&self, id: ResidentId) -> &Resident {
        self.residents
            .get(&id)
            .unwrap_or_else(|| panic!("resident {id} not found"))
    }

    /// # Panics
    /// Panics if the id is not in the arena.
    pub fn town(&self, id: TownId) -> &Town {
        self.towns
            .get(&id)
            .unwrap_or_else(|| panic!("town {id} not found"))
    }

    /// # Panics
    /// Panics if the id is not in the arena.
    pub fn nation(&self, id: NationId) -> &Nation {
        self.nations
            .get(&id)
            .unwrap_or_else(|| panic!("nation {id} not found"))
    }

    /// # Panics
    /// Panics if the id is not in the arena.
    pub fn plot(&self, id: PlotId) -> &Plot {
        self.plots
            .get(&id)
            .unwrap_or_else(|| panic!("plot {id} not found"))
    }

    fn resident_mut(&mut self, id: ResidentId) -> &mut Resident {
        self.residents
            .get_mut(&id)
            .unwrap_or_else(|| panic!("resident {id} not found"))
    }

    fn town_mut(&mut self, id: TownId) -> &mut Town {
        self.towns
            .get_mut(&id)
            .unwrap_or_else(|| panic!("town {id} not found"))
    }

    fn nation_mut(&mut self, id: NationId) -> &mut Nation {
        self.nations
            .get_mut(&id)
            .unwrap_or_else(|| panic!("nation {id} not found"))
    }

    // -----------------------------------------------------------------
    // Entity creation
    // -----------------------------------------------------------------

    /// Register a resident on first observed presence. Returns the assigned ID.
    pub fn add_resident(&mut self, name: impl Into<String>) -> ResidentId {
        let id = ResidentId(self.id_gen.next_id());
        self.residents.insert(
            id,
            Resident {
                id,
                name: name.into(),
                town: None,
                friends: Default::default(),
                town_rank: None,
                nation_rank: None,
            },
        );
        id
    }

    /// Found a town with no members. Returns the assigned ID.
    pub fn add_town(&mut self, name: impl Into<String>) -> TownId {
        let id = TownId(self.id_gen.next_id());
        self.towns.insert(
            id,
            Town {
                id,
                name: name.into(),
                nation: None,
                residents: Default::default(),
                plots: Default::default(),
            },
        );
        id
    }

    /// Found a nation with `capital` as its first member town.
    /// Returns the assigned ID.
    ///
    /// # Panics
    /// Panics if `capital` does not exist or already belongs to a nation.
    pub fn add_nation(&mut self, name: impl Into<String>, capital: TownId) -> NationId {
        assert!(
            self.town(capital).nation.is_none(),
            "add_nation: capital town {capital} already belongs to a nation"
        );
        let id = NationId(self.id_gen.next_id());
        self.nations.insert(
            id,
            Nation {
                id,
                name: name.into(),
                description: String::new(),
                leader: None,
                capital,
                towns: [capital].into(),
                allies: Default::default(),
                enemies: Default::default(),
            },
        );
        self.town_mut(capital).nation = Some(id);
        id
    }

    /// # Panics
    /// Panics if either id is unknown.
    pub fn set_nation_leader(&mut self, nation: NationId, leader: ResidentId) {
        assert!(
            self.residents.contains_key(&leader),
            "set_nation_leader: resident {leader} not found"
        );
        self.nation_mut(nation).leader = Some(leader);
    }

    // -----------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------

    /// Move a resident into a town, keeping `Resident::town` and
    /// `Town::residents` in sync.
    ///
    /// # Panics
    /// Panics if either id is unknown or the resident already has a town.
    pub fn join_town(&mut self, resident: ResidentId, town: TownId) {
        assert!(
            self.towns.contains_key(&town),
            "join_town: town {town} not found"
        );
        let res = self.resident_mut(resident);
        assert!(
            res.town.is_none(),
            "join_town: resident {resident} already belongs to a town"
        );
        res.town = Some(town);
        self.town_mut(town).residents.insert(resident);
    }

    /// Remove a resident from their town, clearing both ranks.
    ///
    /// # Panics
    /// Panics if the id is unknown or the resident has no town.
    pub fn leave_town(&mut self, resident: ResidentId) {
        let res = self.resident_mut(resident);
        let town = res
            .town
            .take()
            .unwrap_or_else(|| panic!("leave_town: resident {resident} has no town"));
        res.town_rank = None;
        res.nation_rank = None;
        self.town_mut(town).residents.remove(&resident);
    }

    /// Attach a town to a nation, keeping `Town::nation` and `Nation::towns`
    /// in sync.
    ///
    /// # Panics
    /// Panics if either id is unknown or the town already has a nation.
    pub fn join_nation(&mut self, town: TownId, nation: NationId) {
        assert!(
            self.nations.contains_key(&nation),
            "join_nation: nation {nation} not found"
        );
        let t = self.town_mut(town);
        assert!(
            t.nation.is_none(),
            "join_nation: town {town} already belongs to a nation"
        );
        t.nation = Some(nation);
        self.nation_mut(nation).towns.insert(town);
    }

    /// Detach a town from its nation.
    ///
    /// # Panics
    /// Panics if the id is unknown, the town has no nation, or the town is
    /// the nation's capital.
    pub fn leave_nation(&mut self, town: TownId) {
        let nation = self
            .town(town)
            .nation
            .unwrap_or_else(|| panic!("leave_nation: town {town} has no nation"));
        assert!(
            self.nation(nation).capital != town,
            "leave_nation: town {town} is the capital of nation {nation}"
        );
        self.town_mut(town).nation = None;
        self.nation_mut(nation).towns.remove(&town);
    }

    /// Record `friend` in `resident`'s friend set. Directed — no reverse
    /// edge is created.
    ///
    /// # Panics
    /// Panics on a self-edge, an unknown id, or an existing friendship.
    pub fn add_friend(&mut self, resident: ResidentId, friend: ResidentId) {
        assert!(
            resident != friend,
            "add_friend: resident {resident} cannot befriend themselves"
        );
        assert!(
            self.residents.contains_key(&friend),
            "add_friend: resident {friend} not found"
        );
        let inserted = self.resident_mut(resident).friends.insert(friend);
        assert!(
            inserted,
            "add_friend: resident {friend} is already a friend of {resident}"
        );
    }

    /// # Panics
    /// Panics if the id is unknown or the friendship does not exist.
    pub fn remove_friend(&mut self, resident: ResidentId, friend: ResidentId) {
        let removed = self.resident_mut(resident).friends.remove(&friend);
        assert!(
            removed,
            "remove_friend: resident {friend} is not a friend of {resident}"
        );
    }

    // -----------------------------------------------------------------
    // Diplomacy edits
    // -----------------------------------------------------------------

    /// Record `target` as an ally of `nation`. Directed — no reverse edge
    /// is created, and none is implied.
    ///
    /// # Panics
    /// Panics on a self-edge, an unknown id, an existing ally edge, or a
    /// target already listed as an enemy.
    pub fn add_ally(&mut self, nation: NationId, target: NationId) {
        assert!(
            nation != target,
            "add_ally: nation {nation} cannot ally itself"
        );
        assert!(
            self.nations.contains_key(&target),
            "add_ally: nation {target} not found"
        );
        let n = self.nation_mut(nation);
        assert!(
            !n.enemies.contains(&target),
            "add_ally: nation {target} is listed as an enemy of {nation}"
        );
        let inserted = n.allies.insert(target);
        assert!(
            inserted,
            "add_ally: nation {target} is already an ally of {nation}"
        );
    }

    /// # Panics
    /// Panics if the id is unknown or the ally edge does not exist.
    pub fn remove_ally(&mut self, nation: NationId, target: NationId) {
        let removed = self.nation_mut(nation).allies.remove(&target);
        assert!(
            removed,
            "remove_ally: nation {target} is not an ally of {nation}"
        );
    }

    /// Record `target` as an enemy of `nation`. Directed, like [`add_ally`].
    ///
    /// # Panics
    /// Panics on a self-edge, an unknown id, an existing enemy edge, or a
    /// target already listed as an ally.
    ///
    /// [`add_ally`]: World::add_ally
    pub fn add_enemy(&mut self, nation: NationId, target: NationId) {
        assert!(
            nation != target,
            "add_enemy: nation {nation} cannot be its own enemy"
        );
        assert!(
            self.nations.contains_key(&target),
            "add_enemy: nation {target} not found"
        );
        let n = self.nation_mut(nation);
        assert!(
            !n.allies.contains(&target),
            "add_enemy: nation {target} is listed as an ally of {nation}"
        );
        let inserted = n.enemies.insert(target);
        assert!(
            inserted,
            "add_enemy: nation {target} is already an enemy of {nation}"
        );
    }

    /// # Panics
    /// Panics if the id is unknown or the enemy edge does not exist.
    pub fn remove_enemy(&mut self, nation: NationId, target: NationId) {
        let removed = self.nation_mut(nation).enemies.remove(&target);
        assert!(
            removed,
            "remove_enemy: nation {target} is not an enemy of {nation}"
        );
    }

    // -----------------------------------------------------------------
    // Plots
    // -----------------------------------------------------------------

    /// Claim a plot, optionally as town property. Returns the assigned ID.
    ///
    /// # Panics
    /// Panics if `town` is given and unknown.
    pub fn claim_plot(
        &mut self,
        name: impl Into<String>,
        bounds: PlotBounds,
        town: Option<TownId>,
    ) -> PlotId {
        if let Some(town) = town {
            assert!(
                self.towns.contains_key(&town),
                "claim_plot: town {town} not found"
            );
        }
        let id = PlotId(self.id_gen.next_id());
        self.plots.insert(
            id,
            Plot {
                id,
                name: name.into(),
                owner: None,
                town,
                bounds,
                permissions: PermissionGroups::new(),
            },
        );
        if let Some(town) = town {
            self.town_mut(town).plots.insert(id);
        }
        id
    }

    /// Destroy a plot, detaching it from its owning town.
    pub fn unclaim_plot(&mut self, plot: PlotId) -> Result<(), TownsError> {
        let removed = self
            .plots
            .remove(&plot)
            .ok_or(TownsError::PlotNotFound(plot))?;
        if let Some(town) = removed.town {
            self.town_mut(town).plots.remove(&plot);
        }
        Ok(())
    }

    /// Grant the plot to a new personal owner (or clear it with `None`).
    ///
    /// # Panics
    /// Panics if `owner` is given and unknown.
    pub fn set_plot_owner(
        &mut self,
        plot: PlotId,
        owner: Option<ResidentId>,
    ) -> Result<(), TownsError> {
        if let Some(owner) = owner {
            assert!(
                self.residents.contains_key(&owner),
                "set_plot_owner: resident {owner} not found"
            );
        }
        self.plots
            .get_mut(&plot)
            .ok_or(TownsError::PlotNotFound(plot))?
            .owner = owner;
        Ok(())
    }

    /// Check that `actor` is the personal owner of `plot`.
    pub fn verify_plot_ownership(
        &self,
        plot: PlotId,
        actor: ResidentId,
    ) -> Result<(), TownsError> {
        let p = self.plots.get(&plot).ok_or(TownsError::PlotNotFound(plot))?;
        match p.owner {
            None => Err(TownsError::MissingOwner(plot)),
            Some(owner) if owner != actor => Err(TownsError::NotOwner {
                plot,
                resident: actor,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Grant `capability` to one of the plot's permission groups.
    pub fn add_plot_permission(
        &mut self,
        plot: PlotId,
        kind: GroupKind,
        capability: Capability,
    ) -> Result<(), TownsError> {
        self.plots
            .get_mut(&plot)
            .ok_or(TownsError::PlotNotFound(plot))?
            .permissions
            .add(kind, capability.clone())?;
        tracing::debug!("granted {capability} to the {kind} group of plot {plot}");
        Ok(())
    }

    /// Revoke `capability` from one of the plot's permission groups.
    pub fn remove_plot_permission(
        &mut self,
        plot: PlotId,
        kind: GroupKind,
        capability: &Capability,
    ) -> Result<(), TownsError> {
        self.plots
            .get_mut(&plot)
            .ok_or(TownsError::PlotNotFound(plot))?
            .permissions
            .remove(kind, capability)?;
        tracing::debug!("revoked {capability} from the {kind} group of plot {plot}");
        Ok(())
    }

    /// Owner-gated permission grant: `actor` must own the plot.
    pub fn add_plot_permission_by(
        &mut self,
        actor: ResidentId,
        plot: PlotId,
        kind: GroupKind,
        capability: Capability,
    ) -> Result<(), TownsError> {
        self.verify_plot_ownership(plot, actor)?;
        self.add_plot_permission(plot, kind, capability)
    }

    /// Owner-gated permission revocation: `actor` must own the plot.
    pub fn remove_plot_permission_by(
        &mut self,
        actor: ResidentId,
        plot: PlotId,
        kind: GroupKind,
        capability: &Capability,
    ) -> Result<(), TownsError> {
        self.verify_plot_ownership(plot, actor)?;
        self.remove_plot_permission(plot, kind, capability)
    }

    /// Rename a plot. Permitted for the plot's personal owner, or for a
    /// member of the plot's town whose town rank grants
    /// [`GovernanceAction::RenamePlot`].
    pub fn rename_plot(
        &mut self,
        ranks: &RankConfig,
        actor: ResidentId,
        plot: PlotId,
        new_name: impl Into<String>,
    ) -> Result<(), TownsError> {
        let p = self.plots.get(&plot).ok_or(TownsError::PlotNotFound(plot))?;
        let allowed = p.is_owner(actor) || {
            let res = self.resident(actor);
            res.town.is_some()
                && res.town == p.town
                && res
                    .town_rank
                    .as_ref()
                    .is_some_and(|rank| ranks.town_allows(rank, &GovernanceAction::RenamePlot))
        };
        if !allowed {
            return Err(TownsError::NotPermitted {
                resident: actor,
                action: GovernanceAction::RenamePlot,
            });
        }
        self.plots
            .get_mut(&plot)
            .ok_or(TownsError::PlotNotFound(plot))?
            .name = new_name.into();
        Ok(())
    }

    /// Inspection view: each capability granted on the plot with the groups
    /// granting it.
    pub fn permission_summary(
        &self,
        plot: PlotId,
    ) -> Result<Vec<(Capability, Vec<GroupKind>)>, TownsError> {
        let p = self.plots.get(&plot).ok_or(TownsError::PlotNotFound(plot))?;
        Ok(p.permissions.summary())
    }

    // -----------------------------------------------------------------
    // Ranks
    // -----------------------------------------------------------------

    /// Assign or clear a resident's town rank. Assigning a rank also applies
    /// the configured default nation rank when the resident's town belongs
    /// to a nation and no nation rank is set yet.
    ///
    /// # Panics
    /// Panics if the resident id is unknown.
    pub fn set_town_rank(
        &mut self,
        ranks: &RankConfig,
        resident: ResidentId,
        rank: Option<RankId>,
    ) {
        let in_nation = self
            .resident(resident)
            .town
            .is_some_and(|town| self.town(town).nation.is_some());
        let default_nation_rank = rank
            .as_ref()
            .filter(|_| in_nation)
            .and_then(|r| ranks.default_nation_rank(r))
            .cloned();
        let res = self.resident_mut(resident);
        res.town_rank = rank;
        if res.nation_rank.is_none() {
            res.nation_rank = default_nation_rank;
        }
    }

    /// # Panics
    /// Panics if the resident id is unknown.
    pub fn set_nation_rank(&mut self, resident: ResidentId, rank: Option<RankId>) {
        self.resident_mut(resident).nation_rank = rank;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
