//! Access resolution: combines the relation classifier with a plot's
//! permission groups and the server-wide fallback for unclaimed land.
//!
//! Every function here is a bounded pure computation over a shared world
//! snapshot — no I/O, no interior mutability — so the host may call it from
//! concurrent event dispatch without coordination.

use crate::error::TownsError;
use crate::geometry::WorldPoint;
use crate::id::{PlotId, ResidentId};
use crate::model::{Capability, Plot, Resident, World};
use crate::relation::classify;

/// Server-wide default permission check, supplied by the hosting
/// authorization layer. Consulted only for plots with neither a personal
/// owner nor an owning town.
pub trait ServerDefaults {
    fn default_allows(&self, capability: &Capability) -> bool;
}

/// Spatial index collaborator mapping a world point to the plot covering
/// it. This crate defines the containment math (`PlotBounds::contains`),
/// not the index.
pub trait PlotLookup {
    fn find_plot_containing(&self, point: WorldPoint) -> Option<PlotId>;
}

/// Outcome of an access check, consumed by a world-interaction event
/// handler to permit or cancel the triggering action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allow
    }

    fn from_allowed(allowed: bool) -> Self {
        if allowed {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }
}

/// Whether `actor` may exercise `capability` on `plot`.
///
/// A plot with neither owner nor town imposes no restriction of its own and
/// defers to the server defaults. Otherwise the actor is classified and the
/// matching permission group is consulted, with the owner bypassing groups
/// entirely.
pub fn is_permitted(
    world: &World,
    defaults: &dyn ServerDefaults,
    actor: &Resident,
    plot: &Plot,
    capability: &Capability,
) -> bool {
    if plot.owner.is_none() && plot.town.is_none() {
        let allowed = defaults.default_allows(capability);
        tracing::debug!(
            "plot {} has no owner or town, server default {} {capability}",
            plot.id,
            if allowed { "allows" } else { "denies" },
        );
        return allowed;
    }

    match classify(world, actor, plot).permission_group() {
        None => true, // owner bypass
        Some(kind) => plot.permissions.contains(kind, capability),
    }
}

/// Id-resolving wrapper around [`is_permitted`].
///
/// # Panics
/// Panics if `actor` is not in the arena — residents are registered on
/// first observed presence and removed only explicitly, so an unknown
/// actor id is a caller bug, not a recoverable state.
pub fn check_access(
    world: &World,
    defaults: &dyn ServerDefaults,
    actor: ResidentId,
    plot: PlotId,
    capability: &Capability,
) -> Result<bool, TownsError> {
    let plot = world.plots.get(&plot).ok_or(TownsError::PlotNotFound(plot))?;
    Ok(is_permitted(
        world,
        defaults,
        world.resident(actor),
        plot,
        capability,
    ))
}

/// Decide whether a world-interaction event at `point` should proceed.
///
/// Returns `NoPlotAt` when no plot covers the point; the caller applies its
/// own wilderness rules in that case. The host cancels the triggering event
/// on [`AccessDecision::Deny`].
///
/// # Panics
/// Panics if `actor` is not in the arena (see [`check_access`]).
pub fn decide_at(
    world: &World,
    defaults: &dyn ServerDefaults,
    lookup: &dyn PlotLookup,
    actor: ResidentId,
    point: WorldPoint,
    capability: &Capability,
) -> Result<AccessDecision, TownsError> {
    let plot = lookup
        .find_plot_containing(point)
        .ok_or(TownsError::NoPlotAt(point))?;
    let allowed = check_access(world, defaults, actor, plot, capability)?;
    Ok(AccessDecision::from_allowed(allowed))
}

/// Detect a plot border crossing for movement events.
///
/// Some only when `to` lies inside a plot and `from` does not; movement
/// within a plot, between two adjacent plots, or out of a plot reports
/// nothing. Used by the host to announce the town being entered.
pub fn entered_plot(
    lookup: &dyn PlotLookup,
    from: WorldPoint,
    to: WorldPoint,
) -> Option<PlotId> {
    let destination = lookup.find_plot_containing(to)?;
    if lookup.find_plot_containing(from).is_some() {
        return None;
    }
    Some(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlotBounds;
    use crate::permission::GroupKind;

    /// Allows exactly the capabilities it was built with.
    struct Defaults(Vec<Capability>);

    impl ServerDefaults for Defaults {
        fn default_allows(&self, capability: &Capability) -> bool {
            self.0.contains(capability)
        }
    }

    /// Brute-force lookup over the world's plots.
    struct ScanLookup<'a>(&'a World);

    impl PlotLookup for ScanLookup<'_> {
        fn find_plot_containing(&self, point: WorldPoint) -> Option<PlotId> {
            self.0
                .plots
                .values()
                .find(|plot| plot.bounds.contains(point))
                .map(|plot| plot.id)
        }
    }

    fn cap(id: &str) -> Capability {
        Capability::new(id)
    }

    fn bounds_at(x: i32, z: i32) -> PlotBounds {
        PlotBounds::new(WorldPoint::new(x, z), WorldPoint::new(x + 15, z + 15))
    }

    #[test]
    fn owner_is_always_permitted() {
        let mut world = World::new();
        let owner = world.add_resident("Aldric");
        let plot = world.claim_plot("Homestead", bounds_at(0, 0), None);
        world.set_plot_owner(plot, Some(owner)).unwrap();

        let defaults = Defaults(vec![]);
        assert!(check_access(&world, &defaults, owner, plot, &cap("build")).unwrap());
        assert!(check_access(&world, &defaults, owner, plot, &cap("anything")).unwrap());
    }

    #[test]
    fn fully_unclaimed_plot_defers_to_server_defaults() {
        let mut world = World::new();
        let actor = world.add_resident("Berta");
        let plot = world.claim_plot("Wilds", bounds_at(0, 0), None);

        let defaults = Defaults(vec![cap("build")]);
        assert!(check_access(&world, &defaults, actor, plot, &cap("build")).unwrap());
        assert!(!check_access(&world, &defaults, actor, plot, &cap("destroy")).unwrap());
    }

    #[test]
    fn town_plot_without_owner_does_not_use_defaults() {
        let mut world = World::new();
        let town = world.add_town("Ironhold");
        let actor = world.add_resident("Berta");
        let plot = world.claim_plot("Commons", bounds_at(0, 0), Some(town));

        // Defaults would allow, but the plot is town property with an empty
        // neutral group, so the outsider is denied.
        let defaults = Defaults(vec![cap("build")]);
        assert!(!check_access(&world, &defaults, actor, plot, &cap("build")).unwrap());
    }

    #[test]
    fn group_membership_grants_access() {
        let mut world = World::new();
        let town = world.add_town("Ironhold");
        let member = world.add_resident("Berta");
        world.join_town(member, town);
        let plot = world.claim_plot("Market Row", bounds_at(0, 0), Some(town));
        world
            .add_plot_permission(plot, GroupKind::Town, cap("build"))
            .unwrap();

        let defaults = Defaults(vec![]);
        assert!(check_access(&world, &defaults, member, plot, &cap("build")).unwrap());
        assert!(!check_access(&world, &defaults, member, plot, &cap("destroy")).unwrap());
    }

    #[test]
    fn check_access_on_unknown_plot() {
        let mut world = World::new();
        let actor = world.add_resident("Berta");
        let defaults = Defaults(vec![]);
        assert_eq!(
            check_access(&world, &defaults, actor, PlotId(999), &cap("build")),
            Err(TownsError::PlotNotFound(PlotId(999)))
        );
    }

    #[test]
    fn decide_at_resolves_through_the_lookup() {
        let mut world = World::new();
        let owner = world.add_resident("Aldric");
        let plot = world.claim_plot("Homestead", bounds_at(0, 0), None);
        world.set_plot_owner(plot, Some(owner)).unwrap();

        let defaults = Defaults(vec![]);
        let decision = decide_at(
            &world,
            &defaults,
            &ScanLookup(&world),
            owner,
            WorldPoint::new(3, 3),
            &cap("build"),
        )
        .unwrap();
        assert_eq!(decision, AccessDecision::Allow);
        assert!(decision.is_allowed());
    }

    #[test]
    fn decide_at_denies_outsiders() {
        let mut world = World::new();
        let owner = world.add_resident("Aldric");
        let stranger = world.add_resident("Berta");
        let plot = world.claim_plot("Homestead", bounds_at(0, 0), None);
        world.set_plot_owner(plot, Some(owner)).unwrap();

        let defaults = Defaults(vec![]);
        let decision = decide_at(
            &world,
            &defaults,
            &ScanLookup(&world),
            stranger,
            WorldPoint::new(3, 3),
            &cap("build"),
        )
        .unwrap();
        assert_eq!(decision, AccessDecision::Deny);
    }

    #[test]
    fn decide_at_surfaces_missing_plot() {
        let mut world = World::new();
        let actor = world.add_resident("Berta");
        let defaults = Defaults(vec![]);
        let err = decide_at(
            &world,
            &defaults,
            &ScanLookup(&world),
            actor,
            WorldPoint::new(500, 500),
            &cap("build"),
        )
        .unwrap_err();
        assert_eq!(err, TownsError::NoPlotAt(WorldPoint::new(500, 500)));
    }

    #[test]
    fn entered_plot_fires_only_from_outside() {
        let mut world = World::new();
        let plot = world.claim_plot("Homestead", bounds_at(0, 0), None);
        let other = world.claim_plot("Neighbor", bounds_at(16, 0), None);
        let lookup = ScanLookup(&world);

        // outside → inside
        assert_eq!(
            entered_plot(&lookup, WorldPoint::new(-5, -5), WorldPoint::new(2, 2)),
            Some(plot)
        );
        // inside → inside (same plot)
        assert_eq!(
            entered_plot(&lookup, WorldPoint::new(1, 1), WorldPoint::new(2, 2)),
            None
        );
        // plot → adjacent plot
        assert_eq!(
            lookup.find_plot_containing(WorldPoint::new(16, 0)),
            Some(other)
        );
        assert_eq!(
            entered_plot(&lookup, WorldPoint::new(15, 0), WorldPoint::new(16, 0)),
            None
        );
        // inside → outside
        assert_eq!(
            entered_plot(&lookup, WorldPoint::new(2, 2), WorldPoint::new(-5, -5)),
            None
        );
    }
}
