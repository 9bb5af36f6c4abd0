//! Relation classification: the single precedence-resolved category
//! describing an actor's relationship to a plot.

use crate::diplomacy::{is_ally, is_enemy, nation_of};
use crate::model::{Plot, Resident, World};
use crate::permission::GroupKind;

/// The outcome of classifying an actor against a plot. Exactly one class
/// applies per check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelationClass {
    /// The plot's personal owner. Bypasses all permission groups.
    Owner,
    /// Listed in the owner's friend set (the owner must have listed the
    /// actor, not the reverse).
    Friend,
    /// Member of the plot's owning town.
    SameTown,
    /// Member of the plot's nation, or of a nation the plot's nation lists
    /// as an ally.
    SameNationOrAlly,
    /// Member of a nation the plot's nation lists as an enemy.
    Enemy,
    /// Everything else.
    Neutral,
}

impl RelationClass {
    /// The permission group consulted for this class, or `None` for the
    /// owner bypass.
    ///
    /// The match is exhaustive with no default arm, so a new relation class
    /// does not compile until it is assigned a group or an explicit bypass.
    pub fn permission_group(self) -> Option<GroupKind> {
        match self {
            RelationClass::Owner => None,
            RelationClass::Friend => Some(GroupKind::Friend),
            RelationClass::SameTown => Some(GroupKind::Town),
            RelationClass::SameNationOrAlly => Some(GroupKind::Ally),
            RelationClass::Enemy => Some(GroupKind::Enemy),
            RelationClass::Neutral => Some(GroupKind::Neutral),
        }
    }
}

/// Classify `actor`'s relation to `plot`. First match wins, in this order:
/// Owner, Friend, SameTown, SameNationOrAlly, Enemy, Neutral.
///
/// The owner tiers (Owner, Friend) resolve against the plot's personal
/// owner; the town tiers against the plot's owning town — a plot can have
/// both, and each is consulted at its own step. All directional checks use
/// the plot-owning side as the source: the owner's friend set, and the
/// plot-owning nation's ally/enemy sets.
pub fn classify(world: &World, actor: &Resident, plot: &Plot) -> RelationClass {
    if plot.owner == Some(actor.id) {
        return RelationClass::Owner;
    }

    if let Some(owner) = plot.owner
        && world
            .residents
            .get(&owner)
            .is_some_and(|o| o.has_friend(actor.id))
    {
        return RelationClass::Friend;
    }

    // A plot with no owning town never matches the town or nation tiers;
    // in particular a townless actor and a townless plot do not match.
    let Some(plot_town) = plot.town else {
        return RelationClass::Neutral;
    };

    if actor.town == Some(plot_town) {
        return RelationClass::SameTown;
    }

    let Some(plot_nation) = nation_of(world, plot_town).map(|n| n.id) else {
        return RelationClass::Neutral;
    };
    let Some(actor_nation) = actor
        .town
        .and_then(|town| nation_of(world, town))
        .map(|n| n.id)
    else {
        return RelationClass::Neutral;
    };

    if actor_nation == plot_nation || is_ally(world, plot_nation, actor_nation) {
        return RelationClass::SameNationOrAlly;
    }

    if is_enemy(world, plot_nation, actor_nation) {
        return RelationClass::Enemy;
    }

    RelationClass::Neutral
}
