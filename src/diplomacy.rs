//! Read-side queries over the relationship graph: nation ↔ nation
//! ally/enemy edges and the membership chain resident → town → nation.
//!
//! Edits to these relations live on the `World` mutation API; everything
//! here takes a shared world and touches nothing.

use crate::id::{NationId, ResidentId, TownId};
use crate::model::{Nation, Town, World};

/// True iff `b` is in `a`'s ally set. Directional: says nothing about
/// `is_ally(world, b, a)`.
pub fn is_ally(world: &World, a: NationId, b: NationId) -> bool {
    world.nations.get(&a).is_some_and(|n| n.allies.contains(&b))
}

/// True iff `b` is in `a`'s enemy set. Directional, like [`is_ally`].
pub fn is_enemy(world: &World, a: NationId, b: NationId) -> bool {
    world
        .nations
        .get(&a)
        .is_some_and(|n| n.enemies.contains(&b))
}

/// The town a resident belongs to, if any.
pub fn town_of(world: &World, resident: ResidentId) -> Option<&Town> {
    let town = world.residents.get(&resident)?.town?;
    world.towns.get(&town)
}

/// The nation a town belongs to, if any.
pub fn nation_of(world: &World, town: TownId) -> Option<&Nation> {
    let nation = world.towns.get(&town)?.nation?;
    world.nations.get(&nation)
}

/// The nation a resident belongs to through their town, if any.
pub fn nation_of_resident(world: &World, resident: ResidentId) -> Option<&Nation> {
    let town = world.residents.get(&resident)?.town?;
    nation_of(world, town)
}
