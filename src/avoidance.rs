use crate::arena::{Arena, Entity, Instance, ItemKind};
use crate::constants::{ARENA_SIZE, DEFAULT_REWARD};
use crate::obstacles::{
    add_bad_goals, add_center_blocking_wall, add_clutter, add_goal_in_tunnel, add_goal_on_box,
    add_goal_on_platform, add_random_agent, add_random_box, add_random_wooden_object,
    add_simple_goal,
};
use crate::placement::{place_with_retry, PlacementError};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Flat hazard zone. Size and heading are drawn once; only the position is
/// resampled on rejection, and it stays `1.2 x` the larger extent away from
/// the field edge.
pub(crate) fn add_zone(
    rng: &mut StdRng,
    arena: &mut Arena,
    kinds: &[ItemKind],
) -> Result<(f32, f32), PlacementError> {
    let kind = *kinds.choose(rng).unwrap();
    let size = Vector3::new(
        rng.gen_range(2..10) as f32,
        rng.gen_range(2..10) as f32,
        rng.gen_range(2..10) as f32,
    );
    let rotation = rng.gen_range(0..360) as f32;
    let border = size.x.max(size.z) * 1.2;
    let zone = place_with_retry(rng, &arena.entities, |rng| {
        let x = rng.gen_range(border..ARENA_SIZE - border);
        let z = rng.gen_range(border..ARENA_SIZE - border);
        Entity::single(kind, Instance::at(x, z).sized(size).rotated(rotation))
    })?;
    let center = zone.instances[0].position.unwrap();
    arena.push(zone);
    Ok((center.x, center.z))
}

pub(crate) fn add_zones(
    rng: &mut StdRng,
    arena: &mut Arena,
    count: u32,
) -> Result<(), PlacementError> {
    for _ in 0..count {
        add_zone(rng, arena, &[ItemKind::DeathZone, ItemKind::HotZone])?;
    }
    Ok(())
}

/// Hot zone with a reward floating over its center; touching the zone stings
/// but does not end the episode.
pub(crate) fn add_goal_above_hot_zone(
    rng: &mut StdRng,
    arena: &mut Arena,
) -> Result<(), PlacementError> {
    let (x, z) = add_zone(rng, arena, &[ItemKind::HotZone])?;
    arena.push(Entity::single(
        ItemKind::GoodGoalMulti,
        Instance::at(x, z).cube(1.0),
    ));
    Ok(())
}

/// Hazard zones mixed with rewards, clutter and hazard spheres.
pub fn hazards_and_obstacles(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    for _ in 0..2 {
        match rng.gen_range(0..5) {
            0 => add_goal_on_platform(rng, &mut arena, false)?,
            1 => add_goal_on_box(rng, &mut arena)?,
            2 => add_goal_in_tunnel(rng, &mut arena)?,
            3 => add_goal_above_hot_zone(rng, &mut arena)?,
            _ => add_simple_goal(rng, &mut arena)?,
        }
    }
    if rng.gen_bool(0.2) {
        add_goal_on_platform(rng, &mut arena, true)?;
    }
    let zones = rng.gen_range(2..5);
    add_zones(rng, &mut arena, zones)?;
    add_random_agent(rng, &mut arena)?;
    let clutter = rng.gen_range(5..10);
    add_clutter(rng, &mut arena, clutter);
    let hazards = rng.gen_range(2..7);
    add_bad_goals(rng, &mut arena, hazards)?;
    Ok(arena)
}

/// The center-blocking feature re-tagged as a death zone, so the direct path
/// between rewards crosses lethal ground.
pub fn center_blocked(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    add_center_blocking_wall(rng, &mut arena);
    for entity in arena.entities.iter_mut() {
        entity.kind = ItemKind::DeathZone;
        entity.tint = None;
    }
    add_random_agent(rng, &mut arena)?;
    for _ in 0..DEFAULT_REWARD as u32 {
        add_simple_goal(rng, &mut arena)?;
    }
    let hazards = rng.gen_range(2..7);
    add_bad_goals(rng, &mut arena, hazards)?;
    let boxes = rng.gen_range(2..6);
    for _ in 0..boxes {
        add_random_box(rng, &mut arena);
    }
    if rng.gen_bool(0.5) {
        add_random_wooden_object(rng, &mut arena);
    }
    Ok(arena)
}
