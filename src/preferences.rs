use crate::arena::{Arena, Entity, Instance, ItemKind};
use crate::constants::{ARENA_SIZE, DEFAULT_REWARD, GRAY, WALL_HEIGHT};
use crate::food::{agent_looking_at_center, goal_ahead_of_agent};
use crate::geometry::angle_looking_at_center;
use crate::placement::{place_with_retry, PlacementError};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::Rng;

/// A big and a small goal ahead of the agent, bearings at least fifteen
/// degrees apart; only one can be eaten before the episode ends.
pub fn sized_choice(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let (agent, x, z, angle) = agent_looking_at_center(rng);
    arena.push(agent);

    let size_small = DEFAULT_REWARD;
    let size_big = DEFAULT_REWARD * 2.0;
    let angle_big = angle + rng.gen_range(-20..21) as f32;
    let mut angle_small = angle + rng.gen_range(-20..21) as f32;
    while (angle_big - angle_small).abs() < 15.0 {
        angle_small = angle + rng.gen_range(-20..21) as f32;
    }

    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle_big,
        ItemKind::GoodGoal,
        5,
        20,
        Some(size_big),
    )?);
    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle_small,
        ItemKind::GoodGoal,
        5,
        20,
        Some(size_small),
    )?);
    Ok(arena)
}

/// Two equal goals, one close and one far.
pub fn near_far_choice(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let (agent, x, z, angle) = agent_looking_at_center(rng);
    arena.push(agent);

    let angle_close = angle + rng.gen_range(-20..21) as f32;
    let mut angle_far = angle + rng.gen_range(-20..21) as f32;
    while (angle_close - angle_far).abs() < 15.0 {
        angle_far = angle + rng.gen_range(-20..21) as f32;
    }

    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle_close,
        ItemKind::GoodGoal,
        5,
        10,
        Some(DEFAULT_REWARD),
    )?);
    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle_far,
        ItemKind::GoodGoal,
        19,
        40,
        Some(DEFAULT_REWARD),
    )?);
    Ok(arena)
}

/// Wall spanning the field at `x = line` with a single four-unit gap;
/// returns the line so callers can lay out the two sides.
pub(crate) fn add_divider_with_gap(rng: &mut StdRng, arena: &mut Arena) -> f32 {
    let line = rng.gen_range(15..26) as f32;
    let gap_center = rng.gen_range(4..37) as f32;
    let near_length = gap_center - 2.0;
    let far_length = ARENA_SIZE - gap_center - 2.0;
    let instances = vec![
        Instance::at(line, near_length / 2.0)
            .sized(Vector3::new(1.0, WALL_HEIGHT, near_length))
            .rotated(0.0),
        Instance::at(line, ARENA_SIZE - far_length / 2.0)
            .sized(Vector3::new(1.0, WALL_HEIGHT, far_length))
            .rotated(0.0),
    ];
    arena.push(Entity::group(ItemKind::Wall, instances).tinted(GRAY));
    line
}

/// Small goal on the agent's side of the divider, twice-the-size goal behind
/// it; the bigger payoff costs a detour through the gap.
pub fn divided_sized_choice(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let line = add_divider_with_gap(rng, &mut arena);

    let x = rng.gen_range(1.0..line - 2.0);
    let z = rng.gen_range(1.0..39.0);
    let angle = angle_looking_at_center(x, z);
    arena.push(Entity::single(
        ItemKind::Agent,
        Instance::at(x, z).rotated(angle),
    ));

    let near = place_with_retry(rng, &arena.entities, |rng| {
        let gx = rng.gen_range(1.0..line - 1.0);
        let gz = rng.gen_range(1.0..39.0);
        Entity::single(
            ItemKind::GoodGoal,
            Instance::at(gx, gz).cube(DEFAULT_REWARD).rotated(0.0),
        )
    })?;
    arena.push(near);

    let far = place_with_retry(rng, &arena.entities, |rng| {
        let gx = rng.gen_range(line + 1.0..38.0);
        let gz = rng.gen_range(2.0..38.0);
        Entity::single(
            ItemKind::GoodGoal,
            Instance::at(gx, gz).cube(DEFAULT_REWARD * 2.0).rotated(0.0),
        )
    })?;
    arena.push(far);
    Ok(arena)
}

/// The only reward sits behind the divider.
pub fn divided_hidden_reward(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let line = add_divider_with_gap(rng, &mut arena);

    let x = rng.gen_range(1.0..line - 2.0);
    let z = rng.gen_range(1.0..39.0);
    let angle = angle_looking_at_center(x, z);
    arena.push(Entity::single(
        ItemKind::Agent,
        Instance::at(x, z).rotated(angle),
    ));

    let hidden = place_with_retry(rng, &arena.entities, |rng| {
        let gx = rng.gen_range(line + 1.0..38.0);
        let gz = rng.gen_range(2.0..38.0);
        Entity::single(
            ItemKind::GoodGoalMulti,
            Instance::at(gx, gz).cube(DEFAULT_REWARD).rotated(0.0),
        )
    })?;
    arena.push(hidden);
    Ok(arena)
}
