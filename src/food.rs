use crate::arena::{Arena, Entity, Instance, ItemKind};
use crate::constants::{ARENA_SIZE, DEFAULT_REWARD, MAX_PLACEMENT_ATTEMPTS};
use crate::geometry::{
    angle_looking_at_center, normalize_angle, position_ahead_of, random_position,
    random_position_near_center,
};
use crate::placement::{place_with_retry, PlacementError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::PI;

/// Agent at a uniformly random position, oriented toward the field center.
/// Returns the entity together with the pose the goals are laid out against.
pub(crate) fn agent_looking_at_center(rng: &mut StdRng) -> (Entity, f32, f32, f32) {
    let (x, z) = random_position(rng);
    let angle = angle_looking_at_center(x, z);
    let agent = Entity::single(ItemKind::Agent, Instance::at(x, z).rotated(angle));
    (agent, x, z, angle)
}

pub(crate) fn agent_looking_at_center_near_center(rng: &mut StdRng) -> (Entity, f32, f32, f32) {
    let (x, z) = random_position_near_center(rng, 5.0);
    let angle = angle_looking_at_center(x, z);
    let agent = Entity::single(ItemKind::Agent, Instance::at(x, z).rotated(angle));
    (agent, x, z, angle)
}

/// Drops a goal somewhere ahead of the pose, at a random distance within
/// `min_distance..max_distance`, keeping the whole body inside the field.
/// The goal faces back toward the agent. `size: None` leaves the size to the
/// environment.
pub(crate) fn goal_ahead_of_agent(
    rng: &mut StdRng,
    x: f32,
    z: f32,
    angle: f32,
    kind: ItemKind,
    min_distance: u32,
    max_distance: u32,
    size: Option<f32>,
) -> Result<Entity, PlacementError> {
    let margin = size.unwrap_or(0.0) / 2.0;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let distance = rng.gen_range(min_distance..max_distance) as f32;
        let (gx, gz) = position_ahead_of(x, z, angle, distance);
        if gx > margin && gx < ARENA_SIZE - margin && gz > margin && gz < ARENA_SIZE - margin {
            let mut instance = Instance::at(gx, gz).rotated(normalize_angle(angle + 180.0));
            if let Some(side) = size {
                instance = instance.cube(side);
            }
            return Ok(Entity::single(kind, instance));
        }
    }
    Err(PlacementError::Exhausted {
        kind,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Splits `reward` into chunks of at least 0.5 and appends one unplaced
/// `GoodGoalMulti` marker per chunk; the environment scatters them.
pub(crate) fn add_reward_markers(rng: &mut StdRng, arena: &mut Arena, reward: f32) {
    let mut remaining = reward;
    while remaining > 0.0 {
        let mut chunk = rng.gen_range(0.0..remaining);
        if chunk < 0.5 {
            chunk = 0.5;
        }
        if remaining - chunk < 0.5 {
            chunk = remaining;
        }
        remaining -= chunk;
        arena.push(Entity::single(
            ItemKind::GoodGoalMulti,
            Instance::default().cube(chunk),
        ));
    }
}

/// A yellow and a green goal ahead of the agent, their sizes splitting the
/// default reward, bearings kept at least five degrees apart.
pub fn goal_pair_ahead(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let (agent, x, z, angle) = agent_looking_at_center(rng);
    arena.push(agent);

    let size = rng.gen_range(0.5..DEFAULT_REWARD - 0.5);
    let angle_yellow = angle + rng.gen_range(-20..21) as f32;
    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle_yellow,
        ItemKind::GoodGoalMulti,
        5,
        20,
        Some(size),
    )?);

    let mut angle_green = angle + rng.gen_range(-20..21) as f32;
    while (angle_yellow - angle_green).abs() < 5.0 {
        angle_green = angle + rng.gen_range(-20..21) as f32;
    }
    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle_green,
        ItemKind::GoodGoal,
        5,
        20,
        Some(DEFAULT_REWARD - size),
    )?);
    Ok(arena)
}

/// A bouncing hazard released straight ahead of the agent, with the level
/// reward split into scattered markers.
pub fn chasing_hazard(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let (agent, x, z, angle) = agent_looking_at_center_near_center(rng);
    arena.push(agent);
    arena.push(goal_ahead_of_agent(
        rng,
        x,
        z,
        angle,
        ItemKind::BadGoalBounce,
        15,
        20,
        None,
    )?);
    add_reward_markers(rng, &mut arena, DEFAULT_REWARD);
    Ok(arena)
}

/// A full-width row of hazard spheres with a single gap, rewards hugging the
/// two far edges (their free coordinate left to the environment).
pub fn hazard_wall_gap(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let horizontal = rng.gen_bool(0.5);
    let goal_size = *[1.0f32, 2.0, 3.0].choose(rng).unwrap();
    let line = rng.gen_range(10..30) as f32;
    add_hazard_row(rng, &mut arena, horizontal, line, goal_size);

    let near = rng.gen_range(1..7) as f32;
    let far = ARENA_SIZE - rng.gen_range(1..7) as f32;
    let instances = if horizontal {
        vec![
            Instance::at(-1.0, near).cube(1.0),
            Instance::at(-1.0, far).cube(1.0),
        ]
    } else {
        vec![
            Instance::at(near, -1.0).cube(1.0),
            Instance::at(far, -1.0).cube(1.0),
        ]
    };
    arena.push(Entity::group(ItemKind::GoodGoalMulti, instances));
    Ok(arena)
}

/// Four mutually separated rings of hazard spheres, each with a random phase
/// and one gap; the first two ring centers hold a reward.
pub fn hazard_rings(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let mut centers: Vec<(f32, f32)> = Vec::new();
    let mut radii: Vec<f32> = Vec::new();
    for ring in 0..4 {
        let mut attempts = 0;
        let (center, radius) = loop {
            attempts += 1;
            let radius = rng.gen_range(2.0..4.0);
            let center = (rng.gen_range(5..35) as f32, rng.gen_range(5..35) as f32);
            let separated = centers.iter().zip(radii.iter()).all(|(&(cx, cz), &r)| {
                let dx = center.0 - cx;
                let dz = center.1 - cz;
                (dx * dx + dz * dz).sqrt() >= radius + r + 4.0
            });
            if separated {
                break (center, radius);
            }
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                return Err(PlacementError::Exhausted {
                    kind: ItemKind::BadGoal,
                    attempts,
                });
            }
        };
        centers.push(center);
        radii.push(radius);
        let goal_size = rng.gen_range(1.0..2.0);
        add_hazard_ring(rng, &mut arena, center, radius, goal_size);
        if ring < 2 {
            arena.push(Entity::single(
                ItemKind::GoodGoalMulti,
                Instance::at(center.0, center.1).cube(1.0),
            ));
        }
    }
    Ok(arena)
}

/// Four collision-checked rewards scattered over the open field.
pub fn scattered_rewards(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    scatter(rng, time_limit, ItemKind::GoodGoalMulti)
}

/// The bouncing variant of [`scattered_rewards`].
pub fn bouncing_rewards(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    scatter(rng, time_limit, ItemKind::GoodGoalMultiBounce)
}

fn scatter(rng: &mut StdRng, time_limit: u32, kind: ItemKind) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    for _ in 0..4 {
        let goal = place_with_retry(rng, &arena.entities, |rng| {
            let x = rng.gen_range(1.0..39.0);
            let z = rng.gen_range(1.0..39.0);
            Entity::single(kind, Instance::at(x, z).cube(1.0).rotated(0.0))
        })?;
        arena.push(goal);
    }
    Ok(arena)
}

fn add_hazard_row(rng: &mut StdRng, arena: &mut Arena, horizontal: bool, line: f32, goal_size: f32) {
    let count = ((ARENA_SIZE - goal_size) / (goal_size + 0.5)) as usize;
    let mut stations = linspace(goal_size / 2.0, ARENA_SIZE - goal_size / 2.0, count);
    stations.remove(rng.gen_range(0..stations.len()));
    let instances = stations
        .iter()
        .map(|&station| {
            let (x, z) = if horizontal {
                (line, station)
            } else {
                (station, line)
            };
            Instance::at(x, z).cube(goal_size)
        })
        .collect();
    arena.push(Entity::group(ItemKind::BadGoal, instances));
}

fn add_hazard_ring(
    rng: &mut StdRng,
    arena: &mut Arena,
    center: (f32, f32),
    radius: f32,
    goal_size: f32,
) {
    let count = ((2.0 * PI * radius) / (goal_size + 0.5)) as usize;
    let phase = rng.gen_range(0.0..PI);
    let mut thetas: Vec<f32> = (0..count)
        .map(|i| phase + 2.0 * PI * i as f32 / count as f32)
        .collect();
    thetas.remove(rng.gen_range(0..thetas.len()));
    let instances = thetas
        .iter()
        .map(|&theta| {
            Instance::at(
                radius * theta.cos() + center.0,
                radius * theta.sin() + center.1,
            )
            .cube(goal_size)
        })
        .collect();
    arena.push(Entity::group(ItemKind::BadGoal, instances));
}

fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    if count < 2 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f32;
    (0..count).map(|i| start + step * i as f32).collect()
}
