use crate::arena::{Arena, Entity, Instance, ItemKind};
use crate::constants::{ARENA_CENTER, BLUE, GRAY, PINK, WALL_HEIGHT};
use crate::placement::{place_with_retry, PlacementError};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Movable cardboard box with a random extent; the environment chooses where
/// it lands.
pub(crate) fn add_random_box(rng: &mut StdRng, arena: &mut Arena) {
    let kind = *[ItemKind::Cardbox1, ItemKind::Cardbox2].choose(rng).unwrap();
    let size = Vector3::new(
        rng.gen_range(1..6) as f32,
        rng.gen_range(1..6) as f32,
        rng.gen_range(1..6) as f32,
    );
    arena.push(Entity::single(kind, Instance::default().sized(size)));
}

/// Wooden U/L-shaped obstacle; only the long axis is chosen here, the `-1`
/// extents are filled in by the environment.
pub(crate) fn add_random_wooden_object(rng: &mut StdRng, arena: &mut Arena) {
    let kind = *[ItemKind::UObject, ItemKind::LObject, ItemKind::LObject2]
        .choose(rng)
        .unwrap();
    let size = Vector3::new(-1.0, -1.0, rng.gen_range(3..10) as f32);
    arena.push(Entity::single(kind, Instance::default().sized(size)));
}

/// `count` rounds of box-plus-wooden clutter.
pub(crate) fn add_clutter(rng: &mut StdRng, arena: &mut Arena, count: u32) {
    for _ in 0..count {
        add_random_box(rng, arena);
        add_random_wooden_object(rng, arena);
    }
}

pub(crate) fn add_simple_goal(rng: &mut StdRng, arena: &mut Arena) -> Result<(), PlacementError> {
    let goal = place_with_retry(rng, &arena.entities, |rng| {
        let x = rng.gen_range(1.0..39.0);
        let z = rng.gen_range(1.0..39.0);
        Entity::single(
            ItemKind::GoodGoalMulti,
            Instance::at(x, z).cube(1.0).rotated(0.0),
        )
    })?;
    arena.push(goal);
    Ok(())
}

/// Agent dropped anywhere free; its orientation is left to the environment,
/// so collision checks fall back to the three-hypothesis probe.
pub(crate) fn add_random_agent(rng: &mut StdRng, arena: &mut Arena) -> Result<(), PlacementError> {
    let agent = place_with_retry(rng, &arena.entities, |rng| {
        let x = rng.gen_range(1.0..39.0);
        let z = rng.gen_range(1.0..39.0);
        Entity::single(ItemKind::Agent, Instance::at(x, z).cube(1.0))
    })?;
    arena.push(agent);
    Ok(())
}

pub(crate) fn add_bad_goals(
    rng: &mut StdRng,
    arena: &mut Arena,
    count: u32,
) -> Result<(), PlacementError> {
    for _ in 0..count {
        let goal = place_with_retry(rng, &arena.entities, |rng| {
            let side = rng.gen_range(0.5..2.0);
            let x = rng.gen_range(1.0..39.0);
            let z = rng.gen_range(1.0..39.0);
            Entity::single(ItemKind::BadGoal, Instance::at(x, z).cube(side).rotated(0.0))
        })?;
        arena.push(goal);
    }
    Ok(())
}

/// Platform with a ramp snugged against a random side and, unless the
/// platform is a decoy, a goal on the deck.
pub(crate) fn add_goal_on_platform(
    rng: &mut StdRng,
    arena: &mut Arena,
    empty_platform: bool,
) -> Result<(), PlacementError> {
    let width = rng.gen_range(3.0..6.0);
    let depth = rng.gen_range(3.0..6.0);
    let height = rng.gen_range(2.0..4.0);
    let platform = place_with_retry(rng, &arena.entities, |rng| {
        let x = rng.gen_range(6.0..34.0);
        let z = rng.gen_range(6.0..34.0);
        Entity::single(
            ItemKind::Wall,
            Instance::at(x, z)
                .sized(Vector3::new(width, height, depth))
                .rotated(0.0),
        )
        .tinted(BLUE)
    })?;
    let center = platform.instances[0].position.unwrap();
    arena.push(platform);

    // Ramp size is local (across, height, run); the rotation points the run
    // up toward the platform deck.
    let run = height * 2.0;
    let ramp = place_with_retry(rng, &arena.entities, |rng| {
        let (x, z, rotation, across) = match rng.gen_range(0..4) {
            0 => (center.x + width / 2.0 + run / 2.0, center.z, 270.0, depth),
            1 => (center.x - width / 2.0 - run / 2.0, center.z, 90.0, depth),
            2 => (center.x, center.z + depth / 2.0 + run / 2.0, 180.0, width),
            _ => (center.x, center.z - depth / 2.0 - run / 2.0, 0.0, width),
        };
        Entity::single(
            ItemKind::Ramp,
            Instance::at(x, z)
                .sized(Vector3::new(across, height, run))
                .rotated(rotation),
        )
        .tinted(PINK)
    })?;
    arena.push(ramp);

    if !empty_platform {
        arena.push(Entity::single(
            ItemKind::GoodGoal,
            Instance::raised(center.x, height, center.z)
                .cube(1.0)
                .rotated(0.0),
        ));
    }
    Ok(())
}

pub(crate) fn add_goal_on_box(rng: &mut StdRng, arena: &mut Arena) -> Result<(), PlacementError> {
    let side = rng.gen_range(2.0..4.0);
    let carton = place_with_retry(rng, &arena.entities, |rng| {
        let kind = *[ItemKind::Cardbox1, ItemKind::Cardbox2].choose(rng).unwrap();
        let x = rng.gen_range(3.0..37.0);
        let z = rng.gen_range(3.0..37.0);
        Entity::single(kind, Instance::at(x, z).cube(side).rotated(0.0))
    })?;
    let center = carton.instances[0].position.unwrap();
    arena.push(carton);
    arena.push(Entity::single(
        ItemKind::GoodGoal,
        Instance::raised(center.x, side, center.z).cube(1.0).rotated(0.0),
    ));
    Ok(())
}

/// Tunnel sheltering a reward; the goal sits deliberately inside the tunnel
/// footprint, reachable only through the bore.
pub(crate) fn add_goal_in_tunnel(rng: &mut StdRng, arena: &mut Arena) -> Result<(), PlacementError> {
    let diameter = rng.gen_range(3.0..5.0);
    let tunnel = place_with_retry(rng, &arena.entities, |rng| {
        let x = rng.gen_range(4.0..36.0);
        let z = rng.gen_range(4.0..36.0);
        let rotation = *[0.0f32, 90.0].choose(rng).unwrap();
        Entity::single(
            ItemKind::CylinderTunnel,
            Instance::at(x, z).cube(diameter).rotated(rotation),
        )
        .tinted(GRAY)
    })?;
    let center = tunnel.instances[0].position.unwrap();
    arena.push(tunnel);
    arena.push(Entity::single(
        ItemKind::GoodGoalMulti,
        Instance::at(center.x, center.z).cube(1.0).rotated(0.0),
    ));
    Ok(())
}

/// One long wall parked on the field center at a random heading.
pub(crate) fn add_center_blocking_wall(rng: &mut StdRng, arena: &mut Arena) {
    let length = rng.gen_range(15.0..25.0);
    let thickness = rng.gen_range(2.0..4.0);
    let rotation = rng.gen_range(0..360) as f32;
    arena.push(
        Entity::single(
            ItemKind::Wall,
            Instance::at(ARENA_CENTER, ARENA_CENTER)
                .sized(Vector3::new(length, WALL_HEIGHT, thickness))
                .rotated(rotation),
        )
        .tinted(GRAY),
    );
}

/// Rewards possibly elevated on platforms or boxes, an agent, movable
/// clutter and a handful of hazard spheres.
pub fn obstacle_course(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    for _ in 0..2 {
        match rng.gen_range(0..3) {
            0 => add_goal_on_platform(rng, &mut arena, false)?,
            1 => add_goal_on_box(rng, &mut arena)?,
            _ => add_simple_goal(rng, &mut arena)?,
        }
    }
    if rng.gen_bool(0.2) {
        add_goal_on_platform(rng, &mut arena, true)?;
    }
    add_random_agent(rng, &mut arena)?;
    add_clutter(rng, &mut arena, 5);
    let hazards = rng.gen_range(2..7);
    add_bad_goals(rng, &mut arena, hazards)?;
    Ok(arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TIME_LIMIT;
    use crate::geometry::{detect_collision, out_of_bounds};
    use rand::SeedableRng;

    #[test]
    fn obstacle_course_is_solvable_and_collision_free() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let arena = obstacle_course(&mut rng, DEFAULT_TIME_LIMIT).unwrap();

            assert!(arena.contains_kind(ItemKind::Agent), "seed {seed}");
            assert!(
                arena.entities.iter().any(|entity| entity.kind.is_reward()),
                "seed {seed}"
            );

            let grounded: Vec<_> = arena
                .entities
                .iter()
                .flat_map(|entity| entity.instances.iter())
                .filter(|instance| {
                    instance.position.map_or(false, |p| p.y == 0.0) && instance.size.is_some()
                })
                .collect();
            for instance in &grounded {
                assert!(!out_of_bounds(instance), "seed {seed}");
            }
            for i in 0..grounded.len() {
                for j in (i + 1)..grounded.len() {
                    assert!(
                        !detect_collision(grounded[i], grounded[j]),
                        "seed {seed}: instances {i} and {j} overlap"
                    );
                }
            }
        }
    }

    #[test]
    fn platform_goal_rests_on_the_deck() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut arena = Arena::new(DEFAULT_TIME_LIMIT);
        add_goal_on_platform(&mut rng, &mut arena, false).unwrap();

        let platform = &arena.entities[0];
        let goal = &arena.entities[2];
        let deck = platform.instances[0].size.unwrap().y;
        let goal_position = goal.instances[0].position.unwrap();
        assert_eq!(goal.kind, ItemKind::GoodGoal);
        assert_eq!(goal_position.y, deck);
        assert_eq!(
            goal_position.xz(),
            platform.instances[0].position.unwrap().xz()
        );
        assert_eq!(arena.entities[1].kind, ItemKind::Ramp);
    }

    #[test]
    fn decoy_platform_has_no_goal() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut arena = Arena::new(DEFAULT_TIME_LIMIT);
        add_goal_on_platform(&mut rng, &mut arena, true).unwrap();
        assert_eq!(arena.entities.len(), 2);
        assert!(!arena.entities.iter().any(|entity| entity.kind.is_reward()));
    }

    #[test]
    fn clutter_is_left_to_the_environment() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut arena = Arena::new(DEFAULT_TIME_LIMIT);
        add_clutter(&mut rng, &mut arena, 3);
        assert_eq!(arena.entities.len(), 6);
        for entity in &arena.entities {
            assert!(entity.instances[0].position.is_none());
            assert!(entity.instances[0].size.is_some());
        }
    }
}
