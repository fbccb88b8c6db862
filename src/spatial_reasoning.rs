use crate::arena::{Arena, Entity, Instance, ItemKind};
use crate::constants::{DEFAULT_REWARD, GRAY, WALL_HEIGHT};
use crate::food::add_reward_markers;
use crate::maze::{pillar_positions, wall_segment, Maze};
use crate::placement::PlacementError;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

const MAZE_CELLS: usize = 8;
const MAZE_WALL_THICKNESS: f32 = 1.0;

/// Perfect maze rendered as walls; agent and goal start in distinct cells.
pub fn walls_maze(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let maze = Maze::generate(rng, MAZE_CELLS);
    add_maze_layout(&mut arena, &maze, ItemKind::Wall, WALL_HEIGHT);

    let cells = distinct_cells(rng, &maze, 2);
    let (ax, az) = cells[0];
    let heading = rng.gen_range(0..360) as f32;
    arena.push(Entity::single(
        ItemKind::Agent,
        Instance::at(ax, az).cube(1.0).rotated(heading),
    ));
    let (gx, gz) = cells[1];
    arena.push(Entity::single(
        ItemKind::GoodGoal,
        Instance::at(gx, gz).cube(DEFAULT_REWARD).rotated(0.0),
    ));
    Ok(arena)
}

/// The same layout drawn in lethal ground: crossing a "wall" ends the
/// episode, the carved path is safe.
pub fn hazard_maze(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let maze = Maze::generate(rng, MAZE_CELLS);
    add_maze_layout(&mut arena, &maze, ItemKind::DeathZone, 0.0);

    let cells = distinct_cells(rng, &maze, 2);
    let (ax, az) = cells[0];
    let heading = rng.gen_range(0..360) as f32;
    arena.push(Entity::single(
        ItemKind::Agent,
        Instance::at(ax, az).cube(1.0).rotated(heading),
    ));
    let (gx, gz) = cells[1];
    arena.push(Entity::single(
        ItemKind::GoodGoal,
        Instance::at(gx, gz).cube(DEFAULT_REWARD).rotated(0.0),
    ));
    Ok(arena)
}

/// Maze walls with hazard spheres seeded into their own cells; the reward
/// mass is split into scattered markers.
pub fn bad_goal_labyrinth(rng: &mut StdRng, time_limit: u32) -> Result<Arena, PlacementError> {
    let mut arena = Arena::new(time_limit);
    let maze = Maze::generate(rng, MAZE_CELLS);
    add_maze_layout(&mut arena, &maze, ItemKind::Wall, WALL_HEIGHT);

    let count = *[5usize, 10, 15, 30].choose(rng).unwrap();
    let cells = distinct_cells(rng, &maze, count + 1);
    let instances = cells[..count]
        .iter()
        .map(|&(x, z)| Instance::at(x, z).cube(1.0).rotated(0.0))
        .collect();
    arena.push(Entity::group(ItemKind::BadGoal, instances));

    let (ax, az) = cells[count];
    let heading = rng.gen_range(0..360) as f32;
    arena.push(Entity::single(
        ItemKind::Agent,
        Instance::at(ax, az).cube(1.0).rotated(heading),
    ));
    add_reward_markers(rng, &mut arena, DEFAULT_REWARD);
    Ok(arena)
}

/// Renders a maze as one pillar group plus one group of wall segments, both
/// of `kind` with the given height (zero for flat hazard strips).
fn add_maze_layout(arena: &mut Arena, maze: &Maze, kind: ItemKind, height: f32) {
    let thickness = MAZE_WALL_THICKNESS;
    let pillars: Vec<Instance> = pillar_positions(maze.n())
        .iter()
        .map(|&(x, z)| {
            Instance::at(x, z)
                .sized(Vector3::new(thickness, height, thickness))
                .rotated(0.0)
        })
        .collect();
    let mut pillar_group = Entity::group(kind, pillars);
    if kind == ItemKind::Wall {
        pillar_group = pillar_group.tinted(GRAY);
    }
    arena.push(pillar_group);

    let mut segments = Vec::new();
    for cell in maze.cells() {
        for side in &cell.walls {
            let ((x, z), (sx, sz)) = wall_segment(maze.n(), thickness, cell.col, cell.row, *side);
            segments.push(
                Instance::at(x, z)
                    .sized(Vector3::new(sx, height, sz))
                    .rotated(0.0),
            );
        }
    }
    let mut segment_group = Entity::group(kind, segments);
    if kind == ItemKind::Wall {
        segment_group = segment_group.tinted(GRAY);
    }
    arena.push(segment_group);
}

/// Centers of `count` distinct random cells.
fn distinct_cells(rng: &mut StdRng, maze: &Maze, count: usize) -> Vec<(f32, f32)> {
    let n = maze.n();
    let mut ids: Vec<usize> = (0..n * n).collect();
    ids.shuffle(rng);
    ids.truncate(count);
    ids.iter()
        .map(|id| maze.cell_center(id % n, id / n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TIME_LIMIT;
    use rand::SeedableRng;

    #[test]
    fn walls_maze_renders_every_standing_wall() {
        let mut rng = StdRng::seed_from_u64(41);
        let arena = walls_maze(&mut rng, DEFAULT_TIME_LIMIT).unwrap();
        let pillars = &arena.entities[0];
        let segments = &arena.entities[1];
        assert_eq!(pillars.kind, ItemKind::Wall);
        assert_eq!(pillars.instances.len(), 49);
        // 2n(n-1) interior adjacencies minus n²-1 carved passages
        assert_eq!(segments.instances.len(), 49);
    }

    #[test]
    fn agent_and_goal_start_in_distinct_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let arena = walls_maze(&mut rng, DEFAULT_TIME_LIMIT).unwrap();
        let agent = arena.entities[2].instances[0].position.unwrap();
        let goal = arena.entities[3].instances[0].position.unwrap();
        assert_eq!(arena.entities[2].kind, ItemKind::Agent);
        assert_eq!(arena.entities[3].kind, ItemKind::GoodGoal);
        assert!(agent.xz() != goal.xz());
    }

    #[test]
    fn hazard_maze_is_flat_and_untinted() {
        let mut rng = StdRng::seed_from_u64(43);
        let arena = hazard_maze(&mut rng, DEFAULT_TIME_LIMIT).unwrap();
        for entity in arena.entities.iter().take(2) {
            assert_eq!(entity.kind, ItemKind::DeathZone);
            assert!(entity.tint.is_none());
            for instance in &entity.instances {
                assert_eq!(instance.size.unwrap().y, 0.0);
            }
        }
    }

    #[test]
    fn labyrinth_spheres_occupy_their_own_cells() {
        let mut rng = StdRng::seed_from_u64(44);
        let arena = bad_goal_labyrinth(&mut rng, DEFAULT_TIME_LIMIT).unwrap();
        let spheres = arena
            .entities
            .iter()
            .find(|entity| entity.kind == ItemKind::BadGoal)
            .unwrap();
        assert!([5, 10, 15, 30].contains(&spheres.instances.len()));

        let mut positions: Vec<(u32, u32)> = spheres
            .instances
            .iter()
            .map(|instance| {
                let p = instance.position.unwrap();
                (p.x as u32, p.z as u32)
            })
            .collect();
        positions.sort_unstable();
        positions.dedup();
        assert_eq!(positions.len(), spheres.instances.len());

        assert!(arena.contains_kind(ItemKind::Agent));
        let markers: f32 = arena
            .entities
            .iter()
            .filter(|entity| entity.kind == ItemKind::GoodGoalMulti)
            .map(|entity| entity.instances[0].size.unwrap().x)
            .sum();
        assert!((markers - DEFAULT_REWARD).abs() < 1e-4);
    }
}
