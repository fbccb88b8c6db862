use crate::constants::ARENA_SIZE;
use pathfinding::prelude::kruskal;
use rand::Rng;
use std::collections::BTreeSet;

/// Walls are stored on their south/east owner; a cell's north/west boundary
/// is its neighbor's south/east wall.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum WallSide {
    South,
    East,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeCell {
    pub col: usize,
    pub row: usize,
    pub walls: BTreeSet<WallSide>,
}

#[derive(Debug, Clone)]
pub struct Maze {
    n: usize,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Carves a perfect maze over an `n x n` grid: every interior adjacency
    /// gets a random weight and the spanning tree kruskal selects has its
    /// walls removed, leaving exactly one path between any two cells.
    pub fn generate<R: Rng>(rng: &mut R, n: usize) -> Maze {
        let mut cells = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let mut walls = BTreeSet::new();
                if row + 1 < n {
                    walls.insert(WallSide::South);
                }
                if col + 1 < n {
                    walls.insert(WallSide::East);
                }
                cells.push(MazeCell { col, row, walls });
            }
        }
        let mut maze = Maze { n, cells };

        let mut weighted_edges = Vec::new();
        for row in 0..n {
            for col in 0..n {
                if col + 1 < n {
                    weighted_edges.push(((col, row), (col + 1, row), rng.gen::<u64>()));
                }
                if row + 1 < n {
                    weighted_edges.push(((col, row), (col, row + 1), rng.gen::<u64>()));
                }
            }
        }
        for (a, b, _) in kruskal(&weighted_edges) {
            maze.carve(*a, *b);
        }
        maze
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn cell(&self, col: usize, row: usize) -> &MazeCell {
        &self.cells[row * self.n + col]
    }

    pub fn cells(&self) -> impl Iterator<Item = &MazeCell> {
        self.cells.iter()
    }

    pub fn has_wall(&self, col: usize, row: usize, side: WallSide) -> bool {
        self.cell(col, row).walls.contains(&side)
    }

    /// Center of a cell in field coordinates.
    pub fn cell_center(&self, col: usize, row: usize) -> (f32, f32) {
        let pitch = ARENA_SIZE / self.n as f32;
        ((col as f32 + 0.5) * pitch, (row as f32 + 0.5) * pitch)
    }

    /// Carved interior connections; a perfect maze has `n² - 1`.
    pub fn carved_connections(&self) -> usize {
        let interior = 2 * self.n * (self.n - 1);
        let standing: usize = self.cells.iter().map(|cell| cell.walls.len()).sum();
        interior - standing
    }

    fn carve(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ((col, row), side) = if a.0 == b.0 {
            ((a.0, a.1.min(b.1)), WallSide::South)
        } else {
            ((a.0.min(b.0), a.1), WallSide::East)
        };
        let n = self.n;
        self.cells[row * n + col].walls.remove(&side);
    }
}

/// Interior grid intersections where a pillar of `thickness²` footprint sits.
pub fn pillar_positions(n: usize) -> Vec<(f32, f32)> {
    let pitch = ARENA_SIZE / n as f32;
    let mut positions = Vec::new();
    for i in 1..n {
        for j in 1..n {
            positions.push((i as f32 * pitch, j as f32 * pitch));
        }
    }
    positions
}

/// Center `(x, z)` and footprint `(size_x, size_z)` of the physical wall
/// closing `side` of cell `(col, row)`.
///
/// Interior segments span pillar to pillar; segments in boundary cells are
/// extended by half a thickness so they terminate flush with the field edge.
pub fn wall_segment(
    n: usize,
    thickness: f32,
    col: usize,
    row: usize,
    side: WallSide,
) -> ((f32, f32), (f32, f32)) {
    let pitch = ARENA_SIZE / n as f32;
    let (line, along, last) = match side {
        WallSide::South => ((row + 1) as f32 * pitch, col, col + 1 == n),
        WallSide::East => ((col + 1) as f32 * pitch, row, row + 1 == n),
    };
    let start = if along == 0 {
        0.0
    } else {
        along as f32 * pitch + thickness / 2.0
    };
    let end = if last {
        ARENA_SIZE
    } else {
        (along + 1) as f32 * pitch - thickness / 2.0
    };
    let center_along = (start + end) / 2.0;
    let length = end - start;
    match side {
        WallSide::South => ((center_along, line), (length, thickness)),
        WallSide::East => ((line, center_along), (thickness, length)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_maze_is_a_spanning_tree() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in [2usize, 4, 8] {
            let maze = Maze::generate(&mut rng, n);
            assert_eq!(maze.carved_connections(), n * n - 1, "n = {n}");

            let mut seen = vec![false; n * n];
            let mut queue = vec![(0usize, 0usize)];
            seen[0] = true;
            while let Some((col, row)) = queue.pop() {
                let mut neighbors = Vec::new();
                if col + 1 < n && !maze.has_wall(col, row, WallSide::East) {
                    neighbors.push((col + 1, row));
                }
                if col > 0 && !maze.has_wall(col - 1, row, WallSide::East) {
                    neighbors.push((col - 1, row));
                }
                if row + 1 < n && !maze.has_wall(col, row, WallSide::South) {
                    neighbors.push((col, row + 1));
                }
                if row > 0 && !maze.has_wall(col, row - 1, WallSide::South) {
                    neighbors.push((col, row - 1));
                }
                for (c, r) in neighbors {
                    if !seen[r * n + c] {
                        seen[r * n + c] = true;
                        queue.push((c, r));
                    }
                }
            }
            assert!(seen.iter().all(|&visited| visited), "n = {n}");
        }
    }

    #[test]
    fn rim_cells_own_no_outer_walls() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::generate(&mut rng, 6);
        for cell in maze.cells() {
            if cell.col + 1 == 6 {
                assert!(!cell.walls.contains(&WallSide::East));
            }
            if cell.row + 1 == 6 {
                assert!(!cell.walls.contains(&WallSide::South));
            }
        }
    }

    #[test]
    fn pillars_sit_on_interior_intersections() {
        let positions = pillar_positions(8);
        assert_eq!(positions.len(), 49);
        assert_eq!(positions[0], (5.0, 5.0));
        assert_eq!(positions[48], (35.0, 35.0));
    }

    #[test]
    fn wall_segments_snap_to_grid_and_edges() {
        let fmt = |col, row, side| {
            let ((x, z), (sx, sz)) = wall_segment(8, 1.0, col, row, side);
            format!("({x:.2}, {z:.2}) {sx:.2}x{sz:.2}")
        };
        insta::assert_snapshot!(fmt(0, 0, WallSide::South), @"(2.25, 5.00) 4.50x1.00");
        insta::assert_snapshot!(fmt(3, 2, WallSide::South), @"(17.50, 15.00) 4.00x1.00");
        insta::assert_snapshot!(fmt(7, 3, WallSide::South), @"(37.75, 20.00) 4.50x1.00");
        insta::assert_snapshot!(fmt(2, 0, WallSide::East), @"(15.00, 2.25) 1.00x4.50");
        insta::assert_snapshot!(fmt(4, 5, WallSide::East), @"(25.00, 27.50) 1.00x4.00");
    }

    #[test]
    fn cell_centers_are_mid_pitch() {
        let mut rng = StdRng::seed_from_u64(5);
        let maze = Maze::generate(&mut rng, 8);
        assert_eq!(maze.cell_center(0, 0), (2.5, 2.5));
        assert_eq!(maze.cell_center(7, 7), (37.5, 37.5));
    }
}
