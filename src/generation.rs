use crate::arena::{Arena, ArenaCollection};
use crate::constants::{BLACKOUT_INTERVALS, DEFAULT_TIME_LIMIT};
use crate::placement::PlacementError;
use crate::{avoidance, food, obstacles, preferences, spatial_reasoning};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub type ArenaBuilder = fn(&mut StdRng, u32) -> Result<Arena, PlacementError>;

/// A thematic group of builders sharing one weight table. Weights express
/// curriculum difficulty (easier or shorter levels appear less often), not
/// generation logic.
pub struct Family {
    pub name: &'static str,
    pub builders: &'static [(ArenaBuilder, u32)],
    /// Strip color cues from every generated level.
    pub strip_tints: bool,
    /// Inject a periodic vision-blackout sentinel into every generated level.
    pub blackouts: bool,
}

pub const FAMILIES: &[Family] = &[
    Family {
        name: "food",
        builders: &[
            (food::goal_pair_ahead, 1),
            (food::chasing_hazard, 2),
            (food::hazard_wall_gap, 4),
            (food::hazard_rings, 4),
            (food::scattered_rewards, 2),
            (food::bouncing_rewards, 2),
        ],
        strip_tints: false,
        blackouts: false,
    },
    Family {
        name: "preferences",
        builders: &[
            (preferences::sized_choice, 1),
            (preferences::near_far_choice, 1),
            (preferences::divided_sized_choice, 2),
            (preferences::divided_hidden_reward, 2),
        ],
        strip_tints: false,
        blackouts: false,
    },
    Family {
        name: "obstacles",
        builders: &[(obstacles::obstacle_course, 4)],
        strip_tints: false,
        blackouts: false,
    },
    Family {
        name: "avoidance",
        builders: &[
            (avoidance::hazards_and_obstacles, 4),
            (avoidance::center_blocked, 4),
        ],
        strip_tints: false,
        blackouts: false,
    },
    Family {
        name: "spatial_reasoning",
        builders: &[
            (spatial_reasoning::walls_maze, 4),
            (spatial_reasoning::hazard_maze, 4),
            (spatial_reasoning::bad_goal_labyrinth, 4),
        ],
        strip_tints: false,
        blackouts: false,
    },
    Family {
        name: "generalization",
        builders: &[
            (obstacles::obstacle_course, 2),
            (avoidance::hazards_and_obstacles, 2),
            (spatial_reasoning::walls_maze, 1),
        ],
        strip_tints: true,
        blackouts: false,
    },
    Family {
        name: "internal_models",
        builders: &[
            (food::scattered_rewards, 1),
            (obstacles::obstacle_course, 1),
            (spatial_reasoning::walls_maze, 1),
        ],
        strip_tints: true,
        blackouts: true,
    },
];

#[derive(Debug, Clone)]
pub struct ArenaGenConfig {
    pub time_limit: u32,
    /// Each builder runs `weight x scale` times.
    pub scale: u32,
    /// Seed for reproducible collections.
    pub seed: Option<u64>,
}

impl Default for ArenaGenConfig {
    fn default() -> Self {
        ArenaGenConfig {
            time_limit: DEFAULT_TIME_LIMIT,
            scale: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("family {0} declares no builders")]
    EmptyFamily(&'static str),
    #[error("family {0} assigns weight zero to a builder")]
    ZeroWeight(&'static str),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Builds the full curriculum: every builder of every family, repeated per
/// its weight and the configured scale, post-processed per family flags,
/// then shuffled into a randomly keyed collection.
pub fn generate_arena_collection(config: ArenaGenConfig) -> Result<ArenaCollection, GenerationError> {
    validate_families(FAMILIES)?;
    let mut rng: StdRng = config
        .seed
        .map(SeedableRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy);

    let mut collection = ArenaCollection::default();
    for family in FAMILIES {
        for (builder, weight) in family.builders {
            for _ in 0..weight * config.scale {
                let mut arena = builder(&mut rng, config.time_limit)?;
                if family.strip_tints {
                    strip_tints(&mut arena);
                }
                if family.blackouts {
                    inject_blackouts(&mut rng, &mut arena);
                }
                collection.insert_next(arena);
            }
        }
    }
    shuffle_keys(&mut rng, &mut collection);
    Ok(collection)
}

/// Sum of all builder weights; a collection holds `scale x` this many arenas.
pub fn total_weight() -> u32 {
    FAMILIES
        .iter()
        .flat_map(|family| family.builders.iter())
        .map(|(_, weight)| weight)
        .sum()
}

fn validate_families(families: &[Family]) -> Result<(), GenerationError> {
    for family in families {
        if family.builders.is_empty() {
            return Err(GenerationError::EmptyFamily(family.name));
        }
        if family.builders.iter().any(|(_, weight)| *weight == 0) {
            return Err(GenerationError::ZeroWeight(family.name));
        }
    }
    Ok(())
}

fn strip_tints(arena: &mut Arena) {
    for entity in arena.entities.iter_mut() {
        entity.tint = None;
    }
}

fn inject_blackouts<R: Rng>(rng: &mut R, arena: &mut Arena) {
    arena.blackouts = vec![*BLACKOUT_INTERVALS.choose(rng).unwrap()];
}

/// Random permutation of the key set; values are untouched, only the
/// key-to-arena association changes.
fn shuffle_keys<R: Rng>(rng: &mut R, collection: &mut ArenaCollection) {
    let keys: Vec<usize> = collection.arenas.keys().copied().collect();
    let mut sources = keys.clone();
    sources.shuffle(rng);
    let mut values = std::mem::take(&mut collection.arenas);
    for (key, source) in keys.iter().zip(sources) {
        let arena = values.remove(&source).unwrap();
        collection.arenas.insert(*key, arena);
    }
}
