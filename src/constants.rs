use crate::arena::Rgb;

/// Side length of the square playfield; `x`/`z` positions live in `[0, 40]`.
pub const ARENA_SIZE: f32 = 40.0;
pub const ARENA_CENTER: f32 = ARENA_SIZE / 2.0;

/// Tolerance for the strict-interior and bounds tests.
pub const EPS: f32 = 1e-6;

pub const DEFAULT_TIME_LIMIT: u32 = 500;
/// Total reward mass a level hands out by default.
pub const DEFAULT_REWARD: f32 = 2.0;

pub const WALL_HEIGHT: f32 = 5.0;

/// Candidate poses drawn before a placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Negative sentinels the environment decodes as periodic vision blackouts.
pub const BLACKOUT_INTERVALS: [i32; 3] = [-10, -20, -40];

pub const GRAY: Rgb = Rgb {
    r: 153,
    g: 153,
    b: 153,
};
pub const PINK: Rgb = Rgb { r: 255, g: 0, b: 255 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
