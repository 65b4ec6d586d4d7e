//! Built-in world constants. `WorldConfig::default()` mirrors these values;
//! a loaded config may override any of them.

/// Side length of a chunk in world units.
pub const CHUNK_SIZE: f32 = 20.0;

/// Chebyshev radius (in chunks) kept resident around the player.
pub const VIEW_RADIUS: i32 = 2;

/// Spacing between main avenues in warped world units.
pub const MAIN_SPACING: f32 = 60.0;

/// Half-width of a main avenue.
pub const MAIN_HALF_WIDTH: f32 = 4.0;

/// Spacing between minor streets. Divides `MAIN_SPACING`, so every avenue
/// also lies on a street line and precedence decides the class.
pub const STREET_SPACING: f32 = 20.0;

/// Half-width of a minor street.
pub const STREET_HALF_WIDTH: f32 = 2.0;

/// Warp term frequencies and amplitudes: `sin(a*K1)*A1 + cos(b*K2)*A2`.
/// `WARP_K1 * WARP_A1` must stay below 1 so lane solving converges.
pub const WARP_K1: f32 = 0.05;
pub const WARP_A1: f32 = 2.0;
pub const WARP_K2: f32 = 0.03;
pub const WARP_A2: f32 = 2.5;

/// Chunk seed multipliers (large distinct primes).
pub const SEED_PRIME_X: i64 = 73_856_093;
pub const SEED_PRIME_Z: i64 = 19_349_663;

/// Step between road samples inside a chunk.
pub const ROAD_SAMPLE_STEP: f32 = 2.0;

/// Building count range per chunk (inclusive).
pub const BUILDINGS_MIN: u32 = 2;
pub const BUILDINGS_MAX: u32 = 5;

/// Total rejection-sampling attempts per chunk for buildings.
pub const PLACEMENT_ATTEMPTS: u32 = 200;

/// NPC count range per chunk (inclusive).
pub const NPCS_MIN: u32 = 0;
pub const NPCS_MAX: u32 = 3;

/// Distance beyond the road half-width an NPC is pushed to reach the sidewalk.
pub const SIDEWALK_MARGIN: f32 = 1.0;

/// Vehicle spawn candidates evaluated per chunk.
pub const VEHICLE_CANDIDATES: u32 = 2;

/// Lateral offset of a lane from the avenue centre line.
pub const LANE_OFFSET: f32 = 1.5;

/// Probability that a vehicle turns at a main intersection.
pub const TURN_CHANCE: f32 = 0.25;

/// Player walking speed in world units per second.
pub const PLAYER_SPEED: f32 = 8.0;

/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 0.5;
