//! Physical constants and simulation defaults.

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Default vertex welding distance for obstacle meshes.
pub const DEFAULT_WELD_THRESHOLD: f32 = 0.001;

/// Default rejection-sampling budget per spawned particle.
pub const DEFAULT_MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Sea-level air density (kg/m³).
pub const AIR_DENSITY: f32 = 1.225;

/// Drag coefficient of a smooth sphere.
pub const SPHERE_DRAG_COEFFICIENT: f32 = 0.47;

/// Squared-length threshold below which a direction cannot be normalized.
pub const NORMALIZE_EPSILON_SQ: f32 = 1.0e-12;

/// Epsilon for degenerate triangle detection (area threshold).
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;
