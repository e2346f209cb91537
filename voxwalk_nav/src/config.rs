// Navigator configuration.
//
// All tunable parameters live here in `NavConfig`, loadable from JSON. The
// navigator never uses magic numbers — it reads from the config. Defaults
// carry the tuning the system shipped with; hosts override per agent kind
// (a heavy slow walker wants a different brake speed than a scout).
//
// See also: `search.rs` which reads the search parameters, `navigator.rs`
// which reads the follower parameters.

use serde::{Deserialize, Serialize};

/// Tunable parameters for path search and path following.
/// Loaded from JSON, never mutated at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavConfig {
    /// Maximum number of edges from the start along any search branch.
    /// Cells beyond this depth are not expanded, bounding worst-case path
    /// length and search runtime.
    pub max_search_depth: u32,

    /// Cost added per voxel of ascent on an edge. Descending adds nothing —
    /// gravity does that work.
    pub ascent_cost: f32,

    /// Scale on the squared-horizontal-distance heuristic. Deliberately
    /// cheap and inadmissible: trades strict optimality for bounded search
    /// effort in a large grid.
    pub heuristic_weight: f32,

    /// Lower clamp on steering strength — near a waypoint the agent still
    /// gets a minimum push.
    pub steer_min: f32,

    /// Upper clamp on steering strength.
    pub steer_max: f32,

    /// Horizontal speed above which steering is inverted on descents and
    /// final approach, braking the agent for a precise stop.
    pub brake_speed: f32,

    /// How far below the agent a waypoint must be (in world units) before
    /// the brake logic treats the move as a descent.
    pub descent_threshold: f32,

    /// Fraction of the agent's jump height above which a waypoint counts as
    /// a climb; climbs are left to the agent's own jump control.
    pub jump_rise_factor: f32,

    /// Arrival tolerance at the final waypoint, as a fraction of the
    /// agent's horizontal footprint.
    pub final_tolerance_factor: f32,

    /// Arrival tolerance at intermediate waypoints, as a fraction of the
    /// agent's horizontal footprint.
    pub waypoint_tolerance_factor: f32,

    /// Floor on the intermediate-waypoint tolerance, so narrow agents do
    /// not get thresholds too tight to ever hit.
    pub waypoint_tolerance_min: f32,

    /// Maximum vertical distance to a waypoint for it to count as reached.
    pub vertical_tolerance: f32,

    /// Elapsed time between stall evaluations, in milliseconds.
    pub stall_check_interval_ms: u64,

    /// Minimum distance the agent must cover between stall evaluations;
    /// anything less clears the path as unfollowable.
    pub stall_distance: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            max_search_depth: 1024,
            ascent_cost: 2.8,
            heuristic_weight: 0.5,
            steer_min: 0.1,
            steer_max: 1.0,
            brake_speed: 2.5,
            descent_threshold: 0.75,
            jump_rise_factor: 0.75,
            final_tolerance_factor: 0.1,
            waypoint_tolerance_factor: 0.5,
            waypoint_tolerance_min: 0.5,
            vertical_tolerance: 0.5,
            stall_check_interval_ms: 5000,
            stall_distance: 1.5,
        }
    }
}

impl NavConfig {
    /// Deserialize a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
