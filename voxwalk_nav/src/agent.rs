// The navigator's read-only view of the agent.
//
// The navigator does not own or move the agent; each tick the host hands it
// a fresh `AgentSnapshot` and applies the returned steering vector in its
// own movement update. Jump execution, gravity, and collision response all
// stay on the host side.

use serde::{Deserialize, Serialize};
use voxwalk_grid::types::WorldVec;

/// The agent's collision extents along each axis, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySize {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl BodySize {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The larger horizontal extent — the agent's footprint, used to size
    /// arrival tolerances.
    pub fn horizontal_max(self) -> f32 {
        self.x.max(self.z)
    }

    /// The largest extent on any axis, used to size the start-repair window.
    pub fn longest_axis(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }
}

/// Per-tick snapshot of the agent state the navigator reads.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// World position, on the ground plane of the cell the agent stands in.
    pub position: WorldVec,
    /// Current velocity in world units per second.
    pub velocity: WorldVec,
    /// Collision extents.
    pub body: BodySize,
    /// How high the agent can jump, in world units.
    pub jump_height: f32,
    /// Whether the agent is currently off the ground (jumping or falling).
    /// Jump initiation itself stays with the agent's movement controller.
    pub airborne: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_max_ignores_height() {
        let body = BodySize::new(0.6, 1.8, 0.8);
        assert_eq!(body.horizontal_max(), 0.8);
    }

    #[test]
    fn longest_axis_considers_height() {
        let body = BodySize::new(0.6, 1.8, 0.8);
        assert_eq!(body.longest_axis(), 1.8);
    }
}
