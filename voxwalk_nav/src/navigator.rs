// Move requests and per-tick path following.
//
// `Navigator` owns the active path: an ordered list of waypoint cells (start
// exclusive, goal last) plus a cursor marking the next unvisited waypoint.
// `request_move` aligns the endpoints to grid cells, repairs a start that
// aligned onto an invalid cell, and replaces the path wholesale with a fresh
// search result — the old path is gone even when the new search fails.
// `tick` runs once per fixed simulation step and turns the current waypoint
// into a steering vector for the agent's own movement update.
//
// An empty path is the idle state, and every failure collapses into it:
// unreachable goal, unusable endpoints, or a stall (no meaningful movement
// across a 5-second window — dynamic obstruction, terrain change, a ledge
// the agent cannot actually climb). None of these raise errors; the agent
// just stops receiving steering until the caller requests a new move.
//
// Stall timing is an explicit elapsed-milliseconds accumulator fed by the
// caller's tick delta, not a clock read, so the navigator stays host- and
// framerate-agnostic.
//
// See also: `search.rs` for the path search, `agent.rs` for the snapshot
// consumed each tick, `config.rs` for the tunables.

use crate::agent::AgentSnapshot;
use crate::config::NavConfig;
use crate::search;
use log::{debug, trace};
use voxwalk_grid::types::{CellCoord, WorldVec};
use voxwalk_grid::world::SpatialQuery;

/// Computes paths on request and steers an agent along them tick by tick.
/// One navigator serves one agent.
#[derive(Clone, Debug)]
pub struct Navigator {
    config: NavConfig,
    /// Waypoints from the first step to the goal. Empty means idle.
    path: Vec<CellCoord>,
    /// Index of the next unvisited waypoint. In `[0, path.len())` whenever
    /// the path is non-empty.
    cursor: usize,
    /// Milliseconds accumulated toward the next stall evaluation.
    stall_elapsed_ms: u64,
    /// Agent position sampled at the last stall evaluation.
    stall_anchor: WorldVec,
}

impl Navigator {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
            cursor: 0,
            stall_elapsed_ms: 0,
            stall_anchor: WorldVec::ZERO,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Whether a path is currently being followed.
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// The remaining path, next waypoint first. For debug visualization.
    pub fn path(&self) -> &[CellCoord] {
        &self.path[self.cursor..]
    }

    /// World position of the waypoint currently steered toward.
    pub fn current_waypoint(&self) -> Option<WorldVec> {
        self.path.get(self.cursor).map(|cell| cell.center())
    }

    /// Compute a path from the agent's position to `target`, replacing any
    /// existing path. On failure the navigator is left idle.
    pub fn request_move<W: SpatialQuery>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        target: WorldVec,
    ) {
        // The previous path dies with the request, even if the search fails.
        self.path.clear();
        self.cursor = 0;

        let mut from = agent.position.align();
        let to = target.align();

        if !search::standing_clearance(world, from) {
            // Standing on the edge of a valid cell can leave the aligned
            // position over an invalid one. Find the cell the agent is
            // actually standing on.
            let radius = agent.body.longest_axis().ceil() as i32;
            let Some(repaired) = repair_start(world, from, radius) else {
                debug!("move request dropped: no standable cell within {radius} of {from}");
                return;
            };
            from = repaired;

            if !search::standing_clearance(world, to) {
                debug!("move request dropped: goal cell {to} is not standable");
                return;
            }
        }

        match search::find_path(world, from, to, &self.config) {
            Some(path) => {
                trace!("path found: {} cells, {from} -> {to}", path.len());
                self.path = path;
                self.cursor = 0;
                self.stall_elapsed_ms = 0;
                self.stall_anchor = agent.position;
            }
            None => debug!("no path {from} -> {to}"),
        }
    }

    /// Advance the follower by one simulation step of `dt_ms` milliseconds
    /// and return the desired movement vector for the agent.
    ///
    /// The vector is a horizontal unit direction scaled by a strength in
    /// `[steer_min, steer_max]`; the agent's movement controller decides
    /// what acceleration that becomes.
    pub fn tick(&mut self, agent: &AgentSnapshot, dt_ms: u64) -> WorldVec {
        if self.path.is_empty() {
            return WorldVec::ZERO;
        }

        let target = self.path[self.cursor].center();
        let is_last = self.cursor == self.path.len() - 1;

        // Arrival tolerance scales with the agent's footprint: tight on the
        // final waypoint for a precise stop, looser (but never below the
        // configured floor) on the way.
        let footprint = agent.body.horizontal_max();
        let tolerance = if is_last {
            footprint * self.config.final_tolerance_factor
        } else {
            (footprint * self.config.waypoint_tolerance_factor)
                .max(self.config.waypoint_tolerance_min)
        };

        let diff = target - agent.position;
        let h_diff = diff.horizontal();

        let mut steering = h_diff.normalized()
            * h_diff
                .length()
                .clamp(self.config.steer_min, self.config.steer_max);

        if diff.y > agent.jump_height * self.config.jump_rise_factor {
            // The waypoint is a climb; getting up there is the agent's own
            // jump control's business. Plain steering lines up the approach.
        } else if (diff.y < -self.config.descent_threshold || is_last)
            && agent.velocity.horizontal().length() > self.config.brake_speed
        {
            // Precision braking for descents and the final approach: a brief
            // reversal beats overshooting the waypoint.
            steering = -steering;
        }

        if h_diff.length_squared() < tolerance * tolerance
            && diff.y.abs() < self.config.vertical_tolerance
        {
            self.cursor += 1;
            if self.cursor >= self.path.len() {
                // Goal reached; the path has served its purpose.
                self.path.clear();
                self.cursor = 0;
            }
        }

        self.stall_elapsed_ms += dt_ms;
        if self.stall_elapsed_ms > self.config.stall_check_interval_ms {
            let moved_sq = (agent.position - self.stall_anchor).length_squared();
            let min_move = self.config.stall_distance;
            if !self.path.is_empty() && moved_sq < min_move * min_move {
                debug!(
                    "stalled with {} waypoints left; clearing path",
                    self.path.len() - self.cursor
                );
                self.path.clear();
                self.cursor = 0;
            }
            self.stall_elapsed_ms = 0;
            self.stall_anchor = agent.position;
        }

        steering
    }
}

/// Scan a square horizontal window around `from` (same y), row-major, for
/// the first standable cell.
fn repair_start<W: SpatialQuery>(world: &W, from: CellCoord, radius: i32) -> Option<CellCoord> {
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            let cell = from.offset(dx, 0, dz);
            if search::standing_clearance(world, cell) {
                return Some(cell);
            }
        }
    }
    None
}
