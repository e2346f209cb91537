// voxwalk_nav — autonomous-agent navigation for partially-loaded voxel worlds.
//
// Given a start and goal position, this crate computes a traversable path
// through a 3D block grid and steers an agent along it tick by tick,
// detecting when the agent is stuck and dropping the path so the caller can
// re-plan. It consumes the read-only `SpatialQuery` surface from
// `voxwalk_grid` plus a per-tick `AgentSnapshot`, and produces a desired
// movement vector; it never moves the agent or touches rendering itself.
//
// Module overview:
// - `navigator.rs`: `Navigator` — owns the active path, handles move
//   requests (endpoint alignment + start-cell repair + search) and the
//   per-tick follower (steering, waypoint advance, stall detection).
// - `search.rs`:    A* over the implicit 26-neighborhood of standable cells,
//   with pluggable clearance/cost/heuristic functions.
// - `traversal.rs`: unit-step walk validating that a move between adjacent
//   cells does not clip through solid geometry.
// - `agent.rs`:     `AgentSnapshot`/`BodySize` — the navigator's read-only
//   view of the agent.
// - `config.rs`:    `NavConfig` — every tunable, JSON-loadable.
//
// Navigation failures (unreachable goals, unusable endpoints, stalls) are
// routine in a dynamic, partially-loaded world. They never surface as
// errors: the navigator logs a `debug!` diagnostic, goes idle, and waits
// for the next move request.

pub mod agent;
pub mod config;
pub mod navigator;
pub mod search;
pub mod traversal;
