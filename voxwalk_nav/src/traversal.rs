// Line-of-traversal validation between adjacent cells.
//
// A naive 26-neighbor search would happily send an agent through the corner
// where two walls meet: both diagonal cells are individually standable, but
// the move between them passes through solid geometry. `is_clear` walks the
// move one unit-axis step at a time and rejects it if no step order gets
// through.
//
// The walk prefers to resolve the x component, then z, and touches y last.
// Stepping upward additionally requires the voxel directly overhead to be
// empty (no climbing head-first into a ceiling); stepping downward has no
// extra requirement — falling takes care of itself.
//
// Used by `search.rs` as an edge filter, and usable standalone as a short
// line-of-movement check between any two cells within one move of each
// other.

use voxwalk_grid::types::CellCoord;
use voxwalk_grid::world::SpatialQuery;

/// Whether an agent can move from `from` to `to` (any of the 26 adjacent
/// offsets) without clipping through solid geometry.
///
/// `clearance` decides which intermediate cells the agent may occupy; the
/// caller is expected to have already validated `to` itself.
pub fn is_clear<W, C>(world: &W, from: CellCoord, to: CellCoord, clearance: C) -> bool
where
    W: SpatialQuery,
    C: Fn(CellCoord) -> bool,
{
    let delta = (to - from).signum();
    let step_x = CellCoord::new(delta.x, 0, 0);
    let step_y = CellCoord::new(0, delta.y, 0);
    let step_z = CellCoord::new(0, 0, delta.z);

    let mut at = from;
    while at != to {
        if at.x != to.x && clearance(at + step_x) {
            at = at + step_x;
        } else if at.z != to.z && clearance(at + step_z) {
            at = at + step_z;
        } else if at.y != to.y {
            if delta.y > 0 && !world.voxel(at + step_y).is_empty() {
                return false;
            }
            at = at + step_y;
        } else {
            return false;
        }
    }

    true
}
