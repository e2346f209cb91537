// A* path search over the implicit grid of standable cells.
//
// There is no prebuilt graph: the 26-cell neighborhood is enumerated on the
// fly and filtered through three predicates — block load state, a clearance
// function (can the agent stand there?), and the traversal validator (can it
// get there without clipping a corner?). `find_path` wires in the default
// clearance/cost/heuristic; `find_path_with` accepts custom ones.
//
// The open list is a `BinaryHeap` (min-heap via reversed ordering) keyed by
// f-score with `total_cmp`, ties broken by cell coordinate, so identical
// queries over identical terrain return identical paths. Stale heap entries
// are skipped via the closed set rather than re-keyed. All bookkeeping maps
// (`FxHashMap`/`FxHashSet`) are scoped to one call and dropped with it —
// nothing is reused across searches.
//
// The default heuristic is *not* admissible: squared horizontal distance,
// halved. It overestimates long distances badly, which makes the search
// greedy and cheap instead of strictly optimal — the right trade for steering
// agents through a large streamed grid. `max_depth` bounds expansion along
// any branch, so a search toward an unreachable goal cannot run away.
//
// See also: `traversal.rs` for the edge filter, `navigator.rs` for endpoint
// alignment and repair before the search is issued.

use crate::config::NavConfig;
use crate::traversal;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use voxwalk_grid::types::CellCoord;
use voxwalk_grid::world::SpatialQuery;

/// Entry in the A* open list (min-heap via reversed ordering).
struct OpenEntry {
    cell: CellCoord,
    f_score: f32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.total_cmp(&other.f_score) == Ordering::Equal && self.cell == other.cell
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score is "greatest".
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

/// Whether an agent can stand in `cell`: the cell's own voxel is solid
/// ground, the cell above it is empty headroom, and the terrain is loaded.
pub fn standing_clearance<W: SpatialQuery>(world: &W, cell: CellCoord) -> bool {
    world.is_loaded(cell)
        && !world.voxel(cell).is_empty()
        && world.voxel(cell.above()).is_empty()
}

/// Default edge weight: squared horizontal displacement, plus `ascent_cost`
/// per voxel of rise. Descending is free — gravity assists it.
pub fn step_cost(from: CellCoord, to: CellCoord, ascent_cost: f32) -> f32 {
    let dx = (to.x - from.x) as f32;
    let dz = (to.z - from.z) as f32;
    let horizontal = dx * dx + dz * dz;
    let rise = (to.y - from.y) as f32;
    if rise > 0.0 {
        horizontal + rise * ascent_cost
    } else {
        horizontal
    }
}

/// Default heuristic: squared horizontal distance (y ignored), scaled.
pub fn move_heuristic(from: CellCoord, to: CellCoord, weight: f32) -> f32 {
    let dx = (to.x - from.x) as f32;
    let dz = (to.z - from.z) as f32;
    (dx * dx + dz * dz) * weight
}

/// The 26 cells adjacent to `cell` (every offset in {-1, 0, 1} on each axis
/// except the cell itself). The straight-up and straight-down offsets can
/// never pass clearance from a standable cell, so they need no special case.
pub fn neighborhood(cell: CellCoord) -> SmallVec<[CellCoord; 26]> {
    let mut cells = SmallVec::new();
    for dx in -1..=1 {
        for dy in -1..=1 {
            for dz in -1..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                cells.push(cell.offset(dx, dy, dz));
            }
        }
    }
    cells
}

/// Find a path from `from` to `to` using the default clearance, cost, and
/// heuristic. Returns the waypoint cells from the first step (start
/// exclusive) to the goal, or `None` if the frontier empties first.
pub fn find_path<W: SpatialQuery>(
    world: &W,
    from: CellCoord,
    to: CellCoord,
    config: &NavConfig,
) -> Option<Vec<CellCoord>> {
    let ascent_cost = config.ascent_cost;
    let weight = config.heuristic_weight;
    find_path_with(
        world,
        from,
        to,
        |cell| standing_clearance(world, cell),
        |a, b| step_cost(a, b, ascent_cost),
        |a, b| move_heuristic(a, b, weight),
        config.max_search_depth,
    )
}

/// Find a path from `from` to `to` with caller-supplied clearance, cost,
/// and heuristic functions.
///
/// Every candidate neighbor must be loaded, pass `clearance`, and pass the
/// traversal validator from the current cell before it is relaxed. Cells
/// more than `max_depth` edges from the start are not expanded; that prunes
/// the branch, it does not fail the search.
pub fn find_path_with<W, C, K, H>(
    world: &W,
    from: CellCoord,
    to: CellCoord,
    clearance: C,
    cost: K,
    heuristic: H,
    max_depth: u32,
) -> Option<Vec<CellCoord>>
where
    W: SpatialQuery,
    C: Fn(CellCoord) -> bool,
    K: Fn(CellCoord, CellCoord) -> f32,
    H: Fn(CellCoord, CellCoord) -> f32,
{
    // g_score[cell] = cost of the cheapest known path from the start.
    let mut g_score: FxHashMap<CellCoord, f32> = FxHashMap::default();
    // came_from[cell] = predecessor on that cheapest path. The start has no
    // entry, which is what terminates reconstruction.
    let mut came_from: FxHashMap<CellCoord, CellCoord> = FxHashMap::default();
    // depth[cell] = number of edges from the start.
    let mut depth: FxHashMap<CellCoord, u32> = FxHashMap::default();
    let mut closed: FxHashSet<CellCoord> = FxHashSet::default();

    g_score.insert(from, 0.0);
    depth.insert(from, 0);

    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        cell: from,
        f_score: heuristic(from, to),
    });

    while let Some(current) = open.pop() {
        let current = current.cell;

        if current == to {
            return Some(reconstruct_path(&came_from, current));
        }

        if !closed.insert(current) {
            continue;
        }

        let current_depth = depth[&current];
        if current_depth > max_depth {
            continue;
        }
        let current_g = g_score[&current];

        for neighbor in neighborhood(current) {
            if closed.contains(&neighbor) {
                continue;
            }
            if !world.is_loaded(neighbor) {
                continue;
            }
            if !clearance(neighbor) || !traversal::is_clear(world, current, neighbor, &clearance) {
                continue;
            }

            let tentative_g = current_g + cost(current, neighbor);

            if tentative_g < g_score.get(&neighbor).copied().unwrap_or(f32::INFINITY) {
                g_score.insert(neighbor, tentative_g);
                came_from.insert(neighbor, current);
                depth.insert(neighbor, current_depth + 1);
                open.push(OpenEntry {
                    cell: neighbor,
                    f_score: tentative_g + heuristic(neighbor, to),
                });
            }
        }
    }

    None // Frontier exhausted — no path.
}

/// Walk predecessors from the goal back to the start (which has no entry)
/// and reverse, yielding a start-exclusive waypoint sequence.
fn reconstruct_path(came_from: &FxHashMap<CellCoord, CellCoord>, goal: CellCoord) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(current);
        current = prev;
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxwalk_grid::types::VoxelKind;
    use voxwalk_grid::world::GridWorld;

    const GROUND: VoxelKind = VoxelKind(1);

    fn floored_world(size: u32) -> GridWorld {
        let mut world = GridWorld::new(size, 16, size);
        world.fill_box(
            CellCoord::new(0, 0, 0),
            CellCoord::new(size as i32 - 1, 0, size as i32 - 1),
            GROUND,
        );
        world
    }

    #[test]
    fn neighborhood_has_26_cells() {
        let cells = neighborhood(CellCoord::new(0, 0, 0));
        assert_eq!(cells.len(), 26);
        // No duplicate offsets, none equal to the center.
        for (i, a) in cells.iter().enumerate() {
            assert_ne!(*a, CellCoord::new(0, 0, 0));
            for b in &cells[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn clearance_requires_floor_headroom_and_load() {
        let mut world = floored_world(16);
        assert!(standing_clearance(&world, CellCoord::new(4, 0, 4)));
        // No floor.
        assert!(!standing_clearance(&world, CellCoord::new(4, 1, 4)));
        // No headroom.
        world.set(CellCoord::new(5, 1, 4), GROUND);
        assert!(!standing_clearance(&world, CellCoord::new(5, 0, 4)));
        // Not loaded.
        world.set_block_loaded(CellCoord::new(0, 0, 0), false);
        assert!(!standing_clearance(&world, CellCoord::new(4, 0, 4)));
    }

    #[test]
    fn step_cost_charges_ascent_only() {
        let base = CellCoord::new(0, 0, 0);
        assert_eq!(step_cost(base, CellCoord::new(1, 0, 0), 2.8), 1.0);
        assert_eq!(step_cost(base, CellCoord::new(1, 0, 1), 2.8), 2.0);
        assert_eq!(step_cost(base, CellCoord::new(1, 1, 0), 2.8), 3.8);
        // Descending the same step is just the horizontal term.
        assert_eq!(step_cost(base, CellCoord::new(1, -1, 0), 2.8), 1.0);
    }

    #[test]
    fn heuristic_ignores_height() {
        let a = CellCoord::new(0, 0, 0);
        let b = CellCoord::new(3, 9, 4);
        assert_eq!(move_heuristic(a, b, 0.5), 12.5);
    }

    #[test]
    fn straight_corridor_path_is_minimal() {
        // Corridor one cell wide: walls leave only z=4 standable.
        let mut world = floored_world(16);
        world.fill_box(CellCoord::new(0, 1, 3), CellCoord::new(15, 1, 3), GROUND);
        world.fill_box(CellCoord::new(0, 1, 5), CellCoord::new(15, 1, 5), GROUND);

        let from = CellCoord::new(2, 0, 4);
        let to = CellCoord::new(9, 0, 4);
        let path = find_path(&world, from, to, &NavConfig::default()).unwrap();

        // Start-exclusive: one cell per step, ending at the goal.
        let expected: Vec<CellCoord> = (3..=9).map(|x| CellCoord::new(x, 0, 4)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn trivial_goal_yields_empty_path() {
        let world = floored_world(16);
        let cell = CellCoord::new(4, 0, 4);
        let path = find_path(&world, cell, cell, &NavConfig::default()).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let mut world = floored_world(16);
        // A closed ring of head-height wall around the goal.
        for x in 7..=11 {
            for z in 7..=11 {
                if x == 7 || x == 11 || z == 7 || z == 11 {
                    world.set(CellCoord::new(x, 1, z), GROUND);
                    world.set(CellCoord::new(x, 2, z), GROUND);
                }
            }
        }
        let from = CellCoord::new(2, 0, 2);
        let to = CellCoord::new(9, 0, 9);
        assert!(find_path(&world, from, to, &NavConfig::default()).is_none());
    }

    #[test]
    fn path_climbs_steps_one_voxel_at_a_time() {
        let mut world = GridWorld::new(16, 16, 16);
        // Terraced floor: y rises by one every two cells of x.
        for x in 0..16 {
            let y = (x / 2).min(5);
            world.fill_box(CellCoord::new(x, 0, 0), CellCoord::new(x, y, 15), GROUND);
        }
        let from = CellCoord::new(1, 0, 4);
        let to = CellCoord::new(11, 5, 4);
        let path = find_path(&world, from, to, &NavConfig::default()).unwrap();
        assert_eq!(path.last(), Some(&to));
        // Every step rises at most one voxel.
        let mut prev = from;
        for cell in &path {
            assert!(cell.y - prev.y <= 1);
            prev = *cell;
        }
    }

    #[test]
    fn unloaded_gap_blocks_the_only_route() {
        // 48-cell corridor spanning three load blocks; the middle block is
        // unloaded, so the far side must be unreachable.
        let mut world = GridWorld::new(48, 16, 16);
        world.fill_box(CellCoord::new(0, 0, 0), CellCoord::new(47, 0, 15), GROUND);
        world.set_block_loaded(CellCoord::new(1, 0, 0), false);

        let from = CellCoord::new(4, 0, 8);
        let to = CellCoord::new(44, 0, 8);
        assert!(find_path(&world, from, to, &NavConfig::default()).is_none());
    }

    #[test]
    fn returned_path_never_leaves_loaded_space() {
        let mut world = GridWorld::new(48, 16, 32);
        world.fill_box(CellCoord::new(0, 0, 0), CellCoord::new(47, 0, 31), GROUND);
        // One unloaded block the route could have cut through.
        world.set_block_loaded(CellCoord::new(1, 0, 0), false);

        let from = CellCoord::new(4, 0, 8);
        let to = CellCoord::new(44, 0, 8);
        let path = find_path(&world, from, to, &NavConfig::default()).unwrap();
        for cell in &path {
            assert!(world.is_loaded(*cell), "cell {cell} is not loaded");
        }
    }

    #[test]
    fn max_depth_bounds_reachable_distance() {
        let world = floored_world(64);
        let from = CellCoord::new(2, 0, 2);
        let to = CellCoord::new(40, 0, 2);

        let shallow = NavConfig {
            max_search_depth: 8,
            ..NavConfig::default()
        };
        assert!(find_path(&world, from, to, &shallow).is_none());
        assert!(find_path(&world, from, to, &NavConfig::default()).is_some());
    }

    #[test]
    fn repeated_searches_return_identical_paths() {
        let mut world = floored_world(32);
        // Scatter a few pillars so the route is not a single straight line.
        for &(x, z) in &[(8, 8), (9, 12), (14, 9), (17, 15), (20, 11)] {
            world.set(CellCoord::new(x, 1, z), GROUND);
            world.set(CellCoord::new(x, 2, z), GROUND);
        }
        let from = CellCoord::new(2, 0, 2);
        let to = CellCoord::new(28, 0, 26);
        let config = NavConfig::default();

        let first = find_path(&world, from, to, &config).unwrap();
        let second = find_path(&world, from, to, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_path_edge_passes_the_traversal_validator() {
        let mut world = floored_world(32);
        for &(x, z) in &[(6, 6), (7, 7), (10, 5), (12, 12), (15, 8)] {
            world.set(CellCoord::new(x, 1, z), GROUND);
            world.set(CellCoord::new(x, 2, z), GROUND);
        }
        let from = CellCoord::new(2, 0, 2);
        let to = CellCoord::new(20, 0, 18);
        let path = find_path(&world, from, to, &NavConfig::default()).unwrap();

        let mut prev = from;
        for cell in &path {
            assert!(
                traversal::is_clear(&world, prev, *cell, |c| standing_clearance(&world, c)),
                "edge {prev} -> {cell} fails re-validation"
            );
            prev = *cell;
        }
    }
}
