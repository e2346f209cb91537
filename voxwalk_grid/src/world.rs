// The spatial query surface and a dense in-memory voxel world.
//
// `SpatialQuery` is the read-only contract the navigator consumes: voxel
// occupancy plus block load state for a given cell. A game host implements
// it over whatever streamed terrain storage it uses.
//
// `GridWorld` is the reference implementation: a flat `Vec<VoxelKind>`
// indexed by `x + z * size_x + y * size_x * size_z`, giving O(1) read/write
// access. Out-of-bounds reads return `EMPTY`; out-of-bounds writes are
// no-ops. Load state is tracked per 16^3 block, mirroring how streamed
// terrain loads and unloads in block granularity; cells map to blocks with
// euclidean division so negative coordinates land in the correct block.
// Out-of-bounds cells are never loaded.
//
// See also: `types.rs` for `CellCoord`/`VoxelKind`, and the `voxwalk_nav`
// crate for the search and follower logic built on this surface.

use crate::types::{CellCoord, VoxelKind};
use std::collections::BTreeSet;

/// Edge length of one load block, in cells. Terrain streams in and out in
/// blocks of this size.
pub const BLOCK_SIZE: i32 = 16;

/// Read-only spatial queries the navigator needs from the world.
pub trait SpatialQuery {
    /// Occupancy of the given cell.
    fn voxel(&self, cell: CellCoord) -> VoxelKind;

    /// Whether the block of terrain containing the cell has been streamed in.
    fn is_loaded(&self, cell: CellCoord) -> bool;
}

/// The load block containing a cell.
pub fn block_of(cell: CellCoord) -> CellCoord {
    CellCoord::new(
        cell.x.div_euclid(BLOCK_SIZE),
        cell.y.div_euclid(BLOCK_SIZE),
        cell.z.div_euclid(BLOCK_SIZE),
    )
}

/// Dense 3D voxel grid with block-granular load tracking.
#[derive(Clone, Debug, Default)]
pub struct GridWorld {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    voxels: Vec<VoxelKind>,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    /// Blocks currently streamed in, keyed by block coordinate.
    loaded_blocks: BTreeSet<CellCoord>,
}

impl GridWorld {
    /// Create a new world filled with `EMPTY`, with every in-bounds block
    /// marked loaded.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        let mut loaded_blocks = BTreeSet::new();
        let block_size = BLOCK_SIZE as u32;
        for bx in 0..(size_x.div_ceil(block_size) as i32) {
            for by in 0..(size_y.div_ceil(block_size) as i32) {
                for bz in 0..(size_z.div_ceil(block_size) as i32) {
                    loaded_blocks.insert(CellCoord::new(bx, by, bz));
                }
            }
        }
        Self {
            voxels: vec![VoxelKind::EMPTY; total],
            size_x,
            size_y,
            size_z,
            loaded_blocks,
        }
    }

    /// Check whether a cell is within bounds.
    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.z >= 0
            && (cell.x as u32) < self.size_x
            && (cell.y as u32) < self.size_y
            && (cell.z as u32) < self.size_z
    }

    /// Convert a cell to a flat index. Returns `None` if out of bounds.
    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            let x = cell.x as usize;
            let y = cell.y as usize;
            let z = cell.z as usize;
            let sx = self.size_x as usize;
            let sz = self.size_z as usize;
            Some(x + z * sx + y * sx * sz)
        } else {
            None
        }
    }

    /// Read a voxel. Returns `EMPTY` for out-of-bounds cells.
    pub fn get(&self, cell: CellCoord) -> VoxelKind {
        self.index(cell)
            .map(|i| self.voxels[i])
            .unwrap_or(VoxelKind::EMPTY)
    }

    /// Write a voxel. No-op for out-of-bounds cells.
    pub fn set(&mut self, cell: CellCoord, kind: VoxelKind) {
        if let Some(i) = self.index(cell) {
            self.voxels[i] = kind;
        }
    }

    /// Fill the inclusive box spanned by two corner cells. The corners may
    /// be given in any order.
    pub fn fill_box(&mut self, a: CellCoord, b: CellCoord, kind: VoxelKind) {
        let min = CellCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = CellCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set(CellCoord::new(x, y, z), kind);
                }
            }
        }
    }

    /// Mark one load block as streamed in or out.
    pub fn set_block_loaded(&mut self, block: CellCoord, loaded: bool) {
        if loaded {
            self.loaded_blocks.insert(block);
        } else {
            self.loaded_blocks.remove(&block);
        }
    }
}

impl SpatialQuery for GridWorld {
    fn voxel(&self, cell: CellCoord) -> VoxelKind {
        self.get(cell)
    }

    fn is_loaded(&self, cell: CellCoord) -> bool {
        self.in_bounds(cell) && self.loaded_blocks.contains(&block_of(cell))
    }
}
