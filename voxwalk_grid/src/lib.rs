// voxwalk_grid — spatial foundation for the voxel navigator.
//
// This crate defines the coordinate and occupancy types the navigator is
// built on, the read-only `SpatialQuery` surface it consumes, and a dense
// in-memory `GridWorld` that implements that surface with block-granular
// load tracking. It knows nothing about searching or steering.
//
// Module overview:
// - `types.rs`: `CellCoord` (integer grid cells), `WorldVec` (world-space
//   float vectors), `VoxelKind` (opaque occupancy identifiers).
// - `world.rs`: the `SpatialQuery` trait and `GridWorld`, a flat-`Vec` voxel
//   grid with 16^3 load blocks.
//
// The companion crate `voxwalk_nav` layers path search and path following
// on top of this surface. A game host would implement `SpatialQuery` over
// its own streamed terrain instead of using `GridWorld`.

pub mod types;
pub mod world;
