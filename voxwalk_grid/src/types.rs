// Core spatial types shared by the grid and the navigator.
//
// Defines integer cell coordinates (`CellCoord`), world-space float vectors
// (`WorldVec`), and the opaque voxel occupancy identifier (`VoxelKind`).
// All types derive `Serialize` and `Deserialize` so hosts can persist or
// transfer them alongside their own state.
//
// The coordinate system uses right-handed conventions:
// - X: east  (positive) / west  (negative)
// - Y: up    (positive) / down  (negative)
// - Z: south (positive) / north (negative)
//
// An agent standing in cell `(x, y, z)` has its world position on the cell's
// ground plane: `y` equals the cell's y, and the cell center is at
// `(x + 0.5, y, z + 0.5)`. `WorldVec::align` is the inverse mapping (floor
// each component), so positions anywhere inside a cell align back to it,
// including negative coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Cell coordinates
// ---------------------------------------------------------------------------

/// A position in the 3D voxel grid. Each component is in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell shifted by the given component deltas.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The cell directly above (one unit in +y).
    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// Component-wise sign, each component in {-1, 0, 1}.
    pub const fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum(), self.z.signum())
    }

    /// Center of the cell's ground plane in world space: half a cell in from
    /// the x/z corner, at ground-level y.
    pub fn center(self) -> WorldVec {
        WorldVec::new(self.x as f32 + 0.5, self.y as f32, self.z as f32 + 0.5)
    }
}

impl Add for CellCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for CellCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// World-space vectors
// ---------------------------------------------------------------------------

/// A position, velocity, or direction in continuous world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldVec {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldVec {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Projection onto the horizontal (xz) plane: same vector with y zeroed.
    pub const fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 { self * (1.0 / len) } else { Self::ZERO }
    }

    /// The grid cell containing this position (component-wise floor).
    pub fn align(self) -> CellCoord {
        CellCoord::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl Add for WorldVec {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for WorldVec {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for WorldVec {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for WorldVec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// Voxel occupancy
// ---------------------------------------------------------------------------

/// Opaque occupancy/material identifier for one voxel.
///
/// The navigator only ever distinguishes empty from non-empty; everything
/// else about the id is the host's business. Id 0 is reserved for empty
/// space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelKind(pub u16);

impl VoxelKind {
    /// Empty space — air, nothing to stand on, nothing in the way.
    pub const EMPTY: Self = Self(0);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}
