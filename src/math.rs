/// Edge length of one tile in world units.
pub const TILE_SIZE: f32 = 1.0;

/// Smallest distance the engine distinguishes. Tile right/bottom edges are
/// exclusive by this much so neighbouring tiles never claim the same point.
pub const SMALLEST_DISTANCE: f32 = 1e-4;

/// Largest displacement allowed per axis in one movement attempt.
pub const MAX_STEP: f32 = TILE_SIZE - SMALLEST_DISTANCE;

/// Tile index containing the world coordinate `v`.
pub fn tile_coord(v: f32) -> i32 {
    (v / TILE_SIZE).floor() as i32
}

/// Axis-aligned bounding box in world units, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn from_top_left(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min_x: x,
            max_x: x + w,
            min_y: y,
            max_y: y + h,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max_x > other.min_x
            && self.min_x < other.max_x
            && self.max_y > other.min_y
            && self.min_y < other.max_y
    }
}
