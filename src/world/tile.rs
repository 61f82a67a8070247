use serde::Deserialize;

/// Orientation of a 45° ramp tile.
///
/// "Floor" slopes are solid underneath the ramp, "ceiling" slopes above it.
/// Right* ramps run from the tile's top-left corner to its bottom-right
/// corner, Left* ramps from bottom-left to top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SlopeKind {
    RightFloor,
    LeftFloor,
    RightCeiling,
    LeftCeiling,
}

impl SlopeKind {
    pub const ALL: [SlopeKind; 4] = [
        SlopeKind::RightFloor,
        SlopeKind::LeftFloor,
        SlopeKind::RightCeiling,
        SlopeKind::LeftCeiling,
    ];

    pub fn is_floor(self) -> bool {
        matches!(self, SlopeKind::RightFloor | SlopeKind::LeftFloor)
    }

    pub fn is_ceiling(self) -> bool {
        !self.is_floor()
    }
}

/// Behaviour of a tile. Closed set: every consumer matches it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum TileKind {
    #[default]
    Air,
    Solid,
    /// One-way platform, only blocks bodies landing on it from above.
    Platform,
    Slope(SlopeKind),
}

impl TileKind {
    /// Whether primary grid probing can register collisions against it.
    pub fn is_collidable(self) -> bool {
        !matches!(self, TileKind::Air)
    }

    /// Whether it rewrites collision results after primary probing.
    pub fn needs_post_processing(self) -> bool {
        matches!(self, TileKind::Slope(_))
    }

    pub fn slope(self) -> Option<SlopeKind> {
        match self {
            TileKind::Slope(kind) => Some(kind),
            _ => None,
        }
    }
}
