use crate::math::{SMALLEST_DISTANCE, TILE_SIZE};

/// Hitbox edge a node sits on, or a collision was triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Direction of travel that leads with this edge: -1 for left/top.
    pub fn sign(self) -> f32 {
        match self {
            Edge::Left | Edge::Top => -1.0,
            Edge::Right | Edge::Bottom => 1.0,
        }
    }

    pub fn leading_x(dx: f32) -> Edge {
        if dx > 0.0 { Edge::Right } else { Edge::Left }
    }

    pub fn leading_y(dy: f32) -> Edge {
        if dy > 0.0 { Edge::Bottom } else { Edge::Top }
    }
}

/// Fixed probe point relative to a hitbox's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionNode {
    x: f32,
    y: f32,
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
    centre: bool,
}

impl CollisionNode {
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn is_on(&self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    /// Horizontally centred on the hitbox.
    pub fn is_centre(&self) -> bool {
        self.centre
    }

    /// The bottom-centre node floor slopes align to the ramp.
    pub fn is_floor_slope_node(&self) -> bool {
        self.bottom && self.centre
    }

    /// The top-centre node ceiling slopes align to the ramp.
    pub fn is_ceiling_slope_node(&self) -> bool {
        self.top && self.centre
    }
}

/// Offsets along one side: one per tile, plus the far edge.
fn edge_offsets(length: f32) -> Vec<f32> {
    let far = length - SMALLEST_DISTANCE;
    let mut offsets = Vec::new();
    let mut offset = 0.0;
    while offset < far {
        offsets.push(offset);
        offset += TILE_SIZE;
    }
    offsets.push(far);
    offsets
}

/// Perimeter nodes for a `width` x `height` hitbox.
///
/// Neighbouring nodes are never more than one tile apart so no tile can
/// slip between them. Right/bottom nodes sit one [`SMALLEST_DISTANCE`]
/// inside the box, matching the exclusive far edges of tiles.
pub fn generate_nodes(width: f32, height: f32) -> Vec<CollisionNode> {
    let far_x = width - SMALLEST_DISTANCE;
    let far_y = height - SMALLEST_DISTANCE;
    let centre_x = width / 2.0;

    let mut xs = edge_offsets(width);
    xs.push(centre_x);
    xs.sort_by(f32::total_cmp);
    xs.dedup();
    let ys = edge_offsets(height);

    let mut nodes = Vec::new();
    for &y in &ys {
        for &x in &xs {
            let node = CollisionNode {
                x,
                y,
                left: x == 0.0,
                right: x == far_x,
                top: y == 0.0,
                bottom: y == far_y,
                centre: x == centre_x,
            };
            if node.left || node.right || node.top || node.bottom {
                nodes.push(node);
            }
        }
    }
    nodes
}
