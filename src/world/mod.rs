pub mod ctx;
pub mod layer;
pub mod tile;
