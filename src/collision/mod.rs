mod world;
mod polygon;
mod static_world;

pub use world::*;
pub use polygon::*;
pub use static_world::*;
