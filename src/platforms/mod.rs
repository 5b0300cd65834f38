mod pathed_interior;
mod coordinator;

pub use pathed_interior::*;
pub use coordinator::*;
