mod coordinates;
mod point3d;
mod box3d;
mod quaternion;
mod object_mask;
mod move_input;
mod marble_state;

pub use coordinates::*;
pub use point3d::*;
pub use box3d::*;
pub use quaternion::*;
pub use object_mask::*;
pub use move_input::*;
pub use marble_state::*;
