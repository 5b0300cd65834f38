mod axis_frame;

pub use axis_frame::*;

#[cfg(test)]
mod axis_frame_tests;
