mod marble;
mod observer;
mod presentation;

pub use marble::*;
pub use observer::*;
pub use presentation::*;

#[cfg(test)]
mod presentation_tests;
