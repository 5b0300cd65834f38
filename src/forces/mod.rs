mod move_forces;
mod external_forces;

pub use move_forces::*;
pub use external_forces::*;

#[cfg(test)]
mod forces_tests;
