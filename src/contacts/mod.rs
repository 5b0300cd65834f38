mod contact;
mod velocity_cancel;
mod contact_forces;

pub use contact::*;
pub use velocity_cancel::*;
pub use contact_forces::*;

#[cfg(test)]
mod contacts_tests;
