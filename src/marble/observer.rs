use std::collections::BTreeMap;

use crate::models::Point3D;

/// Outputs raised by the solver at the end of each tick.
///
/// Every method has a no-op default so implementors only override what
/// they care about; `()` ignores everything.
pub trait MarbleObserver {
    /// Named float output, e.g. the contact percentage.
    fn set_float_variable(&mut self, _name: &str, _value: f64) {}

    fn update_roll_sound(&mut self, _contact_pct: f64, _slip_amount: f64) {}

    /// First bounce of a tick, with the impact speed along the normal.
    fn play_bounce_sound(&mut self, _speed: f64) {}

    fn play_jump_sound(&mut self) {}

    /// Final position of the tick, after the world has been notified.
    fn position_committed(&mut self, _position: Point3D) {}
}

impl MarbleObserver for () {}

impl<O: MarbleObserver + ?Sized> MarbleObserver for &mut O {
    fn set_float_variable(&mut self, name: &str, value: f64) { (**self).set_float_variable(name, value) }
    fn update_roll_sound(&mut self, contact_pct: f64, slip_amount: f64) { (**self).update_roll_sound(contact_pct, slip_amount) }
    fn play_bounce_sound(&mut self, speed: f64) { (**self).play_bounce_sound(speed) }
    fn play_jump_sound(&mut self) { (**self).play_jump_sound() }
    fn position_committed(&mut self, position: Point3D) { (**self).position_committed(position) }
}

/// Observer that records every output, standing in for a script console.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleVariables {
    variables: BTreeMap<String, f64>,
    pub roll_sound: Option<(f64, f64)>,
    pub bounce_speeds: Vec<f64>,
    pub jumps: u32,
    pub committed: Option<Point3D>,
}

impl ConsoleVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    pub fn variables(&self) -> &BTreeMap<String, f64> {
        &self.variables
    }
}

impl MarbleObserver for ConsoleVariables {
    fn set_float_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_owned(), value);
    }

    fn update_roll_sound(&mut self, contact_pct: f64, slip_amount: f64) {
        self.roll_sound = Some((contact_pct, slip_amount));
    }

    fn play_bounce_sound(&mut self, speed: f64) {
        self.bounce_speeds.push(speed);
    }

    fn play_jump_sound(&mut self) {
        self.jumps += 1;
    }

    fn position_committed(&mut self, position: Point3D) {
        self.committed = Some(position);
    }
}
