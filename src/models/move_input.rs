/// Trigger slot that requests a jump.
pub const JUMP_TRIGGER: usize = 2;

/// Number of trigger slots carried by a move.
pub const MAX_TRIGGERS: usize = 6;

/// Per-tick player input snapshot.
///
/// `x`/`y` are analog stick axes in `[-1, 1]`; `yaw`/`pitch`/`roll` are look
/// deltas in radians accumulated since the previous move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Move {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub triggers: [bool; MAX_TRIGGERS],
}

impl Move {
    /// A move with only the stick axes set.
    pub fn with_stick(x: f64, y: f64) -> Self {
        Self { x, y, ..Self::default() }
    }

    pub fn jump(&self) -> bool {
        self.triggers[JUMP_TRIGGER]
    }

    pub fn with_jump(mut self) -> Self {
        self.triggers[JUMP_TRIGGER] = true;
        self
    }
}
