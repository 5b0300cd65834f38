use crate::models::Point3D;

/// Previous/current position pair used to interpolate between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PresentationDelta {
    /// Position at the end of the last tick.
    pub pos: Point3D,
    /// Offset from `pos` back to the position at the start of that tick.
    pub pos_vec: Point3D,
}

impl PresentationDelta {
    pub fn begin(&mut self, previous: Point3D) {
        self.pos_vec = previous;
    }

    pub fn finish(&mut self, current: Point3D) {
        self.pos = current;
        self.pos_vec = self.pos_vec - current;
    }

    /// Render position `backward` of a tick before the latest one, with
    /// `backward` in `[0, 1]`.
    pub fn interpolate(&self, backward: f64) -> Point3D {
        self.pos + self.pos_vec * backward
    }
}

/// Position where a sub-step was cut short, and the fraction of the tick
/// at which it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathBreakpoint {
    pub position: Point3D,
    pub time_fraction: f64,
}

/// Breakpoints recorded during one tick, up to a fixed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePath {
    breakpoints: Vec<PathBreakpoint>,
    capacity: usize,
}

impl MovePath {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { breakpoints: Vec::with_capacity(capacity), capacity }
    }

    pub fn clear(&mut self) {
        self.breakpoints.clear();
    }

    pub fn has_room(&self) -> bool {
        self.breakpoints.len() < self.capacity
    }

    /// Records a breakpoint unless the path is full.
    pub fn try_push(&mut self, breakpoint: PathBreakpoint) -> bool {
        if !self.has_room() {
            return false;
        }
        self.breakpoints.push(breakpoint);
        true
    }

    pub fn breakpoints(&self) -> &[PathBreakpoint] {
        &self.breakpoints
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }
}
