use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Object-type bits used to filter collision and contact queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectMask(pub u32);

impl ObjectMask {
    pub const NONE: Self = Self(0);
    /// Plain static shapes and terrain.
    pub const STATIC: Self = Self(1 << 0);
    /// Large streamed terrain.
    pub const ATLAS: Self = Self(1 << 1);
    /// Static level interiors.
    pub const INTERIOR_MAP: Self = Self(1 << 2);
    /// Interactive shapes (pads, gems, bumpers).
    pub const SHAPE_BASE: Self = Self(1 << 3);
    /// Other marbles.
    pub const PLAYER: Self = Self(1 << 4);
    /// Invisible walls.
    pub const VEHICLE_BLOCKER: Self = Self(1 << 5);
    /// Moving platforms. These reach the solver as platform candidates,
    /// not through the static masks.
    pub const PATHED_INTERIOR: Self = Self(1 << 6);
    /// Non-solid volumes.
    pub const TRIGGER: Self = Self(1 << 7);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ObjectMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for ObjectMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for ObjectMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Identifier of a collidable object (surface owner or platform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Reference from a contact back to the object that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub kind: ObjectMask,
}
