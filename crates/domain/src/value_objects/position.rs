//! A point in a world, with orientation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::WorldId;

/// An immutable world position: coordinates plus look angles.
///
/// Equality is plain value equality over all five numeric fields and the
/// world identifier. The ignore-latch comparison in a teleport session
/// relies on this: a relocation event is suppressed only when its
/// destination matches the latched position exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    world: WorldId,
    x: f64,
    y: f64,
    z: f64,
    pitch: f32,
    yaw: f32,
}

impl Position {
    pub fn new(world: WorldId, x: f64, y: f64, z: f64, pitch: f32, yaw: f32) -> Self {
        Self {
            world,
            x,
            y,
            z,
            pitch,
            yaw,
        }
    }

    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Returns a copy of this position carrying the look angles of `other`.
    ///
    /// Used by the "put" operation: the placed actor keeps facing the way
    /// they already were, regardless of the destination's orientation.
    pub fn with_orientation_of(&self, other: &Position) -> Self {
        Self {
            pitch: other.pitch,
            yaw: other.yaw,
            ..*self
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}) in {}",
            self.x, self.y, self.z, self.world
        )
    }
}
