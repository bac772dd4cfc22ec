//! Two-point patrol. Enemies ignore platforms and the player entirely; the
//! bounds are fixed offsets from the spawn position and are not checked
//! against the level, so an enemy may happily walk on air.

use crate::collision::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolDirection {
    Left,
    Right,
}

impl PatrolDirection {
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub aabb: Aabb,
    pub speed: f32,
    pub direction: PatrolDirection,
    pub left_bound: f32,
    pub right_bound: f32,
    scale: f32,
}

impl Enemy {
    /// `patrol_range` is the world-space distance either side of the spawn x.
    pub fn new(x: f32, y: f32, w: f32, h: f32, speed: f32, patrol_range: f32, scale: f32) -> Self {
        Self {
            aabb: Aabb::new(x, y, w, h),
            speed,
            direction: PatrolDirection::Right,
            left_bound: x - patrol_range,
            right_bound: x + patrol_range,
            scale,
        }
    }

    pub fn update(&mut self) {
        self.aabb.x += self.speed * self.direction.sign() * self.scale;

        match self.direction {
            PatrolDirection::Right if self.aabb.x >= self.right_bound => {
                self.aabb.x = self.right_bound;
                self.direction = PatrolDirection::Left;
            }
            PatrolDirection::Left if self.aabb.x <= self.left_bound => {
                self.aabb.x = self.left_bound;
                self.direction = PatrolDirection::Right;
            }
            _ => {}
        }
    }
}
