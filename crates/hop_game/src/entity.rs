use crate::collision::Aabb;
use crate::enemy::Enemy;
use crate::player::Player;

/// A static one-tile platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub aabb: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Platform,
    Enemy,
}

/// Borrowed view over any entity, used where all kinds are treated alike
/// (drawing, counting).
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Platform(&'a Platform),
    Enemy(&'a Enemy),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Player(_) => EntityKind::Player,
            Self::Platform(_) => EntityKind::Platform,
            Self::Enemy(_) => EntityKind::Enemy,
        }
    }

    pub fn aabb(&self) -> Aabb {
        match self {
            Self::Player(player) => player.aabb,
            Self::Platform(platform) => platform.aabb,
            Self::Enemy(enemy) => enemy.aabb,
        }
    }
}
