use crate::collision::{move_and_collide, Aabb, CollisionMoveResult};
use crate::entity::Platform;

/// Player tuning. Velocities are internal pixels per tick and are
/// multiplied by `scale` when integrated into world space.
#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_impulse: f32,
    pub scale: f32,
    pub screen_width: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            gravity: 0.5,
            max_fall_speed: 10.0,
            jump_impulse: -8.0,
            scale: 3.0,
            screen_width: 960.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub aabb: Aabb,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub grounded: bool,
    pub config: PlayerConfig,
}

impl Player {
    pub fn new(aabb: Aabb, config: PlayerConfig) -> Self {
        Self {
            aabb,
            velocity_x: 0.0,
            velocity_y: 0.0,
            grounded: false,
            config,
        }
    }

    pub fn move_left(&mut self) {
        self.velocity_x = -self.config.move_speed;
    }

    pub fn move_right(&mut self) {
        self.velocity_x = self.config.move_speed;
    }

    /// Only stops motion the left key started, so releasing left while
    /// right is still held keeps the player moving right.
    pub fn stop_left(&mut self) {
        if self.velocity_x < 0.0 {
            self.velocity_x = 0.0;
        }
    }

    pub fn stop_right(&mut self) {
        if self.velocity_x > 0.0 {
            self.velocity_x = 0.0;
        }
    }

    /// Jumping is only legal from the ground; airborne requests are ignored.
    pub fn jump(&mut self) {
        if self.grounded {
            self.velocity_y = self.config.jump_impulse;
        }
    }

    pub fn update(&mut self, platforms: &[Platform]) {
        self.velocity_y = (self.velocity_y + self.config.gravity).min(self.config.max_fall_speed);

        let dx = self.velocity_x * self.config.scale;
        let dy = self.velocity_y * self.config.scale;
        let solids = platforms.iter().map(|platform| &platform.aabb);
        let result = move_and_collide(self.aabb, dx, dy, solids);
        self.apply_collision_result(result);
        self.clamp_to_screen();
    }

    fn apply_collision_result(&mut self, result: CollisionMoveResult) {
        self.aabb = result.aabb;

        // Horizontal velocity is input-driven and survives wall contact.
        if result.blocked_down || result.blocked_up {
            self.velocity_y = 0.0;
        }
        self.grounded = result.blocked_down;
    }

    /// No vertical clamp: falling off the bottom of the screen is allowed.
    fn clamp_to_screen(&mut self) {
        if self.aabb.left() < 0.0 {
            self.aabb.x = 0.0;
        }
        if self.aabb.right() > self.config.screen_width {
            self.aabb.x = self.config.screen_width - self.aabb.w;
        }
    }
}
