//! The runner

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tick::TickInput;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in pixels per tick (negative is up)
    pub vel_y: f32,
    pub jumping: bool,
    /// Horizontal pixels per tick while a move key is held
    pub speed: f32,
}

impl Player {
    /// Standing on the floor at the start position, fallback size
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.player_start_x,
                tuning.field_height - tuning.player_height,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            jumping: false,
            speed: tuning.run_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Top of the runner when standing
    #[inline]
    pub fn ground_y(&self, field_height: f32) -> f32 {
        field_height - self.size.y
    }

    /// Apply jump and horizontal movement
    pub fn apply_input(&mut self, input: &TickInput, jump_impulse: f32, field_width: f32) {
        if input.jump && !self.jumping {
            self.vel_y = jump_impulse;
            self.jumping = true;
        }

        if input.left {
            self.pos.x = (self.pos.x - self.speed).max(0.0);
        }
        if input.right {
            self.pos.x = (self.pos.x + self.speed).min(field_width - self.size.x);
        }
    }

    /// Gravity, integration, floor clamp
    pub fn tick(&mut self, gravity: f32, field_height: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        let ground = self.ground_y(field_height);
        if self.pos.y > ground {
            self.pos.y = ground;
            self.jumping = false;
            self.vel_y = 0.0;
        }
    }

    /// Adopt the runner sprite's scaled size. Height changes keep the feet
    /// where they were.
    pub fn set_size(&mut self, width: f32, height: f32) {
        let feet = self.pos.y + self.size.y;
        self.size = Vec2::new(width, height);
        self.pos.y = feet - height;
    }

    /// Back to the start position, at rest on the floor
    pub fn reset(&mut self, start_x: f32, field_height: f32) {
        self.pos = Vec2::new(start_x, self.ground_y(field_height));
        self.vel_y = 0.0;
        self.jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_player_on_ground() {
        let t = Tuning::default();
        let p = Player::new(&t);
        assert_eq!(p.pos, Vec2::new(50.0, 340.0));
        assert_eq!(p.ground_y(t.field_height), 340.0);
        assert!(!p.jumping);
    }

    #[test]
    fn test_resting_player_stays_put() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        for _ in 0..10 {
            p.tick(t.gravity, t.field_height);
            assert_eq!(p.pos.y, 340.0);
            assert_eq!(p.vel_y, 0.0);
        }
    }

    #[test]
    fn test_jump_arc_lands() {
        let t = Tuning::default();
        let mut p = Player::new(&t);

        p.apply_input(&jump(), t.jump_impulse, t.field_width);
        assert!(p.jumping);
        assert_eq!(p.vel_y, -15.0);

        p.tick(t.gravity, t.field_height);
        assert!(p.pos.y < 340.0);

        // Holding jump mid-air does not re-launch
        let vel = p.vel_y;
        p.apply_input(&jump(), t.jump_impulse, t.field_width);
        assert_eq!(p.vel_y, vel);

        let mut ticks = 1;
        while p.jumping {
            p.tick(t.gravity, t.field_height);
            ticks += 1;
            assert!(ticks < 100, "runner never landed");
        }
        assert_eq!(p.pos.y, 340.0);
        assert_eq!(p.vel_y, 0.0);
    }

    #[test]
    fn test_horizontal_clamp() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let right = TickInput {
            right: true,
            ..Default::default()
        };

        for _ in 0..20 {
            p.apply_input(&left, t.jump_impulse, t.field_width);
        }
        assert_eq!(p.pos.x, 0.0);

        for _ in 0..500 {
            p.apply_input(&right, t.jump_impulse, t.field_width);
        }
        assert_eq!(p.pos.x, t.field_width - p.size.x);
    }

    #[test]
    fn test_set_size_keeps_feet() {
        let t = Tuning::default();
        let mut p = Player::new(&t);
        p.set_size(48.0, 72.0);
        assert_eq!(p.pos.y + p.size.y, t.field_height);
        assert_eq!(p.ground_y(t.field_height), 328.0);
    }

    proptest! {
        #[test]
        fn prop_never_below_ground(inputs in proptest::collection::vec(any::<(bool, bool, bool)>(), 1..300)) {
            let t = Tuning::default();
            let mut p = Player::new(&t);
            for (jump, left, right) in inputs {
                let input = TickInput { jump, left, right, restart: false };
                p.apply_input(&input, t.jump_impulse, t.field_width);
                let vel_before = p.vel_y;
                let landing_y = p.pos.y + (p.vel_y + t.gravity);
                p.tick(t.gravity, t.field_height);

                let ground = p.ground_y(t.field_height);
                prop_assert!(p.pos.y <= ground);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= t.field_width - p.size.x);
                // Velocity is zeroed exactly when the floor clamp fired
                if landing_y > ground {
                    prop_assert_eq!(p.vel_y, 0.0);
                    prop_assert_eq!(p.pos.y, ground);
                    prop_assert!(!p.jumping);
                } else {
                    prop_assert_eq!(p.vel_y, vel_before + t.gravity);
                }
            }
        }
    }
}
