//! One simulation step per display frame
//!
//! Physics is fixed-step per call; frame time is not used.

use super::collision::intersects;
use super::state::{GamePhase, GameState};
use crate::assets::AssetRegistry;

/// Logical actions held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
    pub restart: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, assets: &AssetRegistry) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.sync_assets(assets);

    let tuning = &state.tuning;
    state
        .player
        .apply_input(input, tuning.jump_impulse, tuning.field_width);

    state.parallax.tick(state.game_speed, tuning.parallax_factor);

    state.score += 1;
    state.game_speed = tuning.speed_for_score(state.score);

    state.player.tick(tuning.gravity, tuning.field_height);

    if let Some(kind) = state.spawner.tick(&mut state.rng, &state.tuning) {
        state.spawn(kind, assets);
    }

    let speed = state.game_speed;
    let player = state.player.rect();
    let mut hit = false;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.advance(speed);
        if obstacle.is_offscreen() {
            return false;
        }
        // First hit decides the tick; later obstacles only move
        if !hit && intersects(&player, &obstacle.rect()) {
            hit = true;
        }
        true
    });

    if hit {
        state.end_run();
    }
}
