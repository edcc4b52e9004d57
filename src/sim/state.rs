//! Game state and run lifecycle

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind, Spawner};
use super::parallax::ParallaxSet;
use super::player::Player;
use crate::assets::{AssetRegistry, SpriteId};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Run ended; only restart is accepted
    GameOver,
}

/// Things the host may want to react to (persist, log, HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned(ObstacleKind),
    GameOver { score: u64 },
    /// Best score beaten; host persists it
    NewHighScore(u64),
    Restarted,
}

/// Complete game state. Owns every entity; nothing is shared.
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Spawner seed for this session
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks survived this run
    pub score: u64,
    /// Best score in ticks, survives restarts
    pub high_score: u64,
    /// Obstacle pixels per tick
    pub game_speed: f32,
    pub player: Player,
    /// In spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub parallax: ParallaxSet,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            high_score,
            game_speed: tuning.base_speed,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            spawner: Spawner::default(),
            parallax: ParallaxSet::default(),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        crate::display_score(self.score, self.tuning.score_divisor)
    }

    pub fn display_high_score(&self) -> u64 {
        crate::display_score(self.high_score, self.tuning.score_divisor)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick up geometry from assets that finished loading since last tick
    pub fn sync_assets(&mut self, assets: &AssetRegistry) {
        if let Some((w, h)) = assets.sprite_size(SpriteId::Runner) {
            if self.player.size != Vec2::new(w, h) {
                self.player.set_size(w, h);
            }
        }
        self.parallax.sync(assets, self.tuning.field_width);
    }

    pub(crate) fn spawn(&mut self, kind: ObstacleKind, assets: &AssetRegistry) {
        let obstacle = Obstacle::spawn(kind, &self.tuning, assets);
        log::debug!(
            "Spawned {:?} obstacle {}x{} at tick {}",
            kind,
            obstacle.size.x,
            obstacle.size.y,
            self.score
        );
        self.obstacles.push(obstacle);
        self.events.push(GameEvent::Spawned(kind));
    }

    /// Running -> GameOver
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over at {} ({} ticks)", self.display_score(), self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.score));
            log::info!("New high score: {}", self.display_high_score());
        }
    }

    /// GameOver -> Running. Ignored while a run is in progress. The spawn
    /// clock keeps counting across runs.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::Running;
        self.score = 0;
        self.game_speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.player
            .reset(self.tuning.player_start_x, self.tuning.field_height);
        self.parallax.reset();
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }
}
