//! Fixed-step gameplay engine
//!
//! [`GameEngine`] owns the course, the player and boss slots, progression
//! and the event queue. The frame loop calls [`GameEngine::tick`] once per
//! rendered frame, then drains events and presents a snapshot.

use glam::Vec3;

use super::course::{Course, CourseLayout};
use super::entity::{Boss, Player};
use super::events::GameEvent;
use super::frame::{BossView, FrameRenderer, FrameSnapshot, GateView, PlayerView};
use super::gate::GateId;
use super::progression::ProgressionState;
use super::rng::ValueGenerator;
use crate::error::ConfigError;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::steering_to_lateral;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Normalized steering signal in [0, 1] (pointer x / viewport width).
    /// None keeps the previous target.
    pub steering: Option<f32>,
}

impl TickInput {
    pub fn steer(signal: f32) -> Self {
        Self {
            steering: Some(signal),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    settings: Settings,
    rng: ValueGenerator,
    course: Course,
    progression: ProgressionState,
    /// Empty until the model loader hands the entity over
    player: Option<Player>,
    boss: Option<Boss>,
    /// Lateral target from the most recent steering sample
    steering_target: f32,
    events: Vec<GameEvent>,
    high_scores: HighScores,
    /// Current round (1-based)
    round: u32,
    /// Simulated ticks (not-ready ticks excluded)
    time_ticks: u64,
}

impl GameEngine {
    /// Build an engine with empty player/boss slots and a generated course
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let progression = ProgressionState::new(&settings);
        let mut engine = Self {
            rng: ValueGenerator::new(seed),
            course: Course::new(),
            progression,
            player: None,
            boss: None,
            steering_target: 0.0,
            events: Vec::new(),
            high_scores: HighScores::new(),
            round: 1,
            time_ticks: 0,
            settings,
        };
        engine.regenerate_course();

        log::info!("Engine created with seed {}", seed);
        Ok(engine)
    }

    /// Build an engine with player and boss already attached
    pub fn new_ready(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        let mut engine = Self::new(settings, seed)?;
        engine.attach_player();
        engine.attach_boss();
        Ok(engine)
    }

    /// Fill the player slot (called when the player model has loaded)
    pub fn attach_player(&mut self) {
        let size = Vec3::from_array(self.settings.player_size);
        self.player = Some(Player::new(self.player_start(), size, self.progression.level));
        self.events.push(GameEvent::PlayerReady);
        log::info!("Player ready");
    }

    /// Fill the boss slot (called when the boss model has loaded)
    pub fn attach_boss(&mut self) {
        let size = Vec3::from_array(self.settings.boss_size);
        self.boss = Some(Boss::new(self.boss_start(), size));
        self.events.push(GameEvent::BossReady);
        log::info!("Boss ready");
    }

    /// Both entities are present and the simulation can advance
    pub fn is_ready(&self) -> bool {
        self.player.is_some() && self.boss.is_some()
    }

    /// Advance the simulation by one fixed step
    ///
    /// Forward speed is a constant per tick; `_dt` is accepted so callers can
    /// pass frame time without the engine depending on it.
    pub fn tick(&mut self, input: &TickInput, _dt: f32) {
        // Latest steering sample wins, even before entities are ready
        if let Some(signal) = input.steering {
            if signal.is_finite() {
                self.steering_target = steering_to_lateral(signal, self.settings.lane_width);
            } else {
                log::warn!("Ignoring non-finite steering signal {}", signal);
            }
        }

        // Models still loading: nothing to simulate yet
        let (Some(player), Some(boss)) = (self.player.as_mut(), self.boss.as_ref()) else {
            return;
        };

        self.time_ticks += 1;

        // Move forward, then ease toward the steering target
        let speed = self.settings.forward_speed;
        player.advance(speed);
        let dx = player.steer_toward(self.steering_target, self.settings.smoothing);
        player.face(dx, speed);

        // Query first, consume after (removal mutates the course)
        let hits = self.course.query_collisions(&player.volume());
        let reached_boss = player.position().z <= boss.forward_position();

        for gate in hits {
            self.consume_gate(gate.id);
        }

        if reached_boss {
            self.end_round();
        }
    }

    /// Remove a gate and apply its score, then catch up on level-ups
    fn consume_gate(&mut self, id: GateId) {
        let Some(gate) = self.course.remove(id) else {
            return;
        };

        let delta = gate.score_delta();
        let score = self.progression.add_score(delta);
        log::debug!(
            "Gate {:?} ({:?} {}) hit, score {}",
            gate.id,
            gate.polarity,
            gate.value,
            score
        );
        self.events.push(GameEvent::GateRemoved {
            id: gate.id,
            polarity: gate.polarity,
            value: gate.value,
        });
        self.events.push(GameEvent::ScoreChanged { score, delta });

        // One gate can cross several level thresholds
        while self.progression.try_level_up() {
            let level = self.progression.level;
            if let Some(player) = self.player.as_mut() {
                player.level = level;
            }
            self.events.push(GameEvent::LevelChanged { level });
            log::info!(
                "Level up: {} (next at {})",
                level,
                self.progression.points_to_next_level
            );
        }
    }

    /// Evaluate the round, ramp difficulty on a win, and reset the lane
    fn end_round(&mut self) {
        let won = self.progression.round_won();
        let final_score = self.progression.score;
        let round = self.round;

        self.high_scores.add_round(final_score, round, won);
        let next = self.progression.apply_round_result(won);

        log::info!(
            "Round {} {}: score {} (threshold now {}, lane {}, values {}..={})",
            round,
            if won { "won" } else { "lost" },
            final_score,
            next.win_threshold,
            next.lane_length,
            next.values.min,
            next.values.max
        );
        self.events.push(GameEvent::RoundEnded {
            round,
            won,
            final_score,
            next,
        });
        self.round += 1;

        // New gates first: the course decides where the boss stands
        self.regenerate_course();
        if let Some(player) = self.player.as_mut() {
            player.reset();
        }
        let boss_z = self.course.boss_forward_position();
        if let Some(boss) = self.boss.as_mut() {
            boss.place_at(boss_z);
        }
    }

    fn regenerate_course(&mut self) {
        let layout = self.layout();
        self.course.generate(&layout, &mut self.rng);
        self.events.push(GameEvent::CourseGenerated {
            gate_count: self.course.len(),
        });
    }

    /// Gate layout for the current difficulty
    pub fn layout(&self) -> CourseLayout {
        let bounds = self.progression.bounds();
        let extent = self.settings.gate_lateral_extent;
        CourseLayout {
            lateral: (-extent, extent),
            values: bounds.values,
            lane_length: bounds.lane_length,
            spacing: self.settings.spacing,
            gate_size: Vec3::from_array(self.settings.gate_size),
            height: self.settings.ride_height,
            boss_gap: self.settings.boss_gap,
        }
    }

    fn player_start(&self) -> Vec3 {
        Vec3::new(0.0, self.settings.ride_height, 0.0)
    }

    fn boss_start(&self) -> Vec3 {
        Vec3::new(
            0.0,
            self.settings.ride_height,
            self.course.boss_forward_position(),
        )
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current render-facing state
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            tick: self.time_ticks,
            round: self.round,
            score: self.progression.score,
            level: self.progression.level,
            win_threshold: self.progression.win_threshold,
            points_to_next_level: self.progression.points_to_next_level,
            player: self.player.as_ref().map(|p| PlayerView {
                position: p.position(),
                size: p.body.size,
                facing: p.facing,
                level: p.level,
            }),
            boss: self.boss.as_ref().map(|b| BossView {
                position: b.body.position,
                size: b.body.size,
            }),
            gates: self.course.gates().iter().map(GateView::from).collect(),
        }
    }

    /// Hand the current frame to a renderer
    pub fn present(&self, renderer: &mut impl FrameRenderer) {
        renderer.render(&self.snapshot());
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Direct course access for scripted layouts
    pub fn course_mut(&mut self) -> &mut Course {
        &mut self.course
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn steering_target(&self) -> f32 {
        self.steering_target
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::gate::{Gate, Polarity};

    fn scripted_engine(settings: Settings) -> GameEngine {
        let mut engine = GameEngine::new_ready(settings, 12345).expect("valid settings");
        engine.course_mut().clear();
        engine.drain_events();
        engine
    }

    fn place_gate(engine: &mut GameEngine, polarity: Polarity, x: f32, z: f32, value: u32) -> GateId {
        let height = engine.settings().ride_height;
        let size = Vec3::from_array(engine.settings().gate_size);
        let course = engine.course_mut();
        let id = course.next_gate_id();
        course.insert(Gate::fixed_value(id, polarity, Vec3::new(x, height, z), size, value));
        id
    }

    fn run_until_round_end(engine: &mut GameEngine, max_ticks: u32) -> (u32, Vec<GameEvent>) {
        let mut seen = Vec::new();
        for i in 1..=max_ticks {
            engine.tick(&TickInput::default(), SIM_DT);
            let events = engine.drain_events();
            let ended = events.iter().any(|e| matches!(e, GameEvent::RoundEnded { .. }));
            seen.extend(events);
            if ended {
                return (i, seen);
            }
        }
        (max_ticks, seen)
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            min_gate_value: 9,
            max_gate_value: 1,
            ..Default::default()
        };
        assert!(GameEngine::new(settings, 1).is_err());

        let settings = Settings {
            spacing: 0.0,
            ..Default::default()
        };
        assert!(GameEngine::new(settings, 1).is_err());
    }

    #[test]
    fn test_initial_course_generated() {
        let mut engine = GameEngine::new(Settings::default(), 7).expect("valid settings");
        assert_eq!(engine.course().len(), 10);
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::CourseGenerated { gate_count: 10 }]
        );
    }

    #[test]
    fn test_tick_without_entities_is_noop() {
        let mut engine = GameEngine::new(Settings::default(), 7).expect("valid settings");
        engine.drain_events();
        let gates_before = engine.course().len();

        for _ in 0..100 {
            engine.tick(&TickInput::steer(1.0), SIM_DT);
        }
        assert_eq!(engine.time_ticks(), 0);
        assert_eq!(engine.course().len(), gates_before);
        assert!(engine.drain_events().is_empty());
        // Latest steering sample is still recorded
        assert_eq!(engine.steering_target(), 10.0);

        engine.attach_player();
        engine.tick(&TickInput::default(), SIM_DT);
        assert_eq!(engine.time_ticks(), 0);

        engine.attach_boss();
        assert!(engine.is_ready());
        engine.tick(&TickInput::default(), SIM_DT);
        assert_eq!(engine.time_ticks(), 1);
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::PlayerReady, GameEvent::BossReady]
        );
    }

    #[test]
    fn test_steering_eases_player() {
        let mut engine = scripted_engine(Settings::default());
        engine.tick(&TickInput::steer(1.0), SIM_DT);
        let player = engine.player().expect("player attached");
        assert!((player.position().x - 1.0).abs() < 1e-5);
        assert!((player.position().z + 0.01).abs() < 1e-6);
        assert!(player.facing > 0.0);

        // No new sample keeps the previous target
        engine.tick(&TickInput::default(), SIM_DT);
        let x = engine.player().map(|p| p.position().x).unwrap_or_default();
        assert!((x - 1.9).abs() < 1e-4);
    }

    #[test]
    fn test_bad_steering_tolerated() {
        let mut engine = scripted_engine(Settings::default());
        engine.tick(&TickInput::steer(f32::NAN), SIM_DT);
        assert_eq!(engine.steering_target(), 0.0);

        engine.tick(&TickInput::steer(-40.0), SIM_DT);
        assert_eq!(engine.steering_target(), -10.0);
        assert_eq!(engine.time_ticks(), 2);
    }

    #[test]
    fn test_empty_lane_round_is_lost_and_resets() {
        let mut engine = scripted_engine(Settings::default());
        let before = engine.progression().bounds();

        let (ticks, events) = run_until_round_end(&mut engine, 6000);
        assert!((4999..=5001).contains(&ticks), "round ended at tick {}", ticks);

        let ended = events.iter().find_map(|e| match e {
            GameEvent::RoundEnded { won, final_score, next, .. } => Some((*won, *final_score, *next)),
            _ => None,
        });
        assert_eq!(ended, Some((false, 0, before)));

        assert_eq!(engine.progression().score, 0);
        assert_eq!(engine.round(), 2);
        let player = engine.player().expect("player attached");
        assert_eq!(player.position(), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(player.steps(), 0);
        assert_eq!(engine.boss().map(|b| b.forward_position()), Some(-50.0));
        assert_eq!(engine.course().len(), 10);
        assert_eq!(engine.high_scores().entries.len(), 1);
    }

    #[test]
    fn test_single_reward_gate_collected_once() {
        let mut engine = scripted_engine(Settings::default());
        let id = place_gate(&mut engine, Polarity::Reward, 0.0, -5.0, 3);

        let mut events = Vec::new();
        for _ in 0..1000 {
            engine.tick(&TickInput::default(), SIM_DT);
            events.extend(engine.drain_events());
        }

        let removed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GateRemoved { .. }))
            .collect();
        assert_eq!(removed.len(), 1);
        assert_eq!(
            removed[0],
            &GameEvent::GateRemoved {
                id,
                polarity: Polarity::Reward,
                value: 3
            }
        );
        assert_eq!(engine.progression().score, 3);
        assert!(engine.course().get(id).is_none());

        // Score 3 crosses thresholds 1 and 3 in one event
        let levels: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::LevelChanged { level } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3]);
        assert_eq!(engine.progression().points_to_next_level, 6);
        assert_eq!(engine.player().map(|p| p.level), Some(3));
    }

    #[test]
    fn test_penalty_gate_lowers_score() {
        let mut engine = scripted_engine(Settings::default());
        place_gate(&mut engine, Polarity::Penalty, 0.0, -2.0, 4);
        for _ in 0..400 {
            engine.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(engine.progression().score, -4);
        assert_eq!(engine.progression().level, 1);
    }

    #[test]
    fn test_overlapping_pair_both_collected() {
        let mut engine = scripted_engine(Settings::default());
        place_gate(&mut engine, Polarity::Reward, 0.5, -3.0, 5);
        place_gate(&mut engine, Polarity::Penalty, -0.5, -3.0, 2);
        for _ in 0..400 {
            engine.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(engine.progression().score, 3);
        assert!(engine.course().is_empty());
    }

    #[test]
    fn test_gate_out_of_lateral_reach_missed() {
        let mut engine = scripted_engine(Settings::default());
        place_gate(&mut engine, Polarity::Reward, 7.0, -3.0, 5);
        for _ in 0..400 {
            engine.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(engine.progression().score, 0);
        assert_eq!(engine.course().len(), 1);
    }

    #[test]
    fn test_reaching_threshold_wins_and_ramps() {
        let settings = Settings {
            win_threshold: 5,
            ..Default::default()
        };
        let mut engine = scripted_engine(settings);
        place_gate(&mut engine, Polarity::Reward, 0.0, -5.0, 5);

        let (_, events) = run_until_round_end(&mut engine, 6000);
        let ended = events.iter().find_map(|e| match e {
            GameEvent::RoundEnded { won, final_score, next, .. } => Some((*won, *final_score, *next)),
            _ => None,
        });
        let (won, final_score, next) = ended.expect("round ended");
        assert!(won);
        assert_eq!(final_score, 5);
        assert_eq!(next.win_threshold, 10);
        assert_eq!(next.lane_length, -60.0);
        assert_eq!(next.values.min, 1);
        assert_eq!(next.values.max, 7);

        assert_eq!(engine.progression().score, 0);
        assert_eq!(engine.boss().map(|b| b.forward_position()), Some(-60.0));
        assert_eq!(engine.course().len(), 12);
        assert!(
            engine
                .course()
                .gates()
                .iter()
                .all(|g| (1..=7).contains(&g.value))
        );
        assert_eq!(engine.high_scores().wins(), 1);
    }

    #[test]
    fn test_boss_follows_course_after_win() {
        let settings = Settings {
            win_threshold: 1,
            boss_gap: 5.0,
            ..Default::default()
        };
        let mut engine = scripted_engine(settings);
        assert_eq!(engine.boss().map(|b| b.forward_position()), Some(-55.0));
        assert_eq!(engine.course().boss_forward_position(), -55.0);

        place_gate(&mut engine, Polarity::Reward, 0.0, -5.0, 2);
        run_until_round_end(&mut engine, 7000);
        assert_eq!(engine.course().lane_length(), -60.0);
        assert_eq!(engine.boss().map(|b| b.forward_position()), Some(-65.0));
    }

    #[test]
    fn test_level_survives_round_reset() {
        let mut engine = scripted_engine(Settings::default());
        place_gate(&mut engine, Polarity::Reward, 0.0, -5.0, 1);
        run_until_round_end(&mut engine, 6000);
        assert_eq!(engine.progression().level, 2);
        assert_eq!(engine.player().map(|p| p.level), Some(2));
    }

    #[test]
    fn test_determinism() {
        let inputs = [0.2, 0.9, 0.5, 0.1, 0.75];
        let mut a = GameEngine::new_ready(Settings::default(), 99999).expect("valid settings");
        let mut b = GameEngine::new_ready(Settings::default(), 99999).expect("valid settings");

        for i in 0..12_000 {
            let input = TickInput::steer(inputs[(i / 700) % inputs.len()]);
            a.tick(&input, SIM_DT);
            b.tick(&input, SIM_DT);
        }

        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_present_hands_snapshot_to_renderer() {
        struct Recorder(Vec<FrameSnapshot>);
        impl FrameRenderer for Recorder {
            fn render(&mut self, frame: &FrameSnapshot) {
                self.0.push(frame.clone());
            }
        }

        let mut engine = GameEngine::new(Settings::default(), 5).expect("valid settings");
        let mut recorder = Recorder(Vec::new());
        engine.present(&mut recorder);
        engine.attach_player();
        engine.attach_boss();
        engine.tick(&TickInput::default(), SIM_DT);
        engine.present(&mut recorder);

        assert!(recorder.0[0].player.is_none());
        assert_eq!(recorder.0[0].gates.len(), 10);
        let frame = &recorder.0[1];
        assert_eq!(frame.tick, 1);
        assert!(frame.player.is_some());
        assert!(frame.boss.is_some());
        assert!(
            frame
                .gates
                .iter()
                .all(|g| g.color == g.polarity.color() && !g.label.is_empty())
        );
    }
}
