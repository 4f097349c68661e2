use std::time::Duration;

use rand::Rng;

use super::grid::Position;
use crate::config::PowerUpTuning;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Snake moves faster for a while
    Speed,
    /// Snake moves slower for a while
    Slow,
    /// Food is worth two points for a while
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Speed,
        PowerUpKind::Slow,
        PowerUpKind::DoublePoints,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "SPEED",
            PowerUpKind::Slow => "SLOW",
            PowerUpKind::DoublePoints => "DOUBLE POINTS",
        }
    }

    /// Speed after pickup, and how far it actually moved
    pub fn apply(self, speed: u32, tuning: &PowerUpTuning) -> (u32, u32) {
        match self {
            PowerUpKind::Speed => {
                let new = speed.saturating_add(tuning.speed_boost).min(tuning.max_speed);
                (new, new.saturating_sub(speed))
            }
            PowerUpKind::Slow => {
                let new = speed.saturating_sub(tuning.slow_penalty).max(tuning.min_speed);
                (new, speed.saturating_sub(new))
            }
            PowerUpKind::DoublePoints => (speed, 0),
        }
    }

    /// Undo [`PowerUpKind::apply`]. Speed never falls under `base_speed` when
    /// a boost wears off, and never climbs past `base_speed + speed_boost`
    /// when a slowdown does.
    pub fn revert(self, speed: u32, applied: u32, base_speed: u32, tuning: &PowerUpTuning) -> u32 {
        match self {
            PowerUpKind::Speed => speed.saturating_sub(applied).max(base_speed),
            PowerUpKind::Slow => speed
                .saturating_add(applied)
                .min(base_speed.saturating_add(tuning.speed_boost)),
            PowerUpKind::DoublePoints => speed,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Effect {
    kind: PowerUpKind,
    picked_up_at: Duration,
    applied: u32,
}

/// The single power-up of a round.
///
/// It is either hidden, visible on the board waiting to be eaten, or
/// picked up with its effect counting down. Only one of those at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub position: Position,
    visible: bool,
    effect: Option<Effect>,
}

impl PowerUp {
    /// Hidden power-up with no running effect
    pub fn new(kind: PowerUpKind, position: Position) -> Self {
        Self {
            kind,
            position,
            visible: false,
            effect: None,
        }
    }

    /// Put a fresh power-up on the board
    pub fn spawn(&mut self, kind: PowerUpKind, position: Position) {
        *self = Self {
            visible: true,
            ..Self::new(kind, position)
        };
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible or still counting down; a new one must not spawn meanwhile
    pub fn is_pending(&self) -> bool {
        self.visible || self.effect.is_some()
    }

    pub fn running_effect(&self) -> Option<PowerUpKind> {
        self.effect.map(|e| e.kind)
    }

    pub fn doubles_points(&self) -> bool {
        self.running_effect() == Some(PowerUpKind::DoublePoints)
    }

    /// Eat the power-up: hide it, start its timer and return the new speed.
    pub fn pick_up(&mut self, now: Duration, speed: u32, tuning: &PowerUpTuning) -> u32 {
        let (speed, applied) = self.kind.apply(speed, tuning);
        self.visible = false;
        self.effect = Some(Effect {
            kind: self.kind,
            picked_up_at: now,
            applied,
        });
        speed
    }

    /// Ends the effect once more than `duration_secs` have passed since pickup.
    /// Returns the expired kind and the reverted speed.
    pub fn expire_if_due(
        &mut self,
        now: Duration,
        speed: u32,
        base_speed: u32,
        tuning: &PowerUpTuning,
    ) -> Option<(PowerUpKind, u32)> {
        let effect = self.effect?;
        let elapsed = now.saturating_sub(effect.picked_up_at);
        if elapsed.as_secs_f64() <= tuning.duration_secs {
            return None;
        }
        self.effect = None;
        let speed = effect.kind.revert(speed, effect.applied, base_speed, tuning);
        Some((effect.kind, speed))
    }

    /// End the running effect now, whatever time is left.
    /// Returns the cancelled kind and the reverted speed.
    pub fn cancel_effect(
        &mut self,
        speed: u32,
        base_speed: u32,
        tuning: &PowerUpTuning,
    ) -> Option<(PowerUpKind, u32)> {
        let effect = self.effect.take()?;
        let speed = effect.kind.revert(speed, effect.applied, base_speed, tuning);
        Some((effect.kind, speed))
    }

    /// Seconds left on the running effect
    pub fn remaining_secs(&self, now: Duration, tuning: &PowerUpTuning) -> Option<f64> {
        self.effect.map(|e| {
            let elapsed = now.saturating_sub(e.picked_up_at).as_secs_f64();
            (tuning.duration_secs - elapsed).max(0.0)
        })
    }
}
