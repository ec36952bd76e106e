//! Ability cast controller: the timed Idle/Casting state machine shared by
//! every combatant.
//!
//! A cast is driven purely by timestamps. Starting a cast records when the
//! ability lands (`resolves_at`) and when the cast is over (`ends_at`); each
//! tick `advance` reports which of those moments have been reached. Instant
//! abilities land and end at the same instant. Windowed abilities open their
//! hurtbox at `resolves_at` and close it (dealing damage) at `ends_at`.

use bevy::prelude::*;
use thiserror::Error;

use super::data::{AbilityDefinition, AbilityId, Targeting};

/// Why a cast could not start.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CastRejected {
    #[error("already casting {0:?}")]
    AlreadyCasting(AbilityId),
    #[error("on cooldown until t={0:.2}")]
    CoolingDown(f32),
}

/// Transient record of an in-progress cast.
#[derive(Debug, Clone, PartialEq)]
pub struct CastSession {
    pub ability: AbilityDefinition,
    pub started_at: f32,
    /// Instant abilities deal damage here; windowed abilities open here
    pub resolves_at: f32,
    /// The cast is over here; always `>= resolves_at`
    pub ends_at: f32,
    /// Captured once when the cast starts
    pub target_point: Vec3,
    /// Windowed abilities: whether the hurtbox has opened yet
    pub activated: bool,
}

/// What happened to a cast during one `advance` call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CastProgress {
    /// A windowed ability reached its activation point this tick
    pub activated: Option<CastSession>,
    /// The cast ended this tick and its resolution must fire
    pub finished: Option<CastSession>,
}

/// Per-combatant cast state. At most one session is active.
#[derive(Component, Debug, Clone)]
pub struct CastController {
    /// Next cast may start once time is strictly past this
    pub can_cast_at: f32,
    /// Movement commands are honoured from this time on
    pub can_move_at: f32,
    session: Option<CastSession>,
}

impl Default for CastController {
    fn default() -> Self {
        Self {
            can_cast_at: f32::NEG_INFINITY,
            can_move_at: f32::NEG_INFINITY,
            session: None,
        }
    }
}

impl CastController {
    /// Controller whose owner may not move before `t`.
    pub fn holding_movement_until(t: f32) -> Self {
        Self {
            can_move_at: t,
            ..Default::default()
        }
    }

    pub fn session(&self) -> Option<&CastSession> {
        self.session.as_ref()
    }

    pub fn is_casting(&self) -> bool {
        self.session.is_some()
    }

    /// Idle and past the cooldown.
    pub fn can_cast(&self, now: f32) -> bool {
        self.session.is_none() && now > self.can_cast_at
    }

    /// Idle and past the movement lockout. The lockout end is inclusive.
    pub fn can_move(&self, now: f32) -> bool {
        self.session.is_none() && now >= self.can_move_at
    }

    /// Enter Casting.
    ///
    /// `cast_duration` is the base duration derived from attack cadence.
    pub fn begin(
        &mut self,
        now: f32,
        ability: &AbilityDefinition,
        cast_duration: f32,
        target_point: Vec3,
    ) -> Result<&CastSession, CastRejected> {
        if let Some(session) = &self.session {
            return Err(CastRejected::AlreadyCasting(session.ability.id));
        }
        if now <= self.can_cast_at {
            return Err(CastRejected::CoolingDown(self.can_cast_at));
        }

        let resolves_at = now + ability.activation_point * cast_duration;
        let ends_at = match ability.targeting {
            Targeting::InstantPoint => resolves_at,
            Targeting::WindowedHitbox {
                cast_end_multiplier,
                ..
            } => (now + cast_end_multiplier * cast_duration).max(resolves_at),
        };

        self.can_cast_at = now + cast_duration;
        self.can_move_at = ends_at + ability.post_cast_lockout;

        Ok(&*self.session.insert(CastSession {
            ability: ability.clone(),
            started_at: now,
            resolves_at,
            ends_at,
            target_point,
            activated: false,
        }))
    }

    /// Report activation and completion reached by `now`.
    ///
    /// Completion removes the session, so each cast finishes exactly once.
    pub fn advance(&mut self, now: f32) -> CastProgress {
        let mut progress = CastProgress::default();
        let Some(session) = self.session.as_mut() else {
            return progress;
        };

        if session.ability.is_windowed() && !session.activated && now >= session.resolves_at {
            session.activated = true;
            progress.activated = Some(session.clone());
        }

        if now >= session.ends_at {
            progress.finished = self.session.take();
        }

        progress
    }

    /// Discard the active cast without resolving it.
    pub fn cancel(&mut self) -> Option<CastSession> {
        self.session.take()
    }
}
