//! Primitives d'ordonnancement de l'hôte : demande d'animation frame (annulable)
//! et minuteries à intervalle fixe.
//!
//! Tout est piloté par la boucle hôte (`Simulator`) : rien ne tourne en tâche de fond,
//! le temps n'avance que via [`IntervalTimers::advance`].

use std::time::Duration;

pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Jeton d'une demande d'animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Au plus une demande d'animation frame en attente.
#[derive(Debug, Default)]
pub struct AnimationFrames {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl AnimationFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demande une frame ; remplace une éventuelle demande précédente.
    pub fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Annule la demande `handle` si c'est bien celle en attente.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Consomme la demande en attente (la frame est en train d'être servie).
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Identifiant d'une minuterie active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct IntervalTimer {
    id: TimerId,
    period: Duration,
    elapsed: Duration,
}

/// Ensemble de minuteries périodiques (équivalent `setInterval` / `clearInterval`).
#[derive(Debug, Default)]
pub struct IntervalTimers {
    next_id: u64,
    timers: Vec<IntervalTimer>,
}

impl IntervalTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arme une minuterie périodique. Les périodes < 1 ms sont ramenées à 1 ms.
    pub fn set_interval(&mut self, period: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(IntervalTimer {
            id,
            period: period.max(MIN_INTERVAL),
            elapsed: Duration::ZERO,
        });
        id
    }

    /// Désarme une minuterie. Retourne `false` si elle n'existait pas (ou plus).
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn clear_all(&mut self) {
        self.timers.clear();
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Fait avancer le temps de `dt`.
    ///
    /// Une minuterie se déclenche au plus une fois par appel : les périodes manquées
    /// (pause, mise en veille) sont fusionnées, seul le reliquat est conservé.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.elapsed = timer.elapsed.saturating_add(dt);
            if timer.elapsed >= timer.period {
                let remainder = timer.elapsed.as_nanos() % timer.period.as_nanos();
                timer.elapsed = Duration::from_nanos(remainder as u64);
                fired.push(timer.id);
            }
        }
        fired
    }
}
