use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rifa_core::{codec, TicketNumber};

use crate::reel::{ReelState, REEL_FACES};

/// Reels in the draw widget, one per ticket digit.
pub const REEL_COUNT: usize = 4;

/// Ticks in the fast-spin window: 2000 ms at one step per 100 ms tick.
pub const SPIN_TICKS: u32 = 20;

/// Wall-clock duration of one tick when driven in real time.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Phase of the current draw attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPhase {
    /// Reels at rest on their mounted rings; no live target.
    Idle,
    /// All four reels rotating through the fixed fast-spin window.
    Spinning,
    /// Each reel stepping independently until its front digit matches its
    /// target digit.
    Homing,
    /// All four reels matched; the resolved ticket can be confirmed.
    Stopped,
}

/// A live draw attempt and the ticket its reels converge on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawAttempt {
    pub id: Uuid,
    pub target: TicketNumber,
    pub started_at: DateTime<Utc>,
}

struct ReelUnit {
    state: ReelState,
    target_digit: u8,
    stopped: bool,
}

/// The four-reel draw machine.
///
/// Tick-driven: [`DrawMachine::tick`] advances one animation step and the
/// embedding driver decides what a step means in wall-clock terms (100 ms in
/// production). Homing convergence is therefore testable without timers.
///
/// A new [`DrawMachine::begin`] supersedes whatever attempt was live; the
/// previous target becomes unreachable and the reels keep their current
/// angles, exactly as re-spinning the mounted widget does.
pub struct DrawMachine {
    reels: [ReelUnit; REEL_COUNT],
    phase: DrawPhase,
    spin_ticks_left: u32,
    attempt: Option<DrawAttempt>,
}

impl DrawMachine {
    /// Mount the widget: four reels with freshly shuffled rings, at rest.
    pub fn new() -> Self {
        Self::from_states([
            ReelState::new(),
            ReelState::new(),
            ReelState::new(),
            ReelState::new(),
        ])
    }

    /// Mount the widget with fixed ring orders (deterministic tests).
    pub fn with_rings(rings: [[u8; REEL_FACES]; REEL_COUNT]) -> Self {
        Self::from_states(rings.map(ReelState::with_ring))
    }

    fn from_states(states: [ReelState; REEL_COUNT]) -> Self {
        Self {
            reels: states.map(|state| ReelUnit {
                state,
                target_digit: 0,
                stopped: false,
            }),
            phase: DrawPhase::Idle,
            spin_ticks_left: 0,
            attempt: None,
        }
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn attempt(&self) -> Option<&DrawAttempt> {
        self.attempt.as_ref()
    }

    /// The resolved ticket, once every reel has stopped on it.
    pub fn resolved(&self) -> Option<TicketNumber> {
        match self.phase {
            DrawPhase::Stopped => self.attempt.map(|attempt| attempt.target),
            _ => None,
        }
    }

    /// Front digits of the four reels, reel 1 first.
    pub fn faces(&self) -> [u8; REEL_COUNT] {
        let mut faces = [0u8; REEL_COUNT];
        for (face, reel) in faces.iter_mut().zip(&self.reels) {
            *face = reel.state.front_digit();
        }
        faces
    }

    /// Start a draw attempt toward the given target.
    ///
    /// Reel 1 homes on the most significant digit. Any previous attempt is
    /// superseded.
    pub fn begin(&mut self, target: TicketNumber) -> DrawAttempt {
        let attempt = DrawAttempt {
            id: Uuid::new_v4(),
            target,
            started_at: Utc::now(),
        };

        let digits = codec::ticket_digits(target);
        for (reel, digit) in self.reels.iter_mut().zip(digits) {
            reel.target_digit = digit;
            reel.stopped = false;
        }

        self.phase = DrawPhase::Spinning;
        self.spin_ticks_left = SPIN_TICKS;
        self.attempt = Some(attempt);

        tracing::info!("Draw {} spinning toward ticket {}", attempt.id, target);
        attempt
    }

    /// Advance the animation by one tick.
    ///
    /// In the spin window all reels step together. In homing, each reel is
    /// checked before it rotates and freezes the instant its front digit is
    /// the target digit, so reels stop independently.
    pub fn tick(&mut self) {
        match self.phase {
            DrawPhase::Idle | DrawPhase::Stopped => {}
            DrawPhase::Spinning => {
                for reel in &mut self.reels {
                    reel.state.step();
                }
                self.spin_ticks_left -= 1;
                if self.spin_ticks_left == 0 {
                    self.phase = DrawPhase::Homing;
                }
            }
            DrawPhase::Homing => {
                for reel in &mut self.reels {
                    if reel.stopped {
                        continue;
                    }
                    if reel.state.front_digit() == reel.target_digit {
                        reel.stopped = true;
                    } else {
                        reel.state.step();
                    }
                }
                if self.reels.iter().all(|reel| reel.stopped) {
                    self.phase = DrawPhase::Stopped;
                    if let Some(attempt) = &self.attempt {
                        tracing::info!(
                            "Draw {} stopped on ticket {}",
                            attempt.id,
                            attempt.target
                        );
                    }
                }
            }
        }
    }
}

impl Default for DrawMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RINGS: [[u8; REEL_FACES]; REEL_COUNT] = [
        [5, 2, 9, 0, 1, 6, 3, 8, 4, 7],
        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
        [3, 1, 4, 5, 9, 2, 6, 8, 7, 0],
    ];

    fn ticket(value: u32) -> TicketNumber {
        TicketNumber::new(value).unwrap()
    }

    fn run_to_stop(machine: &mut DrawMachine) -> u32 {
        let mut ticks = 0;
        while machine.phase() != DrawPhase::Stopped {
            machine.tick();
            ticks += 1;
            assert!(ticks <= SPIN_TICKS + REEL_FACES as u32, "machine never converged");
        }
        ticks
    }

    #[test]
    fn begin_assigns_most_significant_digit_to_reel_one() {
        let mut machine = DrawMachine::with_rings(RINGS);
        machine.begin(ticket(1523));
        let targets: Vec<u8> = machine.reels.iter().map(|r| r.target_digit).collect();
        assert_eq!(targets, vec![1, 5, 2, 3]);
    }

    #[test]
    fn spin_window_runs_twenty_ticks_before_homing() {
        let mut machine = DrawMachine::with_rings(RINGS);
        machine.begin(ticket(1523));
        assert_eq!(machine.phase(), DrawPhase::Spinning);

        for _ in 0..SPIN_TICKS - 1 {
            machine.tick();
            assert_eq!(machine.phase(), DrawPhase::Spinning);
        }
        machine.tick();
        assert_eq!(machine.phase(), DrawPhase::Homing);
    }

    #[test]
    fn homing_converges_on_the_target_faces() {
        let mut machine = DrawMachine::with_rings(RINGS);
        machine.begin(ticket(1523));
        run_to_stop(&mut machine);

        assert_eq!(machine.faces(), [1, 5, 2, 3]);
        assert_eq!(machine.resolved(), Some(ticket(1523)));
    }

    #[test]
    fn every_target_converges_within_the_homing_bound() {
        for value in [0u32, 7, 999, 1523, 4096, 9999] {
            let mut machine = DrawMachine::with_rings(RINGS);
            machine.begin(ticket(value));
            let ticks = run_to_stop(&mut machine);
            assert!(ticks <= SPIN_TICKS + REEL_FACES as u32);
            assert_eq!(machine.resolved(), Some(ticket(value)));
        }
    }

    #[test]
    fn reels_stop_independently() {
        // After the spin window every reel is 20 steps in, fronting ring[0]
        // again. Reel 2 carries the identity ring, so homing on digit d takes
        // d steps there; picking digits at different ring distances makes the
        // reels stop on different ticks.
        let mut machine = DrawMachine::with_rings(RINGS);
        machine.begin(ticket(123)); // digits [0, 1, 2, 3]
        for _ in 0..SPIN_TICKS {
            machine.tick();
        }
        assert_eq!(machine.phase(), DrawPhase::Homing);

        // Reel 2 (identity ring) needs one step for digit 1; reel 1 fronts 5
        // and needs three steps to reach 0.
        machine.tick();
        let stopped: Vec<bool> = machine.reels.iter().map(|r| r.stopped).collect();
        assert!(stopped[3]);
        assert!(!stopped[0]);

        run_to_stop(&mut machine);
        assert_eq!(machine.faces(), [0, 1, 2, 3]);
    }

    #[test]
    fn resolved_is_none_before_all_reels_stop() {
        let mut machine = DrawMachine::with_rings(RINGS);
        assert_eq!(machine.resolved(), None);

        machine.begin(ticket(42));
        assert_eq!(machine.resolved(), None);
        machine.tick();
        assert_eq!(machine.resolved(), None);
    }

    #[test]
    fn a_new_begin_supersedes_the_previous_attempt() {
        let mut machine = DrawMachine::with_rings(RINGS);
        let first = machine.begin(ticket(1111));
        for _ in 0..5 {
            machine.tick();
        }

        let second = machine.begin(ticket(2222));
        assert_ne!(first.id, second.id);
        assert_eq!(machine.phase(), DrawPhase::Spinning);

        run_to_stop(&mut machine);
        assert_eq!(machine.resolved(), Some(ticket(2222)));
    }

    #[test]
    fn idle_ticks_are_no_ops() {
        let mut machine = DrawMachine::with_rings(RINGS);
        let faces = machine.faces();
        machine.tick();
        assert_eq!(machine.phase(), DrawPhase::Idle);
        assert_eq!(machine.faces(), faces);
    }
}
