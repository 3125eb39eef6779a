//! Lucky-draw reel widget engine
//!
//! Four digit reels spin in lockstep, then home independently onto a ticket
//! number assigned by the lottery backend. The machine itself is tick-driven
//! and deterministic; [`DrawController`] maps ticks onto real time and wires
//! the widget to the backend and the buyer's selection.

pub mod controller;
pub mod error;
pub mod machine;
pub mod reel;

pub use controller::DrawController;
pub use error::{DrawError, Result};
pub use machine::{DrawAttempt, DrawMachine, DrawPhase, REEL_COUNT, SPIN_TICKS, TICK_INTERVAL_MS};
pub use reel::{ReelState, REEL_FACES, STEP_DEGREES};
