use std::sync::Arc;
use std::time::Duration;

use rifa_core::{EngineEvent, EventSender, LotteryId, SharedSelection, TicketBackend, TicketNumber};

use crate::error::{DrawError, Result};
use crate::machine::{DrawMachine, DrawPhase, REEL_COUNT, TICK_INTERVAL_MS};

/// Drives the draw machine against the backend and real time.
///
/// One controller owns one mounted widget. `spin` borrows the controller
/// mutably for the whole attempt, so a superseding attempt can only start
/// after the previous driver loop has wound down; no stale tick source can
/// outlive its attempt.
pub struct DrawController {
    backend: Arc<dyn TicketBackend>,
    lottery_id: LotteryId,
    machine: DrawMachine,
    events: EventSender,
}

impl DrawController {
    pub fn new(backend: Arc<dyn TicketBackend>, lottery_id: LotteryId, events: EventSender) -> Self {
        Self {
            backend,
            lottery_id,
            machine: DrawMachine::new(),
            events,
        }
    }

    pub fn machine(&self) -> &DrawMachine {
        &self.machine
    }

    /// Run one full draw attempt: request a target, spin, home, stop.
    ///
    /// `on_tick` receives the four front digits and the phase after every
    /// step so the embedding surface can render the reels. A failed target
    /// request abandons the attempt, leaves the reels where they are, and
    /// emits `DrawFailed`; the widget stays ready for another attempt.
    pub async fn spin<F>(&mut self, mut on_tick: F) -> Result<TicketNumber>
    where
        F: FnMut([u8; REEL_COUNT], DrawPhase),
    {
        let target = match self.backend.random_available_ticket(self.lottery_id).await {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!("Random draw request failed: {}", e);
                let _ = self.events.send(EngineEvent::DrawFailed);
                return Err(e.into());
            }
        };

        self.machine.begin(target);
        while self.machine.phase() != DrawPhase::Stopped {
            tokio::time::sleep(Duration::from_millis(TICK_INTERVAL_MS)).await;
            self.machine.tick();
            on_tick(self.machine.faces(), self.machine.phase());
        }

        let _ = self.events.send(EngineEvent::DrawResolved(target));
        Ok(target)
    }

    /// Hand the resolved draw to the buyer's selection.
    ///
    /// Availability is the draw-time snapshot; no re-check happens here, the
    /// purchase endpoint resolves the race authoritatively.
    pub fn confirm(&self, selection: &SharedSelection) -> Result<TicketNumber> {
        let ticket = self
            .machine
            .resolved()
            .ok_or_else(|| DrawError::InvalidState("no resolved draw to confirm".to_string()))?;
        selection.lock().add(ticket);
        Ok(ticket)
    }
}
