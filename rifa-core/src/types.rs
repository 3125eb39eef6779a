use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::codec;
use crate::error::{Result, RifaError};

/// Identifier of one raffle campaign, scoping ticket numbers and availability.
pub type LotteryId = u32;

/// Largest ticket number a four-digit lottery can carry.
pub const MAX_TICKET_NUMBER: u16 = 9999;

/// A raffle ticket number in `0..=9999`, canonical within one lottery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(pub(crate) u16);

impl TicketNumber {
    /// Validate a raw wire value into a ticket number.
    pub fn new(value: u32) -> Result<Self> {
        if value > u32::from(MAX_TICKET_NUMBER) {
            return Err(RifaError::InvalidTicket(value));
        }
        Ok(Self(value as u16))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&codec::pad_ticket_number(*self))
    }
}

/// One server-reported batch of catalog tickets.
///
/// Replaced wholesale on every fetch, never merged with a previous page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    /// 1-based index of the requested page.
    pub page: u32,
    pub tickets: Vec<TicketNumber>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Presentation events emitted by the engine for rendering collaborators.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    SelectionChanged(Vec<TicketNumber>),
    PageLoaded(CatalogPage),
    DrawResolved(TicketNumber),
    DrawFailed,
}

pub type EventSender = broadcast::Sender<EngineEvent>;
pub type EventReceiver = broadcast::Receiver<EngineEvent>;

/// Channel fanning engine events out to rendering collaborators.
pub fn event_channel() -> (EventSender, EventReceiver) {
    broadcast::channel(32)
}
