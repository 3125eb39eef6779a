//! rifa SDK - Core engine for raffle ticket sales
//!
//! This library holds the client-side state of a raffle sales session: the
//! authoritative ticket selection, the paginated catalog view merged with
//! that selection, the availability queries against the lottery backend, and
//! the checkout hand-off. Rendering, persistence, and the purchase endpoint
//! itself are external collaborators reached through events and the
//! [`api::TicketBackend`] seam.

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod codec;
pub mod error;
pub mod selection;
pub mod types;

pub use api::{AvailabilityProbe, CheckOutcome, LotteryApi, TicketBackend};
pub use catalog::{CatalogEntry, CatalogPager};
pub use checkout::build_checkout_url;
pub use error::{Result, RifaError};
pub use selection::{SelectionStore, SharedSelection};
pub use types::{
    event_channel, CatalogPage, EngineEvent, EventReceiver, EventSender, LotteryId, TicketNumber,
    MAX_TICKET_NUMBER,
};
