//! The buyer's selection for the current session.
//!
//! The store owns the only piece of state shared across components. It is
//! insertion-ordered, duplicate-free, and every visual affordance (ticket
//! highlight, cart list, buy button) derives from it through the
//! `SelectionChanged` event. Callers are expected to have checked
//! availability before adding; the store never re-verifies.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{EngineEvent, EventSender, TicketNumber};

pub struct SelectionStore {
    selected: Vec<TicketNumber>,
    events: EventSender,
}

/// The store as shared across the pager, the draw widget, and checkout.
pub type SharedSelection = Arc<Mutex<SelectionStore>>;

/// Create an empty session selection behind a shared handle.
pub fn shared(events: EventSender) -> SharedSelection {
    Arc::new(Mutex::new(SelectionStore::new(events)))
}

impl SelectionStore {
    pub fn new(events: EventSender) -> Self {
        Self {
            selected: Vec::new(),
            events,
        }
    }

    /// Add a ticket to the selection. Adding an already-selected ticket is a
    /// no-op.
    pub fn add(&mut self, ticket: TicketNumber) {
        if self.selected.contains(&ticket) {
            return;
        }
        self.selected.push(ticket);
        tracing::info!("Ticket {} added to selection", ticket);
        self.notify();
    }

    /// Remove a ticket from the selection. Removing an absent ticket is a
    /// no-op.
    pub fn remove(&mut self, ticket: TicketNumber) {
        let Some(index) = self.selected.iter().position(|t| *t == ticket) else {
            return;
        };
        self.selected.remove(index);
        tracing::info!("Ticket {} removed from selection", ticket);
        self.notify();
    }

    pub fn contains(&self, ticket: TicketNumber) -> bool {
        self.selected.contains(&ticket)
    }

    /// Selected tickets in insertion order.
    pub fn tickets(&self) -> &[TicketNumber] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The buy affordance is enabled iff at least one ticket is selected;
    /// the "select at least one" warning is its complement.
    pub fn buy_enabled(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Query-string fragment handed to the purchase navigator: every selected
    /// number, comma-joined, in insertion order, un-padded.
    pub fn checkout_fragment(&self) -> String {
        let numbers: Vec<String> = self
            .selected
            .iter()
            .map(|ticket| ticket.value().to_string())
            .collect();
        format!("ticket_numbers={}", numbers.join(","))
    }

    fn notify(&self) {
        let _ = self
            .events
            .send(EngineEvent::SelectionChanged(self.selected.clone()));
    }
}
