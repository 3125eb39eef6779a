//! Paginated catalog of ticket numbers.
//!
//! The pager fetches one server page at a time and replaces its rendered
//! entries wholesale; nothing from a previous page survives a load. Entries
//! are cross-referenced against the selection store so already-selected
//! tickets render in their active state.
//!
//! Overlapping loads are not serialized by request id: whichever response is
//! processed last owns the grid (last-writer-wins, as the embedding surface
//! behaves under rapid pagination clicks).

use std::sync::Arc;

use crate::api::TicketBackend;
use crate::error::Result;
use crate::selection::SharedSelection;
use crate::types::{EngineEvent, EventSender, TicketNumber};

/// One ticket as rendered in the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub number: TicketNumber,
    /// Set when the ticket is already in the buyer's selection.
    pub active: bool,
}

pub struct CatalogPager {
    backend: Arc<dyn TicketBackend>,
    selection: SharedSelection,
    events: EventSender,
    current_page: u32,
    entries: Vec<CatalogEntry>,
    has_previous: bool,
    has_next: bool,
}

impl CatalogPager {
    pub fn new(backend: Arc<dyn TicketBackend>, selection: SharedSelection, events: EventSender) -> Self {
        Self {
            backend,
            selection,
            events,
            current_page: 1,
            entries: Vec::new(),
            has_previous: false,
            has_next: false,
        }
    }

    /// 1-based index of the page currently rendered (or being requested).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// The "previous" control is enabled iff the server reported an earlier
    /// page.
    pub fn can_previous(&self) -> bool {
        self.has_previous
    }

    /// The "next" control is enabled iff the server reported a later page.
    pub fn can_next(&self) -> bool {
        self.has_next
    }

    /// Fetch a page and replace the rendered grid wholesale.
    ///
    /// On failure the previously rendered page stays untouched so the surface
    /// can offer a plain "try again".
    pub async fn load_page(&mut self, page: u32) -> Result<&[CatalogEntry]> {
        let fetched = self.backend.catalog_page(page).await?;

        self.current_page = page;
        self.has_previous = fetched.has_previous;
        self.has_next = fetched.has_next;

        self.entries.clear();
        {
            let selection = self.selection.lock();
            self.entries.extend(fetched.tickets.iter().map(|&number| CatalogEntry {
                number,
                active: selection.contains(number),
            }));
        }

        tracing::debug!(
            "Loaded catalog page {} with {} tickets",
            page,
            self.entries.len()
        );
        let _ = self.events.send(EngineEvent::PageLoaded(fetched));

        Ok(&self.entries)
    }

    /// Advance to the next page. The enabled state of the "next" control is
    /// the caller's guard; the pager does not clamp.
    pub async fn load_next(&mut self) -> Result<&[CatalogEntry]> {
        self.load_page(self.current_page + 1).await
    }

    /// Go back one page. Mirrors the control-level guard of the original
    /// surface: a "previous" click on page 1 does nothing.
    pub async fn load_previous(&mut self) -> Result<&[CatalogEntry]> {
        if self.current_page > 1 {
            let page = self.current_page - 1;
            self.load_page(page).await
        } else {
            Ok(&self.entries)
        }
    }

    /// Toggle a rendered ticket in or out of the selection.
    ///
    /// Tickets on a freshly loaded page are taken as available as of that
    /// fetch, so this path performs no availability check; the purchase
    /// endpoint resolves the race authoritatively.
    pub fn toggle(&mut self, ticket: TicketNumber) {
        {
            let mut selection = self.selection.lock();
            if selection.contains(ticket) {
                selection.remove(ticket);
            } else {
                selection.add(ticket);
            }
        }
        self.refresh_active_marks();
    }

    /// Re-derive the active mark on every rendered entry from the store.
    pub fn refresh_active_marks(&mut self) {
        let selection = self.selection.lock();
        for entry in &mut self.entries {
            entry.active = selection.contains(entry.number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, RifaError};
    use crate::selection;
    use crate::types::{event_channel, CatalogPage, LotteryId};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct PagedBackend {
        pages: HashMap<u32, Vec<u32>>,
        last: u32,
    }

    impl PagedBackend {
        fn new(pages: &[(u32, &[u32])]) -> Self {
            let last = pages.iter().map(|(index, _)| *index).max().unwrap_or(1);
            Self {
                pages: pages
                    .iter()
                    .map(|(index, numbers)| (*index, numbers.to_vec()))
                    .collect(),
                last,
            }
        }
    }

    #[async_trait]
    impl TicketBackend for PagedBackend {
        async fn ticket_state(&self, _lottery_id: LotteryId, _ticket: TicketNumber) -> Result<bool> {
            Ok(true)
        }

        async fn random_available_ticket(&self, _lottery_id: LotteryId) -> Result<TicketNumber> {
            unimplemented!("not used by pager tests")
        }

        async fn catalog_page(&self, page: u32) -> Result<CatalogPage> {
            let numbers = self
                .pages
                .get(&page)
                .ok_or_else(|| RifaError::network("no such page"))?;
            Ok(CatalogPage {
                page,
                tickets: numbers
                    .iter()
                    .map(|&n| TicketNumber::new(n).unwrap())
                    .collect(),
                has_previous: page > 1,
                has_next: page < self.last,
            })
        }
    }

    fn ticket(value: u32) -> TicketNumber {
        TicketNumber::new(value).unwrap()
    }

    fn pager_with(pages: &[(u32, &[u32])]) -> CatalogPager {
        let (events, _rx) = event_channel();
        let selection = selection::shared(events.clone());
        CatalogPager::new(Arc::new(PagedBackend::new(pages)), selection, events)
    }

    #[tokio::test]
    async fn a_new_page_replaces_the_previous_one_wholesale() {
        let mut pager = pager_with(&[(1, &[1, 2, 3][..]), (2, &[4, 5][..])]);

        pager.load_page(1).await.unwrap();
        assert_eq!(pager.entries().len(), 3);

        pager.load_page(2).await.unwrap();
        let numbers: Vec<u16> = pager.entries().iter().map(|e| e.number.value()).collect();
        assert_eq!(numbers, vec![4, 5]);
        assert!(pager
            .entries()
            .iter()
            .all(|entry| entry.number.value() >= 4));
    }

    #[tokio::test]
    async fn selected_tickets_render_active() {
        let mut pager = pager_with(&[(1, &[10, 20, 30][..])]);
        pager.selection.lock().add(ticket(20));

        pager.load_page(1).await.unwrap();
        let active: Vec<u16> = pager
            .entries()
            .iter()
            .filter(|e| e.active)
            .map(|e| e.number.value())
            .collect();
        assert_eq!(active, vec![20]);
    }

    #[tokio::test]
    async fn toggle_adds_then_removes_without_availability_checks() {
        let mut pager = pager_with(&[(1, &[10, 20][..])]);
        pager.load_page(1).await.unwrap();

        pager.toggle(ticket(10));
        assert!(pager.selection.lock().contains(ticket(10)));
        assert!(pager.entries()[0].active);

        pager.toggle(ticket(10));
        assert!(!pager.selection.lock().contains(ticket(10)));
        assert!(!pager.entries()[0].active);
    }

    #[tokio::test]
    async fn pagination_cursors_gate_the_controls() {
        let mut pager = pager_with(&[(1, &[1][..]), (2, &[2][..]), (3, &[3][..])]);

        pager.load_page(1).await.unwrap();
        assert!(!pager.can_previous());
        assert!(pager.can_next());

        pager.load_next().await.unwrap();
        assert_eq!(pager.current_page(), 2);
        assert!(pager.can_previous());
        assert!(pager.can_next());

        pager.load_next().await.unwrap();
        assert!(!pager.can_next());

        pager.load_previous().await.unwrap();
        assert_eq!(pager.current_page(), 2);
    }

    #[tokio::test]
    async fn previous_on_page_one_is_a_no_op() {
        let mut pager = pager_with(&[(1, &[1, 2][..])]);
        pager.load_page(1).await.unwrap();

        pager.load_previous().await.unwrap();
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.entries().len(), 2);
    }

    #[tokio::test]
    async fn a_failed_load_keeps_the_rendered_page() {
        let mut pager = pager_with(&[(1, &[1, 2][..])]);
        pager.load_page(1).await.unwrap();

        assert!(pager.load_page(9).await.is_err());
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.entries().len(), 2);
    }

    #[tokio::test]
    async fn loads_emit_page_loaded() {
        let (events, mut rx) = event_channel();
        let selection = selection::shared(events.clone());
        let mut pager = CatalogPager::new(
            Arc::new(PagedBackend::new(&[(1, &[5][..])])),
            selection,
            events,
        );

        pager.load_page(1).await.unwrap();
        match rx.try_recv().unwrap() {
            EngineEvent::PageLoaded(page) => {
                assert_eq!(page.page, 1);
                assert_eq!(page.tickets, vec![ticket(5)]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
