use std::sync::Arc;

use async_trait::async_trait;
use rifa_core::{
    build_checkout_url, event_channel, selection, CatalogPage, CatalogPager, LotteryId, Result,
    TicketBackend, TicketNumber,
};

// A small in-memory backend so the example runs without a lottery server.
struct DemoBackend;

#[async_trait]
impl TicketBackend for DemoBackend {
    async fn ticket_state(&self, _lottery_id: LotteryId, ticket: TicketNumber) -> Result<bool> {
        Ok(ticket.value() % 2 == 1)
    }

    async fn random_available_ticket(&self, _lottery_id: LotteryId) -> Result<TicketNumber> {
        TicketNumber::new(1523)
    }

    async fn catalog_page(&self, page: u32) -> Result<CatalogPage> {
        let first = (page - 1) * 10;
        Ok(CatalogPage {
            page,
            tickets: (first..first + 10)
                .map(TicketNumber::new)
                .collect::<Result<Vec<_>>>()?,
            has_previous: page > 1,
            has_next: page < 5,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let backend = Arc::new(DemoBackend);
    let (events, mut rx) = event_channel();
    let store = selection::shared(events.clone());
    let mut pager = CatalogPager::new(backend, store.clone(), events);

    println!("Loading the first catalog page...");
    pager.load_page(1).await?;
    for entry in pager.entries() {
        print!("{} ", entry.number);
    }
    println!();

    println!("\nToggling two tickets into the selection...");
    pager.toggle(TicketNumber::new(3)?);
    pager.toggle(TicketNumber::new(7)?);

    while let Ok(event) = rx.try_recv() {
        println!("Event: {:?}", event);
    }

    let url = build_checkout_url(1, &store.lock())?;
    println!("\nCheckout: {}", url);

    println!("\nExample completed successfully!");

    Ok(())
}
