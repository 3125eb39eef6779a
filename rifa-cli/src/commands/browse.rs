use std::sync::Arc;

use dialoguer::{Confirm, Input, Select};
use rifa_core::{
    build_checkout_url, event_channel, selection, CatalogPager, LotteryApi, LotteryId, RifaError,
    TicketNumber,
};
use rifa_draw::DrawController;

use crate::commands::catalog::print_page;
use crate::commands::draw::render_reels;

/// Interactive sales session: the selection lives exactly as long as this
/// loop, like a page session in the web surface.
pub async fn browse(base_url: &str, lottery_id: LotteryId) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(LotteryApi::new(base_url));
    let (events, _rx) = event_channel();
    let store = selection::shared(events.clone());
    let mut pager = CatalogPager::new(api.clone(), store.clone(), events.clone());
    let mut controller = DrawController::new(api, lottery_id, events);

    tracing::debug!("Browse session started for lottery {}", lottery_id);
    pager.load_page(1).await?;

    loop {
        println!();
        print_page(&pager);
        print_selection(&store);

        let mut items = vec!["Toggle a ticket", "Lucky draw"];
        if pager.can_next() {
            items.push("Next page");
        }
        if pager.can_previous() {
            items.push("Previous page");
        }
        items.push("Checkout");
        items.push("Quit");

        let choice = Select::new()
            .with_prompt("Action")
            .items(&items)
            .default(0)
            .interact()?;

        match items[choice] {
            "Toggle a ticket" => {
                let input: String = Input::new().with_prompt("Ticket number").interact_text()?;
                let Ok(value) = input.trim().parse::<u32>() else {
                    println!("Not a ticket number: {}", input.trim());
                    continue;
                };
                let ticket = match TicketNumber::new(value) {
                    Ok(ticket) => ticket,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                if pager.entries().iter().any(|entry| entry.number == ticket) {
                    pager.toggle(ticket);
                } else {
                    println!("Ticket {} is not on this page", ticket);
                }
            }
            "Next page" => {
                if let Err(e) = pager.load_next().await {
                    println!("Page load failed ({}), try again", e);
                }
            }
            "Previous page" => {
                if let Err(e) = pager.load_previous().await {
                    println!("Page load failed ({}), try again", e);
                }
            }
            "Lucky draw" => {
                println!("Spinning...");
                let result = controller.spin(render_reels).await;
                println!();
                match result {
                    Ok(ticket) => {
                        let take = Confirm::new()
                            .with_prompt(format!("Add ticket {} to your selection?", ticket))
                            .default(true)
                            .interact()?;
                        if take {
                            controller.confirm(&store)?;
                            pager.refresh_active_marks();
                        }
                        println!("Spin again any time for another number");
                    }
                    Err(e) => println!("Draw failed ({}), try again", e),
                }
            }
            "Checkout" => match build_checkout_url(lottery_id, &store.lock()) {
                Ok(url) => {
                    println!("Continue your purchase at {}/{}", base_url, url);
                    break;
                }
                Err(RifaError::EmptySelection) => {
                    println!("Select at least one ticket first");
                }
                Err(e) => return Err(e.into()),
            },
            _ => break,
        }
    }

    Ok(())
}

fn print_selection(store: &rifa_core::SharedSelection) {
    let store = store.lock();
    if store.is_empty() {
        println!("Selection: (empty - select at least one ticket to buy)");
    } else {
        let numbers: Vec<String> = store
            .tickets()
            .iter()
            .map(|ticket| ticket.to_string())
            .collect();
        println!("Selection: {}", numbers.join(" "));
    }
}
