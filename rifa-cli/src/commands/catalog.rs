use std::sync::Arc;

use comfy_table::{presets::UTF8_FULL, Table};
use rifa_core::{event_channel, selection, CatalogPager, LotteryApi};

pub async fn show_catalog(base_url: &str, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(LotteryApi::new(base_url));
    let (events, _rx) = event_channel();
    let store = selection::shared(events.clone());
    let mut pager = CatalogPager::new(api, store, events);

    pager.load_page(page).await?;
    print_page(&pager);

    Ok(())
}

/// Render the current page as a grid; selected tickets are bracketed.
pub(crate) fn print_page(pager: &CatalogPager) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    for row in pager.entries().chunks(8) {
        table.add_row(
            row.iter()
                .map(|entry| {
                    if entry.active {
                        format!("[{}]", entry.number)
                    } else {
                        entry.number.to_string()
                    }
                })
                .collect::<Vec<String>>(),
        );
    }

    println!("{}", table);
    println!(
        "Page {} | previous: {} | next: {}",
        pager.current_page(),
        if pager.can_previous() { "yes" } else { "no" },
        if pager.can_next() { "yes" } else { "no" },
    );
}
