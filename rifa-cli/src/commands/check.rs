use std::sync::Arc;

use rifa_core::{codec, AvailabilityProbe, CheckOutcome, LotteryApi, LotteryId};

pub async fn check_ticket(
    base_url: &str,
    lottery_id: LotteryId,
    digits: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticket = codec::ticket_from_fields(parse_digit_fields(digits))?;

    let api = Arc::new(LotteryApi::new(base_url));
    let probe = AvailabilityProbe::new(api, lottery_id);

    println!("Checking ticket {}...", ticket);
    match probe.check(ticket).await? {
        CheckOutcome::Available => println!("Ticket {} is available", ticket),
        CheckOutcome::Unavailable => println!("Ticket {} is no longer available", ticket),
    }

    Ok(())
}

/// Map the typed characters onto the four digit fields; anything missing or
/// non-numeric stays an empty field.
pub(crate) fn parse_digit_fields(digits: &str) -> [Option<u8>; 4] {
    let mut fields = [None; 4];
    for (slot, ch) in fields.iter_mut().zip(digits.trim().chars()) {
        *slot = ch.to_digit(10).map(|digit| digit as u8);
    }
    fields
}
