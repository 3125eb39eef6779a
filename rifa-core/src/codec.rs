//! Ticket number codec.
//!
//! The ticket form reads its four digit fields left to right, but the
//! left-most field carries the *lowest* positional weight: field 4 is the
//! thousands digit. The original sales flow shipped with this mapping and
//! printed tickets depend on it, so it is preserved exactly. Every path that
//! builds or formats a ticket number goes through this module.

use crate::error::{Result, RifaError};
use crate::types::TicketNumber;

const EXP_DIGIT_4_POSITION: u16 = 1000;
const EXP_DIGIT_3_POSITION: u16 = 100;
const EXP_DIGIT_2_POSITION: u16 = 10;
const EXP_DIGIT_1_POSITION: u16 = 1;

/// Combine the four on-screen digit fields into a ticket number.
///
/// Digits are trusted to be `0..=9`; anything else is a caller contract
/// violation.
pub fn build_ticket_number(digit_1: u8, digit_2: u8, digit_3: u8, digit_4: u8) -> TicketNumber {
    let value = u16::from(digit_4) * EXP_DIGIT_4_POSITION
        + u16::from(digit_3) * EXP_DIGIT_3_POSITION
        + u16::from(digit_2) * EXP_DIGIT_2_POSITION
        + u16::from(digit_1) * EXP_DIGIT_1_POSITION;
    TicketNumber(value)
}

/// Format a ticket number zero-padded to four characters.
pub fn pad_ticket_number(ticket: TicketNumber) -> String {
    format!("{:04}", ticket.value())
}

/// Split a ticket number into its four digits, most significant first.
///
/// Index 0 is the digit the first reel of the draw widget homes on.
pub fn ticket_digits(ticket: TicketNumber) -> [u8; 4] {
    let value = ticket.value();
    [
        (value / 1000) as u8,
        (value / 100 % 10) as u8,
        (value / 10 % 10) as u8,
        (value % 10) as u8,
    ]
}

/// Assemble a manually entered ticket number from the four digit fields.
///
/// A missing field is a precondition failure, not a codec error.
pub fn ticket_from_fields(fields: [Option<u8>; 4]) -> Result<TicketNumber> {
    match fields {
        [Some(d1), Some(d2), Some(d3), Some(d4)] => Ok(build_ticket_number(d1, d2, d3, d4)),
        _ => Err(RifaError::IncompleteDigits),
    }
}
