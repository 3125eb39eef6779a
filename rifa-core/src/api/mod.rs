//! Backend queries consumed by the engine.
//!
//! The [`TicketBackend`] trait is the seam between the engine and the HTTP
//! backend; [`LotteryApi`] is the production implementation against the
//! lottery server's endpoints. Availability answers are snapshots: nothing
//! keeps a ticket available between a check and the purchase submission, the
//! purchase endpoint is the final authority.

mod probe;

pub use probe::{AvailabilityProbe, CheckOutcome};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, RifaError};
use crate::types::{CatalogPage, LotteryId, TicketNumber};

#[async_trait]
pub trait TicketBackend: Send + Sync {
    /// Whether the ticket is currently purchasable in the lottery.
    async fn ticket_state(&self, lottery_id: LotteryId, ticket: TicketNumber) -> Result<bool>;

    /// Ask the backend to pick one currently-available ticket.
    async fn random_available_ticket(&self, lottery_id: LotteryId) -> Result<TicketNumber>;

    /// Fetch one page of the ticket catalog. Pages are 1-based.
    async fn catalog_page(&self, page: u32) -> Result<CatalogPage>;
}

#[derive(Debug, Deserialize)]
struct TicketStateResponse {
    ticket_state: bool,
}

// The random-ticket endpoint reports a drained lottery as a 200 with an
// `error` body instead of a non-success status.
#[derive(Debug, Deserialize)]
struct RandomTicketResponse {
    ticket_number: Option<u32>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogTicket {
    number: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogPageResponse {
    tickets: Vec<CatalogTicket>,
    has_previous: bool,
    has_next: bool,
}

/// HTTP client for the lottery backend.
#[derive(Clone)]
pub struct LotteryApi {
    client: reqwest::Client,
    base_url: String,
}

impl LotteryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TicketBackend for LotteryApi {
    async fn ticket_state(&self, lottery_id: LotteryId, ticket: TicketNumber) -> Result<bool> {
        let url = format!(
            "{}/api/get_ticket_state?lottery_id={}&ticket_number={}",
            self.base_url,
            lottery_id,
            ticket.value()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RifaError::network(format!("Ticket state request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RifaError::network(format!(
                "Ticket state request returned {}",
                response.status()
            )));
        }

        let body: TicketStateResponse = response
            .json()
            .await
            .map_err(|e| RifaError::network(format!("Invalid ticket state response: {}", e)))?;

        Ok(body.ticket_state)
    }

    async fn random_available_ticket(&self, lottery_id: LotteryId) -> Result<TicketNumber> {
        let url = format!(
            "{}/api/lottery/{}/random_available_ticket/",
            self.base_url, lottery_id
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RifaError::network(format!("Random ticket request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RifaError::network(format!(
                "Random ticket request returned {}",
                response.status()
            )));
        }

        let body: RandomTicketResponse = response
            .json()
            .await
            .map_err(|e| RifaError::network(format!("Invalid random ticket response: {}", e)))?;

        match body.ticket_number {
            Some(number) => TicketNumber::new(number),
            None => Err(RifaError::network(
                body.error
                    .unwrap_or_else(|| "Backend returned no ticket".to_string()),
            )),
        }
    }

    async fn catalog_page(&self, page: u32) -> Result<CatalogPage> {
        let url = format!("{}/?page={}", self.base_url, page);

        let response = self
            .client
            .get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| RifaError::network(format!("Catalog page request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RifaError::network(format!(
                "Catalog page request returned {}",
                response.status()
            )));
        }

        let body: CatalogPageResponse = response
            .json()
            .await
            .map_err(|e| RifaError::network(format!("Invalid catalog page response: {}", e)))?;

        let mut tickets = Vec::with_capacity(body.tickets.len());
        for ticket in body.tickets {
            tickets.push(TicketNumber::new(ticket.number)?);
        }

        Ok(CatalogPage {
            page,
            tickets,
            has_previous: body.has_previous,
            has_next: body.has_next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = LotteryApi::new("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
    }

    #[test]
    fn random_ticket_error_body_parses() {
        let body: RandomTicketResponse =
            serde_json::from_str(r#"{"error": "No available tickets for this lottery"}"#).unwrap();
        assert!(body.ticket_number.is_none());
        assert_eq!(
            body.error.as_deref(),
            Some("No available tickets for this lottery")
        );
    }

    #[test]
    fn catalog_page_body_parses() {
        let body: CatalogPageResponse = serde_json::from_str(
            r#"{"tickets": [{"number": 12}, {"number": 345}], "has_previous": false, "has_next": true}"#,
        )
        .unwrap();
        assert_eq!(body.tickets.len(), 2);
        assert!(!body.has_previous);
        assert!(body.has_next);
    }
}
