use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::TicketBackend;
use crate::codec;
use crate::error::{Result, RifaError};
use crate::types::{LotteryId, TicketNumber};

/// Outcome of a manual availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Available,
    Unavailable,
}

/// The ticket-check control of the search section.
///
/// At most one check runs at a time; the control stays engaged for the
/// duration of the query and is released when it completes, whatever the
/// outcome.
pub struct AvailabilityProbe {
    backend: Arc<dyn TicketBackend>,
    lottery_id: LotteryId,
    engaged: AtomicBool,
}

struct EngagedGuard<'a>(&'a AtomicBool);

impl Drop for EngagedGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AvailabilityProbe {
    pub fn new(backend: Arc<dyn TicketBackend>, lottery_id: LotteryId) -> Self {
        Self {
            backend,
            lottery_id,
            engaged: AtomicBool::new(false),
        }
    }

    /// Whether a check is currently in flight.
    pub fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::SeqCst)
    }

    /// Query whether the ticket is still purchasable.
    pub async fn check(&self, ticket: TicketNumber) -> Result<CheckOutcome> {
        if self.engaged.swap(true, Ordering::SeqCst) {
            return Err(RifaError::ProbeBusy);
        }
        let _guard = EngagedGuard(&self.engaged);

        match self.backend.ticket_state(self.lottery_id, ticket).await {
            Ok(true) => Ok(CheckOutcome::Available),
            Ok(false) => Ok(CheckOutcome::Unavailable),
            Err(e) => {
                tracing::warn!("Availability check for ticket {} failed: {}", ticket, e);
                Err(e)
            }
        }
    }

    /// Build a ticket number from the manual digit fields, then check it.
    ///
    /// Incomplete fields fail before the control is engaged.
    pub async fn check_fields(&self, fields: [Option<u8>; 4]) -> Result<CheckOutcome> {
        let ticket = codec::ticket_from_fields(fields)?;
        self.check(ticket).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogPage;
    use async_trait::async_trait;

    struct FixedBackend {
        available: bool,
        fail: bool,
    }

    #[async_trait]
    impl TicketBackend for FixedBackend {
        async fn ticket_state(&self, _lottery_id: LotteryId, _ticket: TicketNumber) -> Result<bool> {
            if self.fail {
                return Err(RifaError::network("backend down"));
            }
            Ok(self.available)
        }

        async fn random_available_ticket(&self, _lottery_id: LotteryId) -> Result<TicketNumber> {
            unimplemented!("not used by probe tests")
        }

        async fn catalog_page(&self, _page: u32) -> Result<CatalogPage> {
            unimplemented!("not used by probe tests")
        }
    }

    #[tokio::test]
    async fn reports_availability_outcomes() {
        let probe = AvailabilityProbe::new(
            Arc::new(FixedBackend {
                available: true,
                fail: false,
            }),
            1,
        );
        let ticket = TicketNumber::new(42).unwrap();
        assert_eq!(probe.check(ticket).await.unwrap(), CheckOutcome::Available);

        let probe = AvailabilityProbe::new(
            Arc::new(FixedBackend {
                available: false,
                fail: false,
            }),
            1,
        );
        assert_eq!(probe.check(ticket).await.unwrap(), CheckOutcome::Unavailable);
    }

    #[tokio::test]
    async fn releases_the_control_on_success_and_failure() {
        let probe = AvailabilityProbe::new(
            Arc::new(FixedBackend {
                available: true,
                fail: false,
            }),
            1,
        );
        let ticket = TicketNumber::new(7).unwrap();
        probe.check(ticket).await.unwrap();
        assert!(!probe.is_engaged());

        let probe = AvailabilityProbe::new(
            Arc::new(FixedBackend {
                available: true,
                fail: true,
            }),
            1,
        );
        assert!(probe.check(ticket).await.is_err());
        assert!(!probe.is_engaged());
    }

    #[tokio::test]
    async fn rejects_a_second_check_while_engaged() {
        let probe = AvailabilityProbe::new(
            Arc::new(FixedBackend {
                available: true,
                fail: false,
            }),
            1,
        );
        probe.engaged.store(true, Ordering::SeqCst);
        let ticket = TicketNumber::new(7).unwrap();
        assert!(matches!(
            probe.check(ticket).await,
            Err(RifaError::ProbeBusy)
        ));
    }

    #[tokio::test]
    async fn incomplete_fields_never_engage_the_control() {
        let probe = AvailabilityProbe::new(
            Arc::new(FixedBackend {
                available: true,
                fail: false,
            }),
            1,
        );
        let result = probe.check_fields([Some(1), Some(2), None, Some(4)]).await;
        assert!(matches!(result, Err(RifaError::IncompleteDigits)));
        assert!(!probe.is_engaged());
    }
}
