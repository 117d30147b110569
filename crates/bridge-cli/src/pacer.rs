//! Delays the engine's calls so a person can follow the auction.
//!
//! Each automated turn gets one tokio task that sleeps, asks the engine,
//! and sends the result back. Moving on (a new round, a rebid) aborts the
//! task, and [`PracticeTable::apply`] drops anything that still slips
//! through from an earlier round.

use crate::table::{PacedCall, PracticeTable};
use bridge_engine::Bidder;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

struct Pending {
    round: u64,
    position: usize,
    handle: JoinHandle<()>,
}

pub struct Pacer {
    bidder: Arc<Bidder>,
    delay: Duration,
    tx: mpsc::UnboundedSender<PacedCall>,
    rx: mpsc::UnboundedReceiver<PacedCall>,
    pending: Option<Pending>,
}

impl Pacer {
    pub fn new(bidder: Arc<Bidder>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            bidder,
            delay,
            tx,
            rx,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts thinking for the automated seat on turn, unless that turn is
    /// already being thought about. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, table: &PracticeTable) {
        let Some(seat) = table.automated_turn() else {
            return;
        };
        let (round, position) = (table.round(), table.auction().len());
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.round == round && p.position == position)
        {
            return;
        }
        self.cancel();

        let bidder = Arc::clone(&self.bidder);
        let hand = table.deal().hand(seat).clone();
        let auction = table.auction().clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        debug!(%seat, round, position, ?delay, "scheduling engine call");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let call = bidder.next_call(&hand, &auction, seat);
            // The receiver only goes away with the pacer itself.
            let _ = tx.send(PacedCall { round, seat, call });
        });
        self.pending = Some(Pending {
            round,
            position,
            handle,
        });
    }

    /// Aborts the pending engine call, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.handle.is_finished())
    }

    /// Waits for the next engine call.
    pub async fn next(&mut self) -> Option<PacedCall> {
        self.rx.recv().await
    }

    /// An engine call that has already arrived, without waiting.
    pub fn try_next(&mut self) -> Option<PacedCall> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Pacer {
    fn drop(&mut self) {
        self.cancel();
    }
}
