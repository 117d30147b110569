//! Practice-table session and auction analysis on top of the Acol engine.

pub mod analysis;
pub mod pacer;
pub mod table;

use bridge_core::{Auction, Deal};
use bridge_engine::Bidder;

/// Lets the engine finish `auction` for all four seats.
pub fn bid_out(bidder: &Bidder, deal: &Deal, mut auction: Auction) -> Auction {
    while let Some(seat) = auction.turn() {
        let call = bidder.next_call(deal.hand(seat), &auction, seat);
        match auction.append(call, seat) {
            Ok(next) => auction = next,
            Err(err) => {
                tracing::warn!(%seat, %call, %err, "engine produced an illegal call");
                break;
            }
        }
    }
    auction
}
