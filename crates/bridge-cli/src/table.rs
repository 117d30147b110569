//! One practice table: a deal, the auction on it, and which seats are
//! played by people.

use bridge_core::io::identifier;
use bridge_core::{Auction, Call, Deal, IllegalCall, Position, Vulnerability};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("{0} is not played by a person at this table")]
    NotHuman(Position),
    #[error(transparent)]
    Illegal(#[from] IllegalCall),
}

/// A call computed for `seat` during `round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacedCall {
    pub round: u64,
    pub seat: Position,
    pub call: Call,
}

/// What a saved board looks like on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDeal {
    pub board: u32,
    pub deal: Deal,
    pub auction: Auction,
}

impl SavedDeal {
    pub fn identifier(&self) -> String {
        identifier::export_board(&self.deal, self.board, Some(&self.auction))
    }
}

pub struct PracticeTable {
    rng: StdRng,
    humans: Vec<Position>,
    board: u32,
    round: u64,
    deal: Deal,
    auction: Auction,
}

impl PracticeTable {
    /// Deals board 1. Boards rotate dealer and vulnerability by number.
    pub fn new(seed: u64, humans: Vec<Position>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deal = Self::deal_board(&mut rng, 1);
        let auction = Auction::new(deal.dealer(), deal.vulnerability());
        info!(board = 1, dealer = %deal.dealer(), "new deal");
        Self {
            rng,
            humans,
            board: 1,
            round: 0,
            deal,
            auction,
        }
    }

    fn deal_board(rng: &mut StdRng, board: u32) -> Deal {
        Deal::random(
            rng,
            Position::dealer_from_board_number(board),
            Vulnerability::from_board_number(board),
        )
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn board(&self) -> u32 {
        self.board
    }

    /// Bumped whenever the auction restarts, so a call computed for an
    /// earlier auction can be recognised and dropped.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn humans(&self) -> &[Position] {
        &self.humans
    }

    pub fn is_human(&self, seat: Position) -> bool {
        self.humans.contains(&seat)
    }

    /// The seat on turn when the engine plays it.
    pub fn automated_turn(&self) -> Option<Position> {
        self.auction.turn().filter(|&seat| !self.is_human(seat))
    }

    pub fn new_round(&mut self) {
        self.board = self.board % 16 + 1;
        self.deal = Self::deal_board(&mut self.rng, self.board);
        self.restart();
        info!(board = self.board, dealer = %self.deal.dealer(), "new deal");
    }

    /// Bid the same cards again from the start.
    pub fn rebid(&mut self) {
        self.restart();
        info!(board = self.board, "rebidding");
    }

    fn restart(&mut self) {
        self.round += 1;
        self.auction = Auction::new(self.deal.dealer(), self.deal.vulnerability());
    }

    /// A call from a person. Rejected calls leave the auction as it was.
    pub fn submit(&mut self, seat: Position, call: Call) -> Result<(), TableError> {
        if !self.is_human(seat) {
            return Err(TableError::NotHuman(seat));
        }
        match self.auction.append(call, seat) {
            Ok(auction) => {
                self.auction = auction;
                self.log_if_complete();
                Ok(())
            }
            Err(err) => {
                warn!(%seat, %call, %err, "rejected call");
                Err(err.into())
            }
        }
    }

    /// Appends an engine call if it still belongs to this round and its
    /// seat is still on turn. Returns whether it was used.
    pub fn apply(&mut self, paced: PacedCall) -> bool {
        if paced.round != self.round || self.automated_turn() != Some(paced.seat) {
            return false;
        }
        match self.auction.append(paced.call, paced.seat) {
            Ok(auction) => {
                self.auction = auction;
                self.log_if_complete();
                true
            }
            Err(err) => {
                warn!(seat = %paced.seat, call = %paced.call, %err, "engine call rejected");
                false
            }
        }
    }

    fn log_if_complete(&self) {
        if let Some(message) = self.completion_message() {
            info!(board = self.board, "{message}");
        }
    }

    /// `Final contract: 4S by N` or `All Pass` once the auction is over.
    pub fn completion_message(&self) -> Option<String> {
        if !self.auction.is_terminated() {
            return None;
        }
        Some(match self.auction.final_contract() {
            Some(contract) => format!("Final contract: {contract}"),
            None => "All Pass".to_string(),
        })
    }

    pub fn saved(&self) -> SavedDeal {
        SavedDeal {
            board: self.board,
            deal: self.deal.clone(),
            auction: self.auction.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::Strain;

    fn table() -> PracticeTable {
        PracticeTable::new(11, vec![Position::North])
    }

    #[test]
    fn test_board_one_is_dealt_by_north() {
        let table = table();
        assert_eq!(table.deal().dealer(), Position::North);
        assert_eq!(table.automated_turn(), None);
        assert_eq!(table.auction().turn(), Some(Position::North));
    }

    #[test]
    fn test_rejected_call_leaves_auction_unchanged() {
        let mut table = table();
        table.submit(Position::North, Call::bid(1, Strain::Hearts)).unwrap();
        let before = table.auction().clone();
        let err = table.submit(Position::North, Call::Pass).unwrap_err();
        assert!(matches!(err, TableError::Illegal(IllegalCall::OutOfTurn { .. })));
        assert_eq!(table.auction(), &before);
        assert_eq!(
            table.submit(Position::East, Call::Pass),
            Err(TableError::NotHuman(Position::East))
        );
    }

    #[test]
    fn test_stale_engine_call_is_dropped() {
        let mut table = table();
        table.submit(Position::North, Call::Pass).unwrap();
        let paced = PacedCall {
            round: table.round(),
            seat: Position::East,
            call: Call::Pass,
        };
        table.rebid();
        assert!(!table.apply(paced));
        assert!(table.auction().is_empty());
    }

    #[test]
    fn test_engine_call_for_wrong_seat_is_dropped() {
        let mut table = table();
        table.submit(Position::North, Call::Pass).unwrap();
        let paced = PacedCall {
            round: table.round(),
            seat: Position::South,
            call: Call::Pass,
        };
        assert!(!table.apply(paced));
        assert!(table.apply(PacedCall { seat: Position::East, ..paced }));
        assert_eq!(table.auction().len(), 2);
    }

    #[test]
    fn test_completion_message() {
        let mut table = PracticeTable::new(3, Position::ALL.to_vec());
        assert_eq!(table.completion_message(), None);
        for seat in Position::ALL {
            table.submit(seat, Call::Pass).unwrap();
        }
        assert_eq!(table.completion_message().as_deref(), Some("All Pass"));

        table.rebid();
        table.submit(Position::North, Call::bid(1, Strain::NoTrump)).unwrap();
        for seat in [Position::East, Position::South, Position::West] {
            table.submit(seat, Call::Pass).unwrap();
        }
        assert_eq!(
            table.completion_message().as_deref(),
            Some("Final contract: 1NT by N")
        );
    }

    #[test]
    fn test_new_round_rotates_the_board() {
        let mut table = table();
        let first = table.deal().clone();
        table.new_round();
        assert_eq!(table.board(), 2);
        assert_eq!(table.deal().dealer(), Position::East);
        assert_eq!(table.deal().vulnerability(), Vulnerability::NS);
        assert_ne!(table.deal(), &first);
        assert_eq!(table.round(), 1);
    }

    #[test]
    fn test_saved_deal_round_trips_through_json() {
        let mut table = table();
        table.submit(Position::North, Call::bid(1, Strain::Spades)).unwrap();
        let saved = table.saved();
        let json = serde_json::to_string(&saved).unwrap();
        let back: SavedDeal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, saved);

        let (deal, auction) = identifier::import_board(&saved.identifier()).unwrap();
        assert_eq!(deal, saved.deal);
        assert_eq!(auction, Some(saved.auction));
    }
}
