//! Where the acting seat stands in the auction.
//!
//! The context is recomputed from the call history on every decision; the
//! auction is the only state the engine keeps.

use crate::slam::SlamSequence;
use bridge_core::{Auction, AuctionEntry, Call, Position, Strain, Suit};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Context {
    /// Nobody has bid yet.
    Opening,
    /// An ace or king ask is waiting on this seat.
    SlamAsk(SlamSequence),
    /// This seat opened and partner responded without interference.
    OpenerRebid,
    /// Partner opened and this seat has not called since.
    Response,
    /// Partner opened, this seat responded and partner rebid, all uncontested.
    ResponderRebid,
    /// Our side opened and the opponents have since called.
    Competitive,
    /// An opponent opened and this seat has its first chance to act.
    DirectSeat,
    /// An opponent opened and passing now would end the auction.
    BalancingSeat,
    /// An opponent opened and partner has doubled or overcalled.
    Advance,
    /// Any later round.
    Continuation,
}

impl Context {
    pub fn detect(auction: &Auction, seat: Position) -> Context {
        if let Some(sequence) = SlamSequence::read(auction) {
            if sequence.awaits(seat) {
                return Context::SlamAsk(sequence);
            }
        }
        let Some((index, opening)) = auction.opening() else {
            return Context::Opening;
        };
        let after = &auction.entries()[index + 1..];
        let calls = |pos: Position| after.iter().filter(move |e| e.seat == pos).count();
        let acted = |pos: Position| after.iter().any(|e| e.seat == pos && !e.call.is_pass());

        if opening.seat == seat || opening.seat == seat.partner() {
            if acted(seat.lho()) || acted(seat.rho()) {
                Context::Competitive
            } else if opening.seat == seat {
                if calls(seat) == 0 && acted(seat.partner()) {
                    Context::OpenerRebid
                } else {
                    Context::Continuation
                }
            } else {
                match (calls(seat), calls(seat.partner())) {
                    (0, _) => Context::Response,
                    (1, 1) => Context::ResponderRebid,
                    _ => Context::Continuation,
                }
            }
        } else if acted(seat) {
            Context::Continuation
        } else if acted(seat.partner()) {
            Context::Advance
        } else if after.len() >= 2 && auction.entries().iter().rev().take(2).all(|e| e.call.is_pass()) {
            Context::BalancingSeat
        } else {
            Context::DirectSeat
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Context::Opening => "opening",
            Context::SlamAsk(_) => "slam ask",
            Context::OpenerRebid => "opener rebid",
            Context::Response => "response",
            Context::ResponderRebid => "responder rebid",
            Context::Competitive => "competitive",
            Context::DirectSeat => "direct seat",
            Context::BalancingSeat => "balancing seat",
            Context::Advance => "advance",
            Context::Continuation => "continuation",
        }
    }
}

/// What an opening bid says about the opener's hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpeningKind {
    OneSuit(Suit),
    /// 1NT or 2NT.
    NoTrump(u8),
    StrongTwoClubs,
    /// Weak two or three-level preempt.
    Preempt(Suit, u8),
    Other,
}

impl OpeningKind {
    pub fn of(call: Call) -> OpeningKind {
        match call {
            Call::Bid {
                level: level @ 1..=2,
                strain: Strain::NoTrump,
            } => OpeningKind::NoTrump(level),
            Call::Bid {
                level: 2,
                strain: Strain::Clubs,
            } => OpeningKind::StrongTwoClubs,
            Call::Bid { level, strain } if level <= 3 => match (level, strain.to_suit()) {
                (1, Some(suit)) => OpeningKind::OneSuit(suit),
                (_, Some(suit)) => OpeningKind::Preempt(suit, level),
                (_, None) => OpeningKind::Other,
            },
            _ => OpeningKind::Other,
        }
    }

    pub fn is_notrump(self) -> bool {
        matches!(self, OpeningKind::NoTrump(_))
    }
}

/// Non-pass calls made by `seat`.
pub fn actions_by(entries: &[AuctionEntry], seat: Position) -> impl Iterator<Item = Call> + '_ {
    entries
        .iter()
        .filter(move |e| e.seat == seat && !e.call.is_pass())
        .map(|e| e.call)
}

/// Suits named in bids by `seat`, in bidding order without repeats.
pub fn suits_bid_by(entries: &[AuctionEntry], seat: Position) -> Vec<Suit> {
    let mut suits = Vec::new();
    for suit in actions_by(entries, seat).filter_map(Call::suit) {
        if !suits.contains(&suit) {
            suits.push(suit);
        }
    }
    suits
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::Vulnerability;

    fn context(calls: &str, seat: Position) -> Context {
        let auction = Auction::parse(Position::North, Vulnerability::None, calls).unwrap();
        Context::detect(&auction, seat)
    }

    #[test]
    fn test_opening_until_someone_bids() {
        assert_eq!(context("", Position::North), Context::Opening);
        assert_eq!(context("P P", Position::South), Context::Opening);
    }

    #[test]
    fn test_uncontested_rounds() {
        assert_eq!(context("1H P", Position::South), Context::Response);
        assert_eq!(context("1H P 1S P", Position::North), Context::OpenerRebid);
        assert_eq!(context("1H P 1S P 2H P", Position::South), Context::ResponderRebid);
        assert_eq!(context("1H P 1S P 2H P 3H P", Position::North), Context::Continuation);
        assert_eq!(context("P 1D P", Position::West), Context::Response);
    }

    #[test]
    fn test_interference_is_competitive() {
        assert_eq!(context("1H 1S", Position::South), Context::Competitive);
        assert_eq!(context("1H P 1S 2C", Position::North), Context::Competitive);
        assert_eq!(context("1H X", Position::South), Context::Competitive);
    }

    #[test]
    fn test_defending_seats() {
        assert_eq!(context("1H", Position::East), Context::DirectSeat);
        assert_eq!(context("1H P P", Position::West), Context::BalancingSeat);
        assert_eq!(context("1H P 2H", Position::West), Context::DirectSeat);
        assert_eq!(context("1H X P", Position::West), Context::Advance);
        assert_eq!(context("1H 1S P", Position::West), Context::Advance);
        assert_eq!(context("1H 1S 2H P P", Position::East), Context::Continuation);
    }

    #[test]
    fn test_slam_ask_takes_priority() {
        let ctx = context("1H P 4H P 4NT P", Position::South);
        assert!(matches!(ctx, Context::SlamAsk(_)));
        assert_eq!(ctx.name(), "slam ask");
    }

    #[test]
    fn test_opening_kinds() {
        assert_eq!(OpeningKind::of(Call::bid(1, Strain::Hearts)), OpeningKind::OneSuit(Suit::Hearts));
        assert_eq!(OpeningKind::of(Call::bid(2, Strain::NoTrump)), OpeningKind::NoTrump(2));
        assert_eq!(OpeningKind::of(Call::bid(2, Strain::Clubs)), OpeningKind::StrongTwoClubs);
        assert_eq!(OpeningKind::of(Call::bid(2, Strain::Spades)), OpeningKind::Preempt(Suit::Spades, 2));
        assert_eq!(OpeningKind::of(Call::bid(3, Strain::Clubs)), OpeningKind::Preempt(Suit::Clubs, 3));
        assert_eq!(OpeningKind::of(Call::bid(3, Strain::NoTrump)), OpeningKind::Other);
        assert_eq!(OpeningKind::of(Call::bid(4, Strain::Hearts)), OpeningKind::Other);
    }

    #[test]
    fn test_suits_bid_by() {
        let auction = Auction::parse(Position::North, Vulnerability::None, "1H P 1S P 2C P 2S P 3H").unwrap();
        assert_eq!(
            suits_bid_by(auction.entries(), Position::North),
            vec![Suit::Hearts, Suit::Clubs]
        );
        assert_eq!(suits_bid_by(auction.entries(), Position::South), vec![Suit::Spades]);
    }
}
