//! The auction state machine.
//!
//! An [`Auction`] is an append-only list of calls bound to a dealer and a
//! vulnerability. Appending returns a new value; the old one is never
//! changed. Legality depends only on the last bid and the last non-pass call,
//! which are tracked incrementally so every check is constant time.

use crate::board::{Partnership, Position, Vulnerability};
use crate::call::Call;
use crate::contract::{Contract, DoubleStatus};
use crate::error::{IllegalCall, ParseError};
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuctionEntry {
    pub seat: Position,
    pub call: Call,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuctionRecord", into = "AuctionRecord")]
pub struct Auction {
    dealer: Position,
    vulnerability: Vulnerability,
    entries: Vec<AuctionEntry>,
    last_bid: Option<usize>,
    last_non_pass: Option<usize>,
}

impl Auction {
    pub fn new(dealer: Position, vulnerability: Vulnerability) -> Self {
        Self {
            dealer,
            vulnerability,
            entries: Vec::new(),
            last_bid: None,
            last_non_pass: None,
        }
    }

    /// Replays `calls` from the dealer, rejecting the first illegal one.
    pub fn from_calls(
        dealer: Position,
        vulnerability: Vulnerability,
        calls: impl IntoIterator<Item = Call>,
    ) -> Result<Self, ParseError> {
        let mut auction = Auction::new(dealer, vulnerability);
        for (index, call) in calls.into_iter().enumerate() {
            let seat = auction.next_seat();
            auction
                .push(call, seat)
                .map_err(|source| ParseError::Auction { index, source })?;
        }
        Ok(auction)
    }

    /// Parses a call list such as `"1H P 2H X"` and replays it from the dealer.
    pub fn parse(
        dealer: Position,
        vulnerability: Vulnerability,
        calls: &str,
    ) -> Result<Self, ParseError> {
        Auction::from_calls(dealer, vulnerability, crate::call::parse_calls(calls)?)
    }

    pub fn dealer(&self) -> Position {
        self.dealer
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn entries(&self) -> &[AuctionEntry] {
        &self.entries
    }

    pub fn calls(&self) -> impl Iterator<Item = Call> + '_ {
        self.entries.iter().map(|e| e.call)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The seat whose call comes next, ignoring termination.
    pub fn next_seat(&self) -> Position {
        self.dealer.seat_after(self.entries.len())
    }

    /// The seat on turn, or `None` once the auction is over.
    pub fn turn(&self) -> Option<Position> {
        (!self.is_terminated()).then(|| self.next_seat())
    }

    /// Four passes, or three passes after any other call.
    pub fn is_terminated(&self) -> bool {
        match self.last_non_pass {
            None => self.entries.len() >= 4,
            Some(idx) => self.entries.len() - idx - 1 >= 3,
        }
    }

    pub fn is_open(&self) -> bool {
        self.last_bid.is_some()
    }

    pub fn last_bid(&self) -> Option<AuctionEntry> {
        self.last_bid.map(|i| self.entries[i])
    }

    pub fn last_non_pass(&self) -> Option<AuctionEntry> {
        self.last_non_pass.map(|i| self.entries[i])
    }

    /// The first bid of the auction.
    pub fn opening(&self) -> Option<(usize, AuctionEntry)> {
        self.entries
            .iter()
            .copied()
            .enumerate()
            .find(|(_, e)| e.call.is_bid())
    }

    pub fn opener(&self) -> Option<Position> {
        self.opening().map(|(_, e)| e.seat)
    }

    pub fn calls_by(&self, seat: Position) -> impl Iterator<Item = Call> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.seat == seat)
            .map(|e| e.call)
    }

    /// True if `seat` has made any call other than Pass.
    pub fn has_acted(&self, seat: Position) -> bool {
        self.calls_by(seat).any(|c| !c.is_pass())
    }

    pub fn partnership_has_bid(&self, partnership: Partnership) -> bool {
        self.entries
            .iter()
            .any(|e| e.call.is_bid() && partnership.contains(e.seat))
    }

    /// Why `call` by `seat` would be rejected, if it would be.
    pub fn check(&self, call: Call, seat: Position) -> Result<(), IllegalCall> {
        if self.is_terminated() {
            return Err(IllegalCall::AuctionTerminated);
        }
        let expected = self.next_seat();
        if seat != expected {
            return Err(IllegalCall::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        match call {
            Call::Pass => Ok(()),
            Call::Bid { level, .. } => {
                if !(1..=7).contains(&level) {
                    return Err(IllegalCall::InvalidLevel(level));
                }
                match self.last_bid() {
                    Some(last) if !call.outranks(last.call) => Err(IllegalCall::InsufficientBid {
                        call,
                        last: last.call,
                    }),
                    _ => Ok(()),
                }
            }
            Call::Double => match self.last_non_pass() {
                None => Err(IllegalCall::NothingToDouble),
                Some(last) if last.seat.is_partner_of(seat) => Err(IllegalCall::DoubleOfPartner),
                Some(last) if !last.call.is_bid() => Err(IllegalCall::DoubleOfNonBid),
                Some(_) => Ok(()),
            },
            Call::Redouble => match self.last_non_pass() {
                Some(last) if last.call == Call::Double => {
                    if last.seat.is_partner_of(seat) {
                        Err(IllegalCall::RedoubleOfPartner)
                    } else {
                        Ok(())
                    }
                }
                _ => Err(IllegalCall::NothingToRedouble),
            },
        }
    }

    pub fn legal(&self, call: Call, seat: Position) -> bool {
        self.check(call, seat).is_ok()
    }

    /// Returns the auction with `call` appended, or the reason it is illegal.
    pub fn append(&self, call: Call, seat: Position) -> Result<Auction, IllegalCall> {
        let mut next = self.clone();
        next.push(call, seat)?;
        Ok(next)
    }

    fn push(&mut self, call: Call, seat: Position) -> Result<(), IllegalCall> {
        self.check(call, seat)?;
        let idx = self.entries.len();
        self.entries.push(AuctionEntry { seat, call });
        if call.is_bid() {
            self.last_bid = Some(idx);
        }
        if !call.is_pass() {
            self.last_non_pass = Some(idx);
        }
        Ok(())
    }

    /// The cheapest bid in `strain` that would be sufficient now.
    pub fn cheapest_bid_in(&self, strain: Strain) -> Option<Call> {
        let floor = self.last_bid().and_then(|e| e.call.level()).unwrap_or(1);
        (floor..=7)
            .map(|level| Call::bid(level, strain))
            .find(|&bid| self.last_bid().map_or(true, |last| bid.outranks(last.call)))
    }

    /// Every call the seat on turn may make, in ladder order after Pass.
    pub fn legal_calls(&self) -> Vec<Call> {
        let Some(seat) = self.turn() else {
            return Vec::new();
        };
        let mut calls = vec![Call::Pass];
        let first = self.last_bid().and_then(|e| e.call.rank()).unwrap_or(0) + 1;
        calls.extend((first..=crate::call::BID_COUNT).filter_map(Call::from_rank));
        calls.extend(
            [Call::Double, Call::Redouble]
                .into_iter()
                .filter(|&c| self.legal(c, seat)),
        );
        calls
    }

    /// The contract as it stands: the last bid, its doubling, and the first
    /// player of that side to name the strain.
    pub fn current_contract(&self) -> Option<Contract> {
        let last = self.last_bid()?;
        let strain = last.call.strain()?;
        let level = last.call.level()?;
        let side = last.seat.partnership();
        let declarer = self
            .entries
            .iter()
            .find(|e| side.contains(e.seat) && e.call.strain() == Some(strain))
            .map_or(last.seat, |e| e.seat);
        let double_status = match self.last_non_pass()?.call {
            Call::Double => DoubleStatus::Doubled,
            Call::Redouble => DoubleStatus::Redoubled,
            _ => DoubleStatus::Undoubled,
        };
        Some(Contract {
            level,
            strain,
            double_status,
            declarer,
        })
    }

    /// The final contract once the auction has ended; `None` while it is
    /// still running or if it was passed out.
    pub fn final_contract(&self) -> Option<Contract> {
        if !self.is_terminated() {
            return None;
        }
        self.current_contract()
    }
}

impl fmt::Display for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let calls: Vec<String> = self.calls().map(Call::render).collect();
        f.write_str(&calls.join(" "))
    }
}

/// Plain structural form of an [`Auction`], used for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionRecord {
    pub dealer: Position,
    pub vulnerability: Vulnerability,
    pub calls: Vec<AuctionEntry>,
}

impl TryFrom<AuctionRecord> for Auction {
    type Error = ParseError;

    fn try_from(record: AuctionRecord) -> Result<Self, Self::Error> {
        let mut auction = Auction::new(record.dealer, record.vulnerability);
        for (index, entry) in record.calls.into_iter().enumerate() {
            auction
                .push(entry.call, entry.seat)
                .map_err(|source| ParseError::Auction { index, source })?;
        }
        Ok(auction)
    }
}

impl From<Auction> for AuctionRecord {
    fn from(auction: Auction) -> Self {
        AuctionRecord {
            dealer: auction.dealer,
            vulnerability: auction.vulnerability,
            calls: auction.entries,
        }
    }
}
