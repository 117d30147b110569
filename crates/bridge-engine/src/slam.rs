//! Ace and king asking.
//!
//! A sequence is read back from the auction on every decision: an ace ask
//! (4NT over an agreed suit, 4C directly over partner's notrump), the step
//! reply, an optional king ask one rung up, and its step reply. Any
//! opposing non-pass call, or a partnership call that does not fit the next
//! step, ends the sequence and later calls are read as natural.

use bridge_core::{Auction, AuctionEntry, Call, Partnership, Position, Strain, Suit};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Convention {
    Gerber,
    Blackwood,
}

impl Convention {
    pub fn ace_ask(self) -> Call {
        match self {
            Convention::Gerber => Call::bid(4, Strain::Clubs),
            Convention::Blackwood => Call::bid(4, Strain::NoTrump),
        }
    }

    pub fn king_ask(self) -> Call {
        match self {
            Convention::Gerber => Call::bid(5, Strain::Clubs),
            Convention::Blackwood => Call::bid(5, Strain::NoTrump),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlamState {
    NotAsked,
    AcesAsked,
    AcesAnswered,
    KingsAsked,
    KingsAnswered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlamSequence {
    pub state: SlamState,
    pub convention: Convention,
    pub asker: Position,
    /// The agreed suit for Blackwood, notrump for Gerber.
    pub strain: Strain,
    pub ace_step: Option<u8>,
    pub king_step: Option<u8>,
}

/// Step used to show `count` aces or kings: 0 or 4 is the first step.
pub fn step_for(count: u8) -> u8 {
    match count {
        0 | 4 => 1,
        n => n + 1,
    }
}

/// Inverse of [`step_for`]; the first step is read as 4 only when the
/// asker holds none.
pub fn count_for(step: u8, own: u8) -> u8 {
    match step {
        1 if own == 0 => 4,
        1 => 0,
        n => n - 1,
    }
}

/// The latest suit bid by both partners where the later bid was at the
/// three level or higher.
pub fn agreed_fit(entries: &[AuctionEntry], partnership: Partnership) -> Option<Suit> {
    let ours: Vec<AuctionEntry> = entries
        .iter()
        .copied()
        .filter(|e| partnership.contains(e.seat))
        .collect();
    ours.iter().enumerate().rev().find_map(|(i, later)| {
        let level = later.call.level()?;
        let suit = later.call.suit()?;
        let raised = level >= 3
            && ours[..i]
                .iter()
                .any(|e| e.seat == later.seat.partner() && e.call.suit() == Some(suit));
        raised.then_some(suit)
    })
}

/// True if a 4C by `seat` now would ask for aces: the last bid is
/// partner's natural notrump at the three level or lower and no suit is
/// agreed.
pub fn gerber_platform(entries: &[AuctionEntry], seat: Position) -> bool {
    let last_bid = entries.iter().rev().find(|e| e.call.is_bid());
    let over_notrump = matches!(
        last_bid,
        Some(e) if e.seat == seat.partner()
            && e.call.is_notrump()
            && e.call.level().is_some_and(|level| level <= 3)
    );
    over_notrump && agreed_fit(entries, seat.partnership()).is_none()
}

fn reply_step(ask: Call, reply: Call) -> Option<u8> {
    (1..=4).find(|&n| ask.step_up(n) == Some(reply))
}

impl SlamSequence {
    fn asked(convention: Convention, asker: Position, strain: Strain) -> Self {
        SlamSequence {
            state: SlamState::AcesAsked,
            convention,
            asker,
            strain,
            ace_step: None,
            king_step: None,
        }
    }

    /// The sequence in progress at the end of `auction`, if any.
    pub fn read(auction: &Auction) -> Option<SlamSequence> {
        let entries = auction.entries();
        let mut current: Option<SlamSequence> = None;
        for (i, &entry) in entries.iter().enumerate() {
            current = current.and_then(|sequence| sequence.advance(entry));
            if current.is_none() {
                current = SlamSequence::ask_at(&entries[..i], entry);
            }
        }
        current
    }

    pub fn state_of(auction: &Auction) -> SlamState {
        SlamSequence::read(auction).map_or(SlamState::NotAsked, |s| s.state)
    }

    fn ask_at(before: &[AuctionEntry], entry: AuctionEntry) -> Option<SlamSequence> {
        if entry.call == Convention::Blackwood.ace_ask() {
            let suit = agreed_fit(before, entry.seat.partnership())?;
            Some(SlamSequence::asked(
                Convention::Blackwood,
                entry.seat,
                Strain::from_suit(suit),
            ))
        } else if entry.call == Convention::Gerber.ace_ask() && gerber_platform(before, entry.seat)
        {
            Some(SlamSequence::asked(
                Convention::Gerber,
                entry.seat,
                Strain::NoTrump,
            ))
        } else {
            None
        }
    }

    fn advance(mut self, entry: AuctionEntry) -> Option<SlamSequence> {
        if !self.asker.partnership().contains(entry.seat) {
            return entry.call.is_pass().then_some(self);
        }
        let responder = self.asker.partner();
        match self.state {
            SlamState::AcesAsked if entry.seat == responder => {
                self.ace_step = Some(reply_step(self.convention.ace_ask(), entry.call)?);
                self.state = SlamState::AcesAnswered;
            }
            SlamState::AcesAnswered
                if entry.seat == self.asker && entry.call == self.convention.king_ask() =>
            {
                self.state = SlamState::KingsAsked;
            }
            SlamState::KingsAsked if entry.seat == responder => {
                self.king_step = Some(reply_step(self.convention.king_ask(), entry.call)?);
                self.state = SlamState::KingsAnswered;
            }
            _ => return None,
        }
        Some(self)
    }

    /// True if the next call of this sequence belongs to `seat`.
    pub fn awaits(&self, seat: Position) -> bool {
        match self.state {
            SlamState::AcesAsked | SlamState::KingsAsked => seat == self.asker.partner(),
            SlamState::AcesAnswered | SlamState::KingsAnswered => seat == self.asker,
            SlamState::NotAsked => false,
        }
    }
}
