//! Everything a rule may look at when proposing a call.

use crate::context::{actions_by, suits_bid_by, Context, OpeningKind};
use crate::evaluation::HandEvaluation;
use crate::inference::PartnerProfile;
use crate::slam;
use crate::system::SystemConfig;
use bridge_core::{Auction, AuctionEntry, Call, Hand, Position, Strain, Suit};

pub struct Situation<'a> {
    pub hand: &'a Hand,
    pub eval: HandEvaluation,
    pub auction: &'a Auction,
    pub seat: Position,
    pub system: &'a SystemConfig,
    pub context: Context,
    pub partner: PartnerProfile,
}

impl<'a> Situation<'a> {
    pub fn new(
        hand: &'a Hand,
        auction: &'a Auction,
        seat: Position,
        system: &'a SystemConfig,
    ) -> Self {
        Situation {
            hand,
            eval: HandEvaluation::new(hand),
            auction,
            seat,
            system,
            context: Context::detect(auction, seat),
            partner: PartnerProfile::infer(auction, seat.partner(), system),
        }
    }

    pub fn hcp(&self) -> u8 {
        self.eval.hcp
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.eval.length(suit)
    }

    pub fn is_legal(&self, call: Call) -> bool {
        self.auction.legal(call, self.seat)
    }

    pub fn vulnerable(&self) -> bool {
        self.auction.vulnerability().is_vulnerable(self.seat)
    }

    /// The cheapest sufficient bid in `strain`.
    pub fn cheapest(&self, strain: impl Into<Strain>) -> Option<Call> {
        self.auction.cheapest_bid_in(strain.into())
    }

    /// One level above the cheapest sufficient bid in `strain`.
    pub fn jump(&self, strain: impl Into<Strain>) -> Option<Call> {
        let cheapest = self.cheapest(strain)?;
        cheapest.step_up(5)
    }

    /// The cheapest bid in `strain`, provided it is no higher than `max_level`.
    pub fn cheapest_up_to(&self, strain: impl Into<Strain>, max_level: u8) -> Option<Call> {
        self.cheapest(strain)
            .filter(|c| c.level().is_some_and(|level| level <= max_level))
    }

    /// Game in `strain`, if it is still sufficient.
    pub fn game_in(&self, strain: impl Into<Strain>) -> Option<Call> {
        let strain = strain.into();
        Some(Call::bid(strain.game_level(), strain)).filter(|&c| self.is_legal(c))
    }

    pub fn opening(&self) -> Option<AuctionEntry> {
        self.auction.opening().map(|(_, e)| e)
    }

    pub fn opening_kind(&self) -> Option<OpeningKind> {
        self.opening().map(|e| OpeningKind::of(e.call))
    }

    /// The opponents' opening suit, or partner's when our side opened.
    pub fn opening_suit(&self) -> Option<Suit> {
        self.opening().and_then(|e| e.call.suit())
    }

    pub fn actions_by(&self, seat: Position) -> Vec<Call> {
        actions_by(self.auction.entries(), seat).collect()
    }

    pub fn my_actions(&self) -> Vec<Call> {
        self.actions_by(self.seat)
    }

    pub fn partner_actions(&self) -> Vec<Call> {
        self.actions_by(self.seat.partner())
    }

    pub fn partner_first(&self) -> Option<Call> {
        actions_by(self.auction.entries(), self.seat.partner()).next()
    }

    pub fn partner_last(&self) -> Option<Call> {
        actions_by(self.auction.entries(), self.seat.partner()).last()
    }

    pub fn my_first(&self) -> Option<Call> {
        actions_by(self.auction.entries(), self.seat).next()
    }

    pub fn my_suits(&self) -> Vec<Suit> {
        suits_bid_by(self.auction.entries(), self.seat)
    }

    pub fn partner_suits(&self) -> Vec<Suit> {
        suits_bid_by(self.auction.entries(), self.seat.partner())
    }

    pub fn their_suits(&self) -> Vec<Suit> {
        let entries = self.auction.entries();
        let mut suits = suits_bid_by(entries, self.seat.lho());
        for suit in suits_bid_by(entries, self.seat.rho()) {
            if !suits.contains(&suit) {
                suits.push(suit);
            }
        }
        suits
    }

    /// The suit of the opponents' most recent bid.
    pub fn their_last_suit(&self) -> Option<Suit> {
        self.their_last_bid().and_then(Call::suit)
    }

    pub fn their_last_bid(&self) -> Option<Call> {
        self.auction
            .entries()
            .iter()
            .rev()
            .find(|e| e.seat.partnership() != self.seat.partnership() && e.call.is_bid())
            .map(|e| e.call)
    }

    /// The opponents' most recent non-pass call.
    pub fn their_last_action(&self) -> Option<Call> {
        self.auction
            .entries()
            .iter()
            .rev()
            .find(|e| e.seat.partnership() != self.seat.partnership() && !e.call.is_pass())
            .map(|e| e.call)
    }

    /// Suits nobody at the table has bid.
    pub fn unbid_suits(&self) -> Vec<Suit> {
        let entries = self.auction.entries();
        Suit::BY_PRIORITY
            .into_iter()
            .filter(|&s| {
                Position::ALL
                    .iter()
                    .all(|&p| !suits_bid_by(entries, p).contains(&s))
            })
            .collect()
    }

    /// Eight or more cards between us, counting only what partner has shown.
    pub fn fit(&self, suit: Suit) -> bool {
        self.length(suit) + self.partner.length(suit) >= 8
    }

    /// A suit partner has shown three or more cards in and we fit, majors
    /// first.
    pub fn fit_suit(&self) -> Option<Suit> {
        Suit::BY_PRIORITY
            .into_iter()
            .find(|&s| self.partner.length(s) >= 3 && self.fit(s))
    }

    /// Our HCP plus the minimum partner has shown.
    pub fn combined_hcp(&self) -> u8 {
        self.eval.hcp + self.partner.min_hcp
    }

    /// Our HCP and length points plus the minimum partner has shown.
    pub fn combined_points(&self) -> u8 {
        self.eval.total_points() + self.partner.min_hcp
    }

    pub fn agreed_fit(&self) -> Option<Suit> {
        slam::agreed_fit(self.auction.entries(), self.seat.partnership())
    }

    /// Our seat counted from the dealer, 1 to 4.
    pub fn seat_number(&self) -> usize {
        (self.seat.idx() + 4 - self.auction.dealer().idx()) % 4 + 1
    }

    /// Longest suit of at least `min_len` among `candidates`, earlier
    /// candidates winning ties.
    pub fn longest_among(&self, candidates: &[Suit], min_len: u8) -> Option<Suit> {
        self.eval
            .longest_of(candidates.iter().copied())
            .filter(|&s| self.length(s) >= min_len)
    }

    pub fn has_stopper(&self, suit: Suit) -> bool {
        self.hand.has_stopper(suit)
    }
}
