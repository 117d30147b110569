//! Acol bidding engine.
//!
//! [`Bidder::next_call`] re-reads the auction on every call: it detects the
//! context, infers what partner has shown, and walks that context's rule
//! list. The auction is the only state.

pub mod context;
pub mod evaluation;
pub mod inference;
pub mod rules;
pub mod selector;
pub mod situation;
pub mod slam;
pub mod system;
pub mod trace;

use bridge_core::io::identifier;
use bridge_core::{Auction, Call, Hand, ParseError, Position};
use situation::Situation;
use system::{SystemConfig, SystemError};
use trace::BidTrace;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct Bidder {
    system: SystemConfig,
}

impl Bidder {
    pub fn new(system: SystemConfig) -> Self {
        Self { system }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SystemError> {
        SystemConfig::from_yaml(yaml).map(Self::new)
    }

    pub fn system(&self) -> &SystemConfig {
        &self.system
    }

    /// The call `seat` should make with `hand` at the end of `auction`.
    /// Always legal; Pass when nothing else applies.
    pub fn next_call(&self, hand: &Hand, auction: &Auction, seat: Position) -> Call {
        self.next_call_with_trace(hand, auction, seat).selected_call
    }

    pub fn next_call_with_trace(&self, hand: &Hand, auction: &Auction, seat: Position) -> BidTrace {
        let situation = Situation::new(hand, auction, seat, &self.system);
        if auction.turn() != Some(seat) {
            warn!(?seat, turn = ?auction.turn(), "asked for a call out of turn, passing");
            return BidTrace {
                seat,
                hand: hand.clone(),
                context: situation.context,
                profile: situation.partner,
                rules_considered: Vec::new(),
                selected_rule: None,
                selected_call: Call::Pass,
            };
        }
        let selection = selector::select(&situation);
        BidTrace {
            seat,
            hand: hand.clone(),
            context: situation.context,
            profile: situation.partner,
            rules_considered: selection.considered,
            selected_rule: selection.rule,
            selected_call: selection.call,
        }
    }
}

/// Reads a board identifier and returns the call for the seat on turn,
/// using the default Acol card. A finished auction yields Pass.
pub fn get_next_call(identifier: &str) -> Result<Call, ParseError> {
    let (deal, auction) = identifier::import_board(identifier)?;
    let auction = auction.unwrap_or_else(|| Auction::new(deal.dealer(), deal.vulnerability()));
    let Some(seat) = auction.turn() else {
        return Ok(Call::Pass);
    };
    Ok(Bidder::default().next_call(deal.hand(seat), &auction, seat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::{Deal, Strain, Vulnerability};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_get_next_call_reads_the_identifier() {
        let mut rng = StdRng::seed_from_u64(7);
        let deal = Deal::random(
            &mut rng,
            Position::dealer_from_board_number(1),
            Vulnerability::from_board_number(1),
        );
        let expected = Bidder::default().next_call(
            deal.hand(Position::North),
            &Auction::new(deal.dealer(), deal.vulnerability()),
            Position::North,
        );
        let id = identifier::export_board(&deal, 1, None);
        assert_eq!(get_next_call(&id).unwrap(), expected);
        assert!(get_next_call("not-an-identifier").is_err());
    }

    #[test]
    fn test_out_of_turn_passes() {
        let hand = Hand::parse("AKQ.AKQ.KQ2.AQ32").unwrap();
        let auction = Auction::new(Position::North, Vulnerability::None);
        let trace = Bidder::default().next_call_with_trace(&hand, &auction, Position::South);
        assert_eq!(trace.selected_call, Call::Pass);
        assert!(trace.rules_considered.is_empty());
    }

    #[test]
    fn test_custom_system() {
        let yaml = system::ACOL_YAML.replace(
            "one_notrump: { min: 12, max: 14 }",
            "one_notrump: { min: 15, max: 17 }",
        );
        let bidder = Bidder::from_yaml(&yaml).unwrap();
        let hand = Hand::parse("K32.A32.Q32.K432").unwrap();
        let auction = Auction::new(Position::North, Vulnerability::None);
        // Too weak for a strong notrump: open the four-card spade suit.
        assert_eq!(
            bidder.next_call(&hand, &auction, Position::North),
            Call::bid(1, Strain::Spades)
        );
    }

    #[test]
    fn test_zero_thresholds_do_not_underflow() {
        let yaml = system::ACOL_YAML
            .replace("min_hcp: 12", "min_hcp: 0")
            .replace("forcing_min: 6", "forcing_min: 0")
            .replace("strong_two_positive: 8", "strong_two_positive: 0");
        let bidder = Bidder::from_yaml(&yaml).unwrap();
        let auction = Auction::parse(Position::North, Vulnerability::None, "1H P P 1S").unwrap();
        let hand = Hand::parse("2.AKJ32.K32.Q432").unwrap();
        bidder.next_call_with_trace(&hand, &auction, Position::North);
    }
}
