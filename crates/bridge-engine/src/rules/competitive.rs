//! Our side opened and the opponents have come in.

use super::slam::StartBlackwood;
use super::Rule;
use crate::situation::Situation;
use bridge_core::{Call, Strain, Suit};

/// Partner opened and we have not yet called anything but pass.
fn responding(s: &Situation<'_>) -> bool {
    s.opening().is_some_and(|e| e.seat == s.seat.partner()) && s.my_actions().is_empty()
}

fn opened(s: &Situation<'_>) -> bool {
    s.opening().is_some_and(|e| e.seat == s.seat)
}

/// Support needed to raise: three cards for a major, four for a minor.
fn supports(s: &Situation<'_>, suit: Suit) -> bool {
    s.length(suit) >= if suit.is_major() { 3 } else { 4 }
}

bidding_rule! {
    struct Redouble;
    name: "Redouble",
    description: "10+ HCP over a takeout double of partner's opening",
    propose: |s| {
        (responding(s)
            && s.their_last_action()? == Call::Double
            && s.hcp() >= s.system.competition.redouble_min)
            .then_some(Call::Redouble)
    }
}

bidding_rule! {
    struct NegativeDouble;
    name: "Negative Double",
    description: "8+ HCP with four cards in an unbid major",
    propose: |s| {
        let competition = &s.system.competition;
        if !responding(s) || s.hcp() < competition.negative_double_min {
            return None;
        }
        let theirs = s.their_last_action()?;
        let their_suit = theirs.suit()?;
        if theirs.level()? > competition.negative_double_max_level || s.length(their_suit) > 3 {
            return None;
        }
        let unbid = s.unbid_suits();
        [Suit::Spades, Suit::Hearts]
            .into_iter()
            .any(|major| unbid.contains(&major) && s.length(major) >= 4)
            .then_some(Call::Double)
    }
}

bidding_rule! {
    struct CueBid;
    name: "Cue Bid",
    description: "11+ HCP without a negative double: bid their suit to force",
    propose: |s| {
        if !responding(s) || s.hcp() < s.system.competition.cue_bid_min {
            return None;
        }
        s.cheapest(s.their_last_suit()?)
    }
}

bidding_rule! {
    struct Raise;
    name: "Competitive Raise",
    description: "Support for partner's suit: game with the values, otherwise the cheapest raise",
    propose: |s| {
        let ours = s.opening_suit()?;
        if !responding(s) || !supports(s, ours) || s.hcp() < s.system.responses.single_raise.min {
            return None;
        }
        if s.combined_points() >= s.system.targets.game {
            if let Some(game) = s.game_in(ours) {
                return Some(game);
            }
        }
        s.cheapest_up_to(ours, 3)
    }
}

bidding_rule! {
    struct NewSuit;
    name: "Free Bid",
    description: "Five-card suit: 8+ HCP at the one level, 10+ at the two level",
    propose: |s| {
        if !responding(s) {
            return None;
        }
        let suit = s.longest_among(&s.unbid_suits(), 5)?;
        let bid = s.cheapest_up_to(suit, 2)?;
        let responses = &s.system.responses;
        let needed = if bid.level()? == 1 {
            s.system.competition.negative_double_min
        } else {
            responses.two_level_new_suit
        };
        (s.hcp() >= needed).then_some(bid)
    }
}

bidding_rule! {
    struct NoTrump;
    name: "Competitive Notrump",
    description: "Balanced with a stopper: 1NT 6-9, 2NT 10-12, 3NT 13+",
    propose: |s| {
        if !responding(s) || !s.eval.balanced || !s.has_stopper(s.their_last_suit()?) {
            return None;
        }
        let responses = &s.system.responses;
        let level = if s.hcp() >= responses.three_notrump.min {
            3
        } else if responses.two_notrump.contains(s.hcp()) {
            2
        } else if responses.one_notrump.contains(s.hcp()) {
            1
        } else {
            return None;
        };
        Some(Call::bid(level, Strain::NoTrump)).filter(|&c| s.is_legal(c))
    }
}

bidding_rule! {
    struct OpenerCompetes;
    name: "Opener Competes",
    description: "Six-card suit: repeat it up to the three level",
    propose: |s| {
        if !opened(s) {
            return None;
        }
        let ours = s.opening_suit()?;
        (s.length(ours) >= 6).then(|| s.cheapest_up_to(ours, 3)).flatten()
    }
}

bidding_rule! {
    struct FitCompetition;
    name: "Compete to Game",
    description: "Eight-card fit and 25+ combined points",
    propose: |s| {
        let suit = s.fit_suit()?;
        (s.combined_points() >= s.system.targets.game)
            .then(|| s.game_in(suit))
            .flatten()
    }
}

pub static RULES: &[&dyn Rule] = &[
    &StartBlackwood,
    &Redouble,
    &NegativeDouble,
    &CueBid,
    &Raise,
    &NewSuit,
    &NoTrump,
    &OpenerCompetes,
    &FitCompetition,
];

#[cfg(test)]
mod tests {
    use crate::rules::testing::bid;
    use bridge_core::{Call, Strain};

    #[test]
    fn test_negative_double_shows_unbid_major() {
        assert_eq!(bid("432.K32.AJ32.Q32", "1C 1S"), Call::Double);
    }

    #[test]
    fn test_redouble_with_values() {
        assert_eq!(bid("K32.A32.Q32.K432", "1H X"), Call::Redouble);
    }

    #[test]
    fn test_raise_over_interference() {
        assert_eq!(bid("Q32.K432.J32.432", "1H 1S"), Call::bid(2, Strain::Hearts));
    }

    #[test]
    fn test_cue_bid_without_support() {
        // 16 HCP, three clubs, no heart stop and no four-card major.
        assert_eq!(bid("432.AKQ2.432.AK2", "1C 1H"), Call::bid(2, Strain::Hearts));
    }

    #[test]
    fn test_cue_bid_with_support() {
        assert_eq!(bid("2.AQ2.KJ32.K5432", "1H 1S"), Call::bid(2, Strain::Spades));
    }

    #[test]
    fn test_notrump_with_a_stopper() {
        assert_eq!(bid("Q432.432.J32.K32", "1D 1S"), Call::bid(1, Strain::NoTrump));
    }

    #[test]
    fn test_opener_repeats_six_card_suit() {
        assert_eq!(
            bid("2.K32.AKJ432.Q32", "1H 1S 2C 2S"),
            Call::bid(3, Strain::Hearts)
        );
    }
}
