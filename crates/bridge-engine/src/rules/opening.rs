//! Opening bids.

use super::Rule;
use crate::situation::Situation;
use bridge_core::{Call, Strain, Suit};

bidding_rule! {
    struct StrongTwoClubs;
    name: "Strong 2C",
    description: "23+ HCP, artificial and forcing",
    propose: |s| {
        (s.hcp() >= s.system.opening.strong_two_clubs).then_some(Call::bid(2, Strain::Clubs))
    }
}

bidding_rule! {
    struct TwoNoTrump;
    name: "2NT Opening",
    description: "Balanced with 20-22 HCP",
    propose: |s| {
        (s.eval.balanced && s.system.opening.two_notrump.contains(s.hcp()))
            .then_some(Call::bid(2, Strain::NoTrump))
    }
}

/// Preempts are not made in fourth seat, where passing ends the hand.
fn may_preempt(s: &Situation<'_>) -> bool {
    s.seat_number() < 4
}

bidding_rule! {
    struct WeakTwo;
    name: "Weak Two",
    description: "6-10 HCP with a good six-card suit other than clubs",
    propose: |s| {
        if !may_preempt(s) || !s.system.opening.weak_two.contains(s.hcp()) {
            return None;
        }
        [Suit::Spades, Suit::Hearts, Suit::Diamonds]
            .into_iter()
            .find(|&suit| s.length(suit) == 6 && s.hand.has_good_suit(suit, 6))
            .map(|suit| Call::bid(2, suit.into()))
    }
}

bidding_rule! {
    struct ThreeLevelPreempt;
    name: "Three-Level Preempt",
    description: "Weak hand with a good seven-card suit",
    propose: |s| {
        let range = s.system.opening.preempt;
        let min = if s.vulnerable() {
            s.system.opening.vulnerable_preempt_min
        } else {
            range.min
        };
        if !may_preempt(s) || s.hcp() < min || s.hcp() > range.max {
            return None;
        }
        Suit::BY_PRIORITY
            .into_iter()
            .find(|&suit| s.length(suit) >= 7 && s.hand.has_good_suit(suit, 7))
            .map(|suit| Call::bid(3, suit.into()))
    }
}

bidding_rule! {
    struct OneNoTrump;
    name: "1NT Opening",
    description: "Balanced with 12-14 HCP",
    propose: |s| {
        (s.eval.balanced && s.system.opening.one_notrump.contains(s.hcp()))
            .then_some(Call::bid(1, Strain::NoTrump))
    }
}

/// Longest five-card suit, higher-ranking on ties; otherwise the cheapest
/// four-card suit.
pub fn opening_suit(s: &Situation<'_>) -> Suit {
    let longest = s.hand.longest_suit();
    if s.length(longest) >= 5 {
        return longest;
    }
    Suit::ALL
        .into_iter()
        .find(|&suit| s.length(suit) >= 4)
        .unwrap_or(longest)
}

bidding_rule! {
    struct OneOfASuit;
    name: "One of a Suit",
    description: "12+ HCP or Rule of 20; Rule of 15 in fourth seat",
    propose: |s| {
        let opening = &s.system.opening;
        let strong_enough = if s.seat_number() == 4 {
            s.hand.rule_of_fifteen() >= opening.fourth_seat
        } else {
            s.hcp() >= opening.min_hcp || s.hand.rule_of_twenty() >= opening.rule_of_twenty
        };
        strong_enough.then(|| Call::bid(1, opening_suit(s).into()))
    }
}

pub static RULES: &[&dyn Rule] = &[
    &StrongTwoClubs,
    &TwoNoTrump,
    &WeakTwo,
    &ThreeLevelPreempt,
    &OneNoTrump,
    &OneOfASuit,
];

#[cfg(test)]
mod tests {
    use crate::rules::testing::{bid, bid_with};
    use bridge_core::{Call, Position, Strain, Vulnerability};

    #[test]
    fn test_two_notrump_with_twenty_one_balanced() {
        // 21 HCP, 4-3-3-3.
        assert_eq!(bid("KQ2.AQ2.KJ2.AQ32", ""), Call::bid(2, Strain::NoTrump));
    }

    #[test]
    fn test_strong_two_clubs() {
        assert_eq!(bid("AKQ.AKQ.KQ2.AQ32", ""), Call::bid(2, Strain::Clubs));
    }

    #[test]
    fn test_weak_two_spades() {
        // 7 HCP, AQ sixth in spades.
        assert_eq!(bid("432.J2.43.AQ9876", ""), Call::bid(2, Strain::Spades));
    }

    #[test]
    fn test_no_weak_two_in_fourth_seat() {
        assert_eq!(bid("432.J2.43.AQ9876", "P P P"), Call::Pass);
    }

    #[test]
    fn test_three_level_preempt_respects_vulnerability() {
        // 7 HCP, KQ seventh in hearts.
        let hand = "32.Q32.KQ98765.2";
        assert_eq!(bid(hand, ""), Call::bid(3, Strain::Hearts));
        assert_eq!(
            bid_with(hand, "", Position::North, Vulnerability::Both),
            Call::Pass
        );
    }

    #[test]
    fn test_one_notrump_weak() {
        assert_eq!(bid("K32.A32.Q32.K432", ""), Call::bid(1, Strain::NoTrump));
    }

    #[test]
    fn test_longest_suit_first() {
        // 12 HCP, five hearts and four spades.
        assert_eq!(bid("2.K32.AQ432.K432", ""), Call::bid(1, Strain::Hearts));
    }

    #[test]
    fn test_four_card_suits_up_the_line() {
        // 4-4-4-1 with 12 HCP.
        assert_eq!(bid("K432.A432.Q432.K", ""), Call::bid(1, Strain::Clubs));
    }

    #[test]
    fn test_rule_of_twenty() {
        // 10 HCP, 5-5.
        assert_eq!(bid("J.43.AK432.Q5432", ""), Call::bid(1, Strain::Spades));
    }

    #[test]
    fn test_rule_of_fifteen_in_fourth_seat() {
        // 11 HCP with four spades opens; with three it does not.
        assert_eq!(bid("A32.K32.J32.QJ32", "P P P"), Call::bid(1, Strain::Spades));
        assert_eq!(bid("AJ3.KJ2.Q432.432", "P P P"), Call::Pass);
    }

    #[test]
    fn test_weak_hand_passes() {
        assert_eq!(bid("432.432.5432.K32", ""), Call::Pass);
    }
}
