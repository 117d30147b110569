//! Slam conventions: starting an ask, answering it, and placing the contract.

use super::Rule;
use crate::context::Context;
use crate::situation::Situation;
use crate::slam::{count_for, gerber_platform, step_for, Convention, SlamSequence, SlamState};
use bridge_core::{Call, Strain};

fn sequence(s: &Situation<'_>, state: SlamState) -> Option<SlamSequence> {
    match s.context {
        Context::SlamAsk(sequence) if sequence.state == state => Some(sequence),
        _ => None,
    }
}

bidding_rule! {
    struct StartBlackwood;
    name: "Blackwood",
    description: "Agreed suit and slam values: ask for aces with 4NT",
    propose: |s| {
        s.agreed_fit()?;
        (s.combined_points() >= s.system.targets.small_slam)
            .then_some(Convention::Blackwood.ace_ask())
    }
}

bidding_rule! {
    struct StartGerber;
    name: "Gerber",
    description: "Slam values directly over partner's notrump: ask for aces with 4C",
    propose: |s| {
        (gerber_platform(s.auction.entries(), s.seat)
            && s.combined_hcp() >= s.system.targets.small_slam)
            .then_some(Convention::Gerber.ace_ask())
    }
}

bidding_rule! {
    struct AnswerAces;
    name: "Ace Reply",
    description: "Step reply: 0 or 4, 1, 2, 3 aces",
    propose: |s| {
        let sequence = sequence(s, SlamState::AcesAsked)?;
        sequence.convention.ace_ask().step_up(step_for(s.eval.aces))
    }
}

bidding_rule! {
    struct AnswerKings;
    name: "King Reply",
    description: "Step reply: 0 or 4, 1, 2, 3 kings",
    propose: |s| {
        let sequence = sequence(s, SlamState::KingsAsked)?;
        sequence.convention.king_ask().step_up(step_for(s.eval.kings))
    }
}

bidding_rule! {
    /// Two aces missing: stop as cheaply as possible. Three held: small
    /// slam. All four: ask for kings.
    struct PlaceAfterAces;
    name: "Slam Decision",
    description: "Sign off, bid a small slam, or ask for kings",
    propose: |s| {
        let sequence = sequence(s, SlamState::AcesAnswered)?;
        let own = s.eval.aces;
        let aces = own + count_for(sequence.ace_step?, own);
        let reply = s.auction.last_bid()?.call;
        match aces {
            0..=2 if reply.strain() == Some(sequence.strain) => Some(Call::Pass),
            0..=2 => s.cheapest(sequence.strain),
            3 => Some(Call::bid(6, sequence.strain)),
            _ => Some(sequence.convention.king_ask()),
        }
    }
}

bidding_rule! {
    struct PlaceAfterKings;
    name: "Grand Slam Decision",
    description: "All kings, or one missing with grand slam values: bid seven",
    propose: |s| {
        let sequence = sequence(s, SlamState::KingsAnswered)?;
        let own = s.eval.kings;
        let kings = own + count_for(sequence.king_step?, own);
        let grand = kings >= 4 || (kings == 3 && s.combined_points() >= s.system.targets.grand_slam);
        let level = if grand { 7 } else { 6 };
        [Call::bid(level, sequence.strain), Call::bid(level, Strain::NoTrump)]
            .into_iter()
            .find(|&call| s.is_legal(call))
    }
}

bidding_rule! {
    struct SettleInSix;
    name: "Small Slam",
    description: "Settle in 6NT when the king reply went past the agreed suit",
    propose: |s| {
        sequence(s, SlamState::KingsAnswered)?;
        [Call::bid(6, Strain::NoTrump), Call::Pass]
            .into_iter()
            .find(|&call| s.is_legal(call))
    }
}

pub static RULES: &[&dyn Rule] = &[
    &AnswerAces,
    &AnswerKings,
    &PlaceAfterAces,
    &PlaceAfterKings,
    &SettleInSix,
];

#[cfg(test)]
mod tests {
    use crate::rules::testing::bid;
    use bridge_core::{Call, Strain};

    #[test]
    fn test_two_aces_is_the_third_step() {
        assert_eq!(
            bid("A32.A32.Q432.432", "1H P 4H P 4NT P"),
            Call::bid(5, Strain::Hearts)
        );
    }

    #[test]
    fn test_zero_aces_is_the_first_step() {
        assert_eq!(
            bid("Q32.Q32.K432.432", "1H P 4H P 4NT P"),
            Call::bid(5, Strain::Clubs)
        );
    }

    #[test]
    fn test_gerber_reply() {
        // One ace: 4D would be none or four.
        assert_eq!(bid("A32.K32.Q32.K432", "1NT P 4C P"), Call::bid(4, Strain::Hearts));
    }

    #[test]
    fn test_asker_signs_off_with_two_aces_missing() {
        assert_eq!(
            bid("K2.A2.KQJ5432.KQ", "1H P 4H P 4NT P 5D P"),
            Call::bid(5, Strain::Hearts)
        );
    }

    #[test]
    fn test_asker_bids_small_slam_with_three_aces() {
        assert_eq!(
            bid("A2.A2.KQJ5432.KQ", "1H P 4H P 4NT P 5D P"),
            Call::bid(6, Strain::Hearts)
        );
    }

    #[test]
    fn test_asker_asks_for_kings_with_all_aces() {
        let hand = "A2.A2.KQJ5432.AQ";
        assert_eq!(
            bid(hand, "1H P 4H P 4NT P 5D P"),
            Call::bid(5, Strain::NoTrump)
        );
        assert_eq!(
            bid(hand, "1H P 4H P 4NT P 5D P 5NT P 6C P"),
            Call::bid(6, Strain::Hearts)
        );
    }
}
