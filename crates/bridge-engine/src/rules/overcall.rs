//! First action over an opponent's opening, in the direct or balancing seat.
//!
//! The balancing seat gets lower thresholds from the system's `BySeat`
//! entries; weak jump overcalls are only made directly.

use super::Rule;
use crate::context::Context;
use crate::situation::Situation;
use bridge_core::{Call, Strain, Suit};

fn balancing(s: &Situation<'_>) -> bool {
    s.context == Context::BalancingSeat
}

/// The suit of the opponents' last bid, when it was a suit.
fn their_suit(s: &Situation<'_>) -> Option<Suit> {
    s.their_last_bid()?.suit()
}

fn over_notrump(s: &Situation<'_>) -> bool {
    s.their_last_bid().is_some_and(Call::is_notrump)
}

bidding_rule! {
    /// Short in their suit with three cards in every unbid suit, or four
    /// cards in each when they opened a minor.
    struct TakeoutDouble;
    name: "Takeout Double",
    description: "Opening values, shortness in their suit, support for the others",
    propose: |s| {
        let theirs = their_suit(s)?;
        let needed = s.system.competition.takeout_double.get(balancing(s));
        if s.eval.total_points() < needed || s.length(theirs) > 2 {
            return None;
        }
        let support = if theirs.is_minor() { 4 } else { 3 };
        s.unbid_suits()
            .into_iter()
            .all(|suit| s.length(suit) >= support)
            .then_some(Call::Double)
    }
}

bidding_rule! {
    struct StrongDouble;
    name: "Strong Double",
    description: "Too strong to overcall: double first",
    propose: |s| {
        their_suit(s)?;
        (s.hcp() > s.system.competition.overcall.get(balancing(s)).max).then_some(Call::Double)
    }
}

bidding_rule! {
    struct PenaltyDoubleOfNoTrump;
    name: "Penalty Double",
    description: "15+ HCP over their notrump",
    propose: |s| {
        (over_notrump(s) && s.hcp() >= s.system.competition.penalty_double_of_notrump)
            .then_some(Call::Double)
    }
}

bidding_rule! {
    struct NoTrumpOvercall;
    name: "1NT Overcall",
    description: "Balanced with a stopper: 15-18 direct, 11-14 balancing",
    propose: |s| {
        let theirs = their_suit(s)?;
        let range = s.system.competition.one_notrump_overcall.get(balancing(s));
        (s.eval.balanced && range.contains(s.hcp()) && s.has_stopper(theirs))
            .then(|| s.cheapest_up_to(Strain::NoTrump, 1))
            .flatten()
    }
}

bidding_rule! {
    struct WeakJumpOvercall;
    name: "Weak Jump Overcall",
    description: "6-10 HCP with a good six-card suit, direct seat only",
    propose: |s| {
        let theirs = their_suit(s)?;
        if balancing(s) || !s.system.competition.weak_jump_overcall.contains(s.hcp()) {
            return None;
        }
        let suit = Suit::BY_PRIORITY
            .into_iter()
            .find(|&suit| suit != theirs && s.length(suit) == 6 && s.hand.has_good_suit(suit, 6))?;
        s.jump(suit).filter(|c| c.level().is_some_and(|level| level <= 3))
    }
}

bidding_rule! {
    /// Each level above the first needs two more points.
    struct SuitOvercall;
    name: "Suit Overcall",
    description: "Five-card suit within the overcall range",
    propose: |s| {
        let theirs = s.their_last_bid()?.strain()?;
        let others: Vec<Suit> = Suit::BY_PRIORITY
            .into_iter()
            .filter(|&suit| Strain::from(suit) != theirs)
            .collect();
        let suit = s.longest_among(&others, 5)?;
        let bid = s.cheapest_up_to(suit, 3)?;
        let range = s.system.competition.overcall.get(balancing(s));
        let needed = range.min + 2 * (bid.level()? - 1);
        (s.hcp() >= needed && s.hcp() <= range.max).then_some(bid)
    }
}

pub static RULES: &[&dyn Rule] = &[
    &TakeoutDouble,
    &StrongDouble,
    &PenaltyDoubleOfNoTrump,
    &NoTrumpOvercall,
    &WeakJumpOvercall,
    &SuitOvercall,
];
