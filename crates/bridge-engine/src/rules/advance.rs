//! Partner has doubled or overcalled the opponents' opening.

use super::Rule;
use crate::situation::Situation;
use bridge_core::{Call, Strain, Suit};

fn partner_doubled(s: &Situation<'_>) -> bool {
    s.partner_first() == Some(Call::Double)
}

/// The suit partner overcalled in.
fn overcall_suit(s: &Situation<'_>) -> Option<Suit> {
    s.partner_first()?.suit()
}

fn partner_notrump(s: &Situation<'_>) -> bool {
    s.partner_first().is_some_and(Call::is_notrump)
}

/// The opponents' suit: the one they opened, or bid last.
fn their_suit(s: &Situation<'_>) -> Option<Suit> {
    s.opening_suit().or_else(|| s.their_last_suit())
}

/// Unbid suits in the order we prefer to show them: four-card majors
/// first, then the longest.
fn best_unbid(s: &Situation<'_>, min_len: u8) -> Option<Suit> {
    let unbid = s.unbid_suits();
    let majors: Vec<Suit> = unbid.iter().copied().filter(|suit| suit.is_major()).collect();
    s.longest_among(&majors, min_len.max(4))
        .or_else(|| s.longest_among(&unbid, min_len))
}

bidding_rule! {
    struct AdvanceCue;
    name: "Cue Bid Advance",
    description: "12+ HCP opposite a takeout double: bid their suit",
    propose: |s| {
        if !partner_doubled(s) || s.hcp() < s.system.competition.takeout_double.direct {
            return None;
        }
        s.cheapest(their_suit(s)?)
    }
}

bidding_rule! {
    struct AdvanceNoTrump;
    name: "Notrump Advance",
    description: "Stopper and no four-card major: 1NT 6-10, 2NT 11-12",
    propose: |s| {
        if !partner_doubled(s) || !s.has_stopper(their_suit(s)?) {
            return None;
        }
        if s.length(Suit::Hearts) >= 4 || s.length(Suit::Spades) >= 4 {
            return None;
        }
        match s.hcp() {
            6..=10 => s.cheapest_up_to(Strain::NoTrump, 1),
            11..=12 => s.cheapest_up_to(Strain::NoTrump, 2),
            _ => None,
        }
    }
}

bidding_rule! {
    struct AdvanceJump;
    name: "Jump Advance",
    description: "9-11 HCP: jump in the best unbid suit",
    propose: |s| {
        if !partner_doubled(s) || !(9..=11).contains(&s.hcp()) {
            return None;
        }
        let suit = best_unbid(s, 4)?;
        s.jump(suit).filter(|c| c.level().is_some_and(|level| level <= 3))
    }
}

bidding_rule! {
    /// Partner's double forces a reply when the next opponent passed.
    struct AdvanceCheapest;
    name: "Forced Advance",
    description: "Cheapest bid in the best unbid suit, majors first",
    propose: |s| {
        if !partner_doubled(s) {
            return None;
        }
        let interfered = s.their_last_action() != s.opening().map(|e| e.call);
        if interfered && s.hcp() < s.system.responses.forcing_min {
            return Some(Call::Pass);
        }
        match best_unbid(s, 0) {
            Some(suit) => s.cheapest(suit),
            None => s.cheapest(Strain::NoTrump),
        }
    }
}

bidding_rule! {
    struct OvercallGameRaise;
    name: "Raise Overcall to Game",
    description: "Three-card support and 25+ combined points",
    propose: |s| {
        let suit = overcall_suit(s)?;
        (s.length(suit) >= 3 && s.combined_points() >= s.system.targets.game)
            .then(|| s.game_in(suit))
            .flatten()
    }
}

bidding_rule! {
    struct CueRaise;
    name: "Cue Raise",
    description: "Three-card support and 11+ HCP: bid their suit",
    propose: |s| {
        let suit = overcall_suit(s)?;
        if s.length(suit) < 3 || s.hcp() < s.system.competition.cue_bid_min {
            return None;
        }
        s.cheapest(their_suit(s)?)
    }
}

bidding_rule! {
    struct OvercallRaise;
    name: "Raise Overcall",
    description: "Three-card support with 6-10 HCP",
    propose: |s| {
        let suit = overcall_suit(s)?;
        (s.length(suit) >= 3 && s.hcp() >= s.system.responses.single_raise.min)
            .then(|| s.cheapest_up_to(suit, 3))
            .flatten()
    }
}

bidding_rule! {
    struct OvercallNoTrump;
    name: "Notrump over Partner's Overcall",
    description: "Stopper in their suit: 3NT with game values, otherwise 9+ HCP",
    propose: |s| {
        overcall_suit(s)?;
        if !s.has_stopper(their_suit(s)?) {
            return None;
        }
        if s.combined_hcp() >= s.system.targets.game {
            s.game_in(Strain::NoTrump)
        } else if s.hcp() >= 9 {
            s.cheapest_up_to(Strain::NoTrump, 2)
        } else {
            None
        }
    }
}

bidding_rule! {
    struct OvercallNewSuit;
    name: "New Suit over Partner's Overcall",
    description: "8+ HCP with a five-card suit",
    propose: |s| {
        overcall_suit(s)?;
        if s.hcp() < s.system.competition.negative_double_min {
            return None;
        }
        let suit = best_unbid(s, 5)?;
        s.cheapest_up_to(suit, 2)
    }
}

bidding_rule! {
    struct AdvanceNoTrumpOvercall;
    name: "Raise Notrump Overcall",
    description: "3NT with 25+ combined, 2NT with 23-24",
    propose: |s| {
        if !partner_notrump(s) {
            return None;
        }
        let game = s.system.targets.game;
        if s.combined_points() >= game {
            s.game_in(Strain::NoTrump)
        } else if s.combined_points() + 2 >= game {
            s.cheapest_up_to(Strain::NoTrump, 2)
        } else {
            None
        }
    }
}

pub static RULES: &[&dyn Rule] = &[
    &AdvanceCue,
    &AdvanceNoTrump,
    &AdvanceJump,
    &AdvanceCheapest,
    &OvercallGameRaise,
    &CueRaise,
    &OvercallRaise,
    &OvercallNoTrump,
    &OvercallNewSuit,
    &AdvanceNoTrumpOvercall,
];
