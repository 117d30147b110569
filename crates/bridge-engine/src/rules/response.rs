//! Responder's first call after partner's opening.

use super::slam::StartGerber;
use super::Rule;
use crate::context::OpeningKind;
use crate::situation::Situation;
use crate::system::PointRange;
use bridge_core::{Call, Strain, Suit};

fn one_suit_opening(s: &Situation<'_>) -> Option<Suit> {
    match s.opening_kind()? {
        OpeningKind::OneSuit(suit) => Some(suit),
        _ => None,
    }
}

fn notrump_opening(s: &Situation<'_>) -> Option<(u8, PointRange)> {
    match s.opening_kind()? {
        OpeningKind::NoTrump(1) => Some((1, s.system.opening.one_notrump)),
        OpeningKind::NoTrump(level) => Some((level, s.system.opening.two_notrump)),
        _ => None,
    }
}

fn preempt_opening(s: &Situation<'_>) -> Option<Suit> {
    match s.opening_kind()? {
        OpeningKind::Preempt(suit, _) => Some(suit),
        _ => None,
    }
}

fn other_suits(suit: Suit) -> Vec<Suit> {
    Suit::BY_PRIORITY.into_iter().filter(|&x| x != suit).collect()
}

bidding_rule! {
    struct JumpShift;
    name: "Jump Shift",
    description: "16+ HCP with a five-card suit",
    propose: |s| {
        let os = one_suit_opening(s)?;
        if s.hcp() < s.system.responses.jump_shift {
            return None;
        }
        let suit = s.longest_among(&other_suits(os), 5)?;
        s.jump(suit)
    }
}

bidding_rule! {
    struct GameRaise;
    name: "Game Raise",
    description: "13+ HCP with four-card support",
    propose: |s| {
        let os = one_suit_opening(s)?;
        if s.hcp() < s.system.responses.game_raise.min || s.length(os) < 4 {
            return None;
        }
        if os.is_major() {
            Some(Call::bid(4, os.into()))
        } else if !s.eval.balanced && s.length(os) >= 5 {
            Some(Call::bid(5, os.into()))
        } else {
            None
        }
    }
}

bidding_rule! {
    struct LimitRaise;
    name: "Limit Raise",
    description: "10-12 HCP with four-card support",
    propose: |s| {
        let os = one_suit_opening(s)?;
        (s.system.responses.limit_raise.contains(s.hcp()) && s.length(os) >= 4)
            .then(|| Call::bid(3, os.into()))
    }
}

bidding_rule! {
    struct TwoLevelNewSuit;
    name: "Two-Level New Suit",
    description: "10+ HCP with a five-card suit ranking below partner's",
    propose: |s| {
        let os = one_suit_opening(s)?;
        if s.hcp() < s.system.responses.two_level_new_suit {
            return None;
        }
        let lower: Vec<Suit> = Suit::BY_PRIORITY.into_iter().filter(|&x| x < os).collect();
        let suit = s.longest_among(&lower, 5)?;
        s.cheapest_up_to(suit, 2)
    }
}

bidding_rule! {
    struct OneLevelNewSuit;
    name: "One-Level New Suit",
    description: "6+ HCP with a four-card suit; longest first, four-card suits up the line",
    propose: |s| {
        let os = one_suit_opening(s)?;
        if s.hcp() < s.system.responses.one_level_new_suit {
            return None;
        }
        let higher: Vec<Suit> = Suit::BY_PRIORITY.into_iter().filter(|&x| x > os).collect();
        let suit = s.longest_among(&higher, 5).or_else(|| {
            Suit::ALL
                .into_iter()
                .find(|&x| x > os && s.length(x) >= 4)
        })?;
        s.cheapest_up_to(suit, 1)
    }
}

bidding_rule! {
    struct ThreeNoTrumpResponse;
    name: "3NT Response",
    description: "Balanced 13+ HCP without support",
    propose: |s| {
        one_suit_opening(s)?;
        (s.eval.balanced && s.hcp() >= s.system.responses.three_notrump.min)
            .then_some(Call::bid(3, Strain::NoTrump))
    }
}

bidding_rule! {
    struct TwoNoTrumpResponse;
    name: "2NT Response",
    description: "Balanced 10-12 HCP",
    propose: |s| {
        one_suit_opening(s)?;
        (s.eval.balanced && s.system.responses.two_notrump.contains(s.hcp()))
            .then_some(Call::bid(2, Strain::NoTrump))
    }
}

bidding_rule! {
    struct SingleRaise;
    name: "Single Raise",
    description: "6-9 HCP with three-card support",
    propose: |s| {
        let os = one_suit_opening(s)?;
        if !s.system.responses.single_raise.contains(s.hcp()) || s.length(os) < 3 {
            return None;
        }
        s.cheapest_up_to(os, 2)
    }
}

bidding_rule! {
    struct OneNoTrumpResponse;
    name: "1NT Response",
    description: "Balanced 6-9 HCP",
    propose: |s| {
        one_suit_opening(s)?;
        (s.eval.balanced && s.system.responses.one_notrump.contains(s.hcp()))
            .then(|| s.cheapest_up_to(Strain::NoTrump, 1))
            .flatten()
    }
}

bidding_rule! {
    struct Transfer;
    name: "Transfer",
    description: "Five-card major; bid the suit below it",
    propose: |s| {
        let (level, _) = notrump_opening(s)?;
        let major = s.longest_among(&[Suit::Spades, Suit::Hearts], 5)?;
        let below = match major {
            Suit::Spades => Strain::Hearts,
            _ => Strain::Diamonds,
        };
        Some(Call::bid(level + 1, below))
    }
}

bidding_rule! {
    struct Stayman;
    name: "Stayman",
    description: "Invitational values or better with a four-card major",
    propose: |s| {
        let (level, range) = notrump_opening(s)?;
        let has_major = s.length(Suit::Hearts) == 4 || s.length(Suit::Spades) == 4;
        let enough = if level == 1 {
            s.hcp() >= s.system.responses.stayman_min
        } else {
            s.hcp() + range.max >= s.system.targets.game
        };
        (has_major && enough).then_some(Call::bid(level + 1, Strain::Clubs))
    }
}

bidding_rule! {
    struct NoTrumpGame;
    name: "Raise to 3NT",
    description: "Game values opposite a notrump opening",
    propose: |s| {
        let (_, range) = notrump_opening(s)?;
        (s.hcp() + range.min >= s.system.targets.game).then_some(Call::bid(3, Strain::NoTrump))
    }
}

bidding_rule! {
    struct NoTrumpInvite;
    name: "Invite with 2NT",
    description: "Game is possible opposite a maximum 1NT",
    propose: |s| {
        let (level, range) = notrump_opening(s)?;
        (level == 1 && s.hcp() + range.max >= s.system.targets.game)
            .then_some(Call::bid(2, Strain::NoTrump))
    }
}

bidding_rule! {
    struct TwoClubsPositive;
    name: "Positive Response to 2C",
    description: "8+ HCP: a five-card suit, otherwise 2NT",
    propose: |s| {
        if s.opening_kind()? != OpeningKind::StrongTwoClubs
            || s.hcp() < s.system.responses.strong_two_positive
        {
            return None;
        }
        match s.longest_among(&Suit::BY_PRIORITY, 5) {
            Some(suit) => s.cheapest(suit),
            None => s.cheapest(Strain::NoTrump),
        }
    }
}

bidding_rule! {
    struct TwoClubsNegative;
    name: "2D Negative",
    description: "Artificial waiting response to 2C",
    propose: |s| {
        (s.opening_kind()? == OpeningKind::StrongTwoClubs).then_some(Call::bid(2, Strain::Diamonds))
    }
}

bidding_rule! {
    struct PreemptGame;
    name: "Game over a Preempt",
    description: "16+ HCP with three-card support",
    propose: |s| {
        let os = preempt_opening(s)?;
        (s.hcp() >= 16 && s.length(os) >= 3).then(|| s.game_in(os)).flatten()
    }
}

bidding_rule! {
    struct PreemptNewSuit;
    name: "New Suit over a Preempt",
    description: "16+ HCP with a five-card suit, forcing",
    propose: |s| {
        let os = preempt_opening(s)?;
        if s.hcp() < 16 {
            return None;
        }
        let suit = s.longest_among(&other_suits(os), 5)?;
        s.cheapest(suit)
    }
}

bidding_rule! {
    struct PreemptRaise;
    name: "Preemptive Raise",
    description: "Three-card support, raise one level",
    propose: |s| {
        let os = preempt_opening(s)?;
        if s.length(os) < 3 {
            return None;
        }
        let raise = s.cheapest(os)?;
        (raise.level()? < Strain::from(os).game_level()).then_some(raise)
    }
}

bidding_rule! {
    /// Responder never passes with 6+ HCP: the cheapest raise, new suit
    /// or notrump the hand can make. With 10+ a suit comes before notrump.
    struct ForcedResponse;
    name: "Forced Response",
    description: "6+ HCP: cheapest qualifying call, a suit first with 10+",
    propose: |s| {
        if s.hcp() < s.system.responses.forcing_min {
            return None;
        }
        if s.opening_kind()?.is_notrump() {
            return s.cheapest(Strain::NoTrump);
        }
        let os = s.opening_suit();
        let suits = Suit::ALL
            .into_iter()
            .filter(|&suit| s.length(suit) >= if Some(suit) == os { 3 } else { 4 })
            .filter_map(|suit| s.cheapest(suit))
            .min_by_key(|c| c.rank());
        let notrump = s.cheapest(Strain::NoTrump);
        if s.hcp() >= s.system.responses.limit_raise.min {
            return suits.or(notrump);
        }
        [suits, notrump].into_iter().flatten().min_by_key(|c| c.rank())
    }
}

pub static RULES: &[&dyn Rule] = &[
    &StartGerber,
    &JumpShift,
    &GameRaise,
    &LimitRaise,
    &TwoLevelNewSuit,
    &OneLevelNewSuit,
    &ThreeNoTrumpResponse,
    &TwoNoTrumpResponse,
    &SingleRaise,
    &OneNoTrumpResponse,
    &Transfer,
    &Stayman,
    &NoTrumpGame,
    &NoTrumpInvite,
    &TwoClubsPositive,
    &TwoClubsNegative,
    &PreemptGame,
    &PreemptNewSuit,
    &PreemptRaise,
    &ForcedResponse,
];
