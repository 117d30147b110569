//! Responder's second call, after opener's uncontested rebid.

use super::slam::StartBlackwood;
use super::Rule;
use crate::context::OpeningKind;
use crate::situation::Situation;
use crate::system::PointRange;
use bridge_core::{Call, Strain, Suit};

fn notrump_opening(s: &Situation<'_>) -> Option<(u8, PointRange)> {
    match s.opening_kind()? {
        OpeningKind::NoTrump(1) => Some((1, s.system.opening.one_notrump)),
        OpeningKind::NoTrump(level) => Some((level, s.system.opening.two_notrump)),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Values {
    Game,
    Invite,
    Weak,
}

fn values_opposite(s: &Situation<'_>, range: PointRange) -> Values {
    let game = s.system.targets.game;
    if s.hcp() + range.min >= game {
        Values::Game
    } else if s.hcp() + range.max >= game {
        Values::Invite
    } else {
        Values::Weak
    }
}

bidding_rule! {
    struct TransferFollowUp;
    name: "After a Transfer",
    description: "Six-card major: raise; five: offer notrump; weak: pass",
    propose: |s| {
        let (level, range) = notrump_opening(s)?;
        let first = s.my_first()?;
        let major = if first == Call::bid(level + 1, Strain::Diamonds) {
            Suit::Hearts
        } else if first == Call::bid(level + 1, Strain::Hearts) {
            Suit::Spades
        } else {
            return None;
        };
        let six = s.length(major) >= 6;
        match (values_opposite(s, range), six) {
            (Values::Game, true) => s.game_in(major),
            (Values::Game, false) => s.game_in(Strain::NoTrump),
            (Values::Invite, true) => s.cheapest(major),
            (Values::Invite, false) => s.cheapest_up_to(Strain::NoTrump, 2),
            (Values::Weak, _) => Some(Call::Pass),
        }
    }
}

bidding_rule! {
    struct StaymanFollowUp;
    name: "After Stayman",
    description: "Raise a fitting major, otherwise notrump at the right level",
    propose: |s| {
        let (level, range) = notrump_opening(s)?;
        if s.my_first()? != Call::bid(level + 1, Strain::Clubs) {
            return None;
        }
        let values = values_opposite(s, range);
        let fit = s
            .partner_last()?
            .suit()
            .filter(|&suit| suit.is_major() && s.length(suit) >= 4);
        match (values, fit) {
            (Values::Game, Some(major)) => s.game_in(major),
            (Values::Invite, Some(major)) => s.cheapest(major),
            (Values::Game, None) => s.game_in(Strain::NoTrump),
            (Values::Invite, None) => s.cheapest_up_to(Strain::NoTrump, 2),
            (Values::Weak, _) => Some(Call::Pass),
        }
    }
}

bidding_rule! {
    /// 2C was game forcing unless opener rebid 2NT.
    struct StrongTwoContinuation;
    name: "After Strong 2C",
    description: "Raise opener's suit to game, show a five-card suit, or bid notrump",
    propose: |s| {
        if s.opening_kind()? != OpeningKind::StrongTwoClubs {
            return None;
        }
        let rebid = s.partner_last()?;
        if rebid.is_notrump() {
            return (s.hcp() >= 2)
                .then(|| s.game_in(Strain::NoTrump))
                .flatten()
                .or(Some(Call::Pass));
        }
        let suit = rebid.suit()?;
        if s.length(suit) >= 3 {
            return s.game_in(suit);
        }
        let others: Vec<Suit> = Suit::BY_PRIORITY.into_iter().filter(|&x| x != suit).collect();
        match s.longest_among(&others, 5) {
            Some(own) => s.cheapest(own),
            None => s.cheapest_up_to(Strain::NoTrump, 3),
        }
    }
}

bidding_rule! {
    struct FitGame;
    name: "Game with a Fit",
    description: "Eight-card fit and 25+ combined points",
    propose: |s| {
        let suit = s.fit_suit()?;
        (s.combined_points() >= s.system.targets.game)
            .then(|| s.game_in(suit))
            .flatten()
    }
}

bidding_rule! {
    struct FitInvite;
    name: "Invite with a Fit",
    description: "Eight-card fit and 22-24 combined points",
    propose: |s| {
        let suit = s.fit_suit()?;
        if s.combined_points() + 3 < s.system.targets.game {
            return None;
        }
        let game_level = Strain::from(suit).game_level();
        s.cheapest(suit).filter(|c| c.level().is_some_and(|level| level < game_level))
    }
}

bidding_rule! {
    /// With a weak hand, choose between opener's two suits.
    struct Preference;
    name: "Preference",
    description: "9 HCP or less: return to the suit we hold more of",
    propose: |s| {
        if s.hcp() > 9 {
            return None;
        }
        let suits = s.partner_suits();
        let (&first, &last) = (suits.first()?, suits.last()?);
        if first == last {
            return None;
        }
        if s.length(first) > s.length(last) {
            s.cheapest(first)
        } else {
            Some(Call::Pass)
        }
    }
}

bidding_rule! {
    struct NoTrumpGame;
    name: "3NT",
    description: "25+ combined HCP without a fit",
    propose: |s| {
        (s.combined_hcp() >= s.system.targets.game)
            .then(|| s.game_in(Strain::NoTrump))
            .flatten()
    }
}

bidding_rule! {
    struct NoTrumpInvite;
    name: "Notrump Invitation",
    description: "23-24 combined HCP",
    propose: |s| {
        (s.combined_hcp() + 2 >= s.system.targets.game)
            .then(|| s.cheapest_up_to(Strain::NoTrump, 2))
            .flatten()
    }
}

bidding_rule! {
    struct RebidOwnSuit;
    name: "Rebid Own Suit",
    description: "Six-card suit, below game",
    propose: |s| {
        let suit = s.my_first()?.suit()?;
        if s.length(suit) < 6 {
            return None;
        }
        s.cheapest_up_to(suit, 3)
    }
}

pub static RULES: &[&dyn Rule] = &[
    &TransferFollowUp,
    &StaymanFollowUp,
    &StartBlackwood,
    &StrongTwoContinuation,
    &FitGame,
    &FitInvite,
    &Preference,
    &NoTrumpGame,
    &NoTrumpInvite,
    &RebidOwnSuit,
];
