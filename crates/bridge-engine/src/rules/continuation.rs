//! Later rounds: look for slam, settle in game, or stop.

use super::slam::StartBlackwood;
use super::Rule;
use bridge_core::{Call, Strain, Suit};

bidding_rule! {
    struct CorrectToMajorGame;
    name: "Correct to Four of a Major",
    description: "Partner offered 3NT and we fit their five-card major",
    propose: |s| {
        if s.partner_last()? != Call::bid(3, Strain::NoTrump) {
            return None;
        }
        let major = [Suit::Spades, Suit::Hearts]
            .into_iter()
            .find(|&major| s.partner.length(major) >= 5 && s.fit(major))?;
        s.game_in(major)
    }
}

bidding_rule! {
    struct GameWithFit;
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
    struct NoTrumpGame;
    name: "3NT",
    description: "25+ combined HCP",
    propose: |s| {
        (s.combined_hcp() >= s.system.targets.game)
            .then(|| s.game_in(Strain::NoTrump))
            .flatten()
    }
}

pub static RULES: &[&dyn Rule] = &[&StartBlackwood, &CorrectToMajorGame, &GameWithFit, &NoTrumpGame];
