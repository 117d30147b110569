//! Opener's second call, after an uncontested response.

use super::slam::StartBlackwood;
use super::Rule;
use crate::context::OpeningKind;
use crate::situation::Situation;
use bridge_core::{Call, Strain, Suit};

fn notrump_level(s: &Situation<'_>) -> Option<u8> {
    match s.opening_kind()? {
        OpeningKind::NoTrump(level) => Some(level),
        _ => None,
    }
}

fn one_suit(s: &Situation<'_>) -> Option<Suit> {
    match s.opening_kind()? {
        OpeningKind::OneSuit(suit) => Some(suit),
        _ => None,
    }
}

/// Partner's response when it named a suit other than ours.
fn new_suit_response(s: &Situation<'_>) -> Option<(Suit, u8)> {
    let own = one_suit(s)?;
    let response = s.partner_last()?;
    let suit = response.suit().filter(|&suit| suit != own)?;
    Some((suit, response.level()?))
}

bidding_rule! {
    struct CompleteStayman;
    name: "Stayman Reply",
    description: "Show a four-card major, hearts first; otherwise 2D",
    propose: |s| {
        let level = notrump_level(s)?;
        if s.partner_last()? != Call::bid(level + 1, Strain::Clubs) {
            return None;
        }
        [Suit::Hearts, Suit::Spades]
            .into_iter()
            .find(|&major| s.length(major) >= 4)
            .map_or_else(|| s.cheapest(Suit::Diamonds), |major| s.cheapest(major))
    }
}

bidding_rule! {
    struct CompleteTransfer;
    name: "Complete Transfer",
    description: "Bid the major partner's transfer showed",
    propose: |s| {
        let level = notrump_level(s)?;
        let response = s.partner_last()?;
        let major = if response == Call::bid(level + 1, Strain::Diamonds) {
            Suit::Hearts
        } else if response == Call::bid(level + 1, Strain::Hearts) {
            Suit::Spades
        } else {
            return None;
        };
        s.cheapest(major)
    }
}

bidding_rule! {
    struct AcceptInvite;
    name: "Accept Invitation",
    description: "Over 2NT: 3NT with a maximum, otherwise pass",
    propose: |s| {
        if notrump_level(s)? != 1 || s.partner_last()? != Call::bid(2, Strain::NoTrump) {
            return None;
        }
        let range = s.system.opening.one_notrump;
        if s.hcp() > range.min {
            Some(Call::bid(3, Strain::NoTrump))
        } else {
            Some(Call::Pass)
        }
    }
}

bidding_rule! {
    struct NotrumpOpenerRests;
    name: "Notrump Opener Passes",
    description: "Partner has placed the contract",
    propose: |s| {
        notrump_level(s)?;
        Some(Call::Pass)
    }
}

bidding_rule! {
    struct StrongTwoRebid;
    name: "Strong 2C Rebid",
    description: "Balanced: 2NT with 23-24, 3NT above; otherwise raise or show the long suit",
    propose: |s| {
        if s.opening_kind()? != OpeningKind::StrongTwoClubs {
            return None;
        }
        if s.eval.balanced {
            return if s.hcp() >= s.system.opening.strong_two_clubs + 2 {
                s.game_in(Strain::NoTrump)
            } else {
                s.cheapest_up_to(Strain::NoTrump, 2).or_else(|| s.game_in(Strain::NoTrump))
            };
        }
        if let Some(suit) = s.partner_last()?.suit().filter(|&suit| s.fit(suit)) {
            return s.cheapest(suit);
        }
        match s.longest_among(&Suit::BY_PRIORITY, 5) {
            Some(suit) => s.cheapest(suit),
            None => s.cheapest(Strain::NoTrump),
        }
    }
}

bidding_rule! {
    /// A weak two or preempt says everything: only a forcing new suit
    /// gets a reply.
    struct WeakOpeningRebid;
    name: "Preempter's Rebid",
    description: "Raise partner's new suit with three cards, else repeat the suit",
    propose: |s| {
        let own = match s.opening_kind()? {
            OpeningKind::Preempt(suit, _) => suit,
            _ => return None,
        };
        match s.partner_last()?.suit() {
            Some(suit) if suit != own && s.length(suit) >= 3 => s.cheapest(suit),
            Some(suit) if suit != own => s.cheapest(own),
            _ => Some(Call::Pass),
        }
    }
}

bidding_rule! {
    /// Game when our points plus the middle of partner's range reach it;
    /// an invitation when partner's maximum would.
    struct AfterRaise;
    name: "Rebid after a Raise",
    description: "Bid game, invite, or pass partner's raise",
    propose: |s| {
        let own = one_suit(s)?;
        let response = s.partner_last()?;
        if response.suit() != Some(own) {
            return None;
        }
        let game_level = Strain::from(own).game_level();
        if response.level()? >= game_level {
            return Some(Call::Pass);
        }
        let game = s.system.targets.game;
        let points = s.eval.total_points();
        let (min, max) = (s.partner.min_hcp, s.partner.max_hcp);
        if points + (min + max) / 2 >= game {
            if own.is_minor() && s.eval.balanced {
                s.game_in(Strain::NoTrump)
            } else {
                s.game_in(own)
            }
        } else if points + max >= game {
            s.cheapest(own)
                .filter(|c| c.level().is_some_and(|level| level < game_level))
                .or(Some(Call::Pass))
        } else {
            Some(Call::Pass)
        }
    }
}

bidding_rule! {
    struct JumpNoTrump;
    name: "Jump Rebid in Notrump",
    description: "Balanced 18-19: 2NT over a one-level response, 3NT over a two-level one",
    propose: |s| {
        let (_, level) = new_suit_response(s)?;
        if !s.eval.balanced || !s.system.rebids.jump_notrump.contains(s.hcp()) {
            return None;
        }
        match level {
            1 => s.jump(Strain::NoTrump),
            2 => s.game_in(Strain::NoTrump),
            _ => None,
        }
    }
}

bidding_rule! {
    struct NoTrumpRaise;
    name: "Raise Partner's Notrump",
    description: "Balanced: game or invitation opposite partner's notrump range",
    propose: |s| {
        one_suit(s)?;
        let response = s.partner_last()?;
        if !response.is_notrump() {
            return None;
        }
        if response.level()? >= 3 {
            return Some(Call::Pass);
        }
        if !s.eval.balanced {
            return None;
        }
        let game = s.system.targets.game;
        if s.hcp() + s.partner.min_hcp >= game {
            Some(Call::bid(3, Strain::NoTrump))
        } else if s.hcp() + s.partner.max_hcp >= game {
            s.cheapest_up_to(Strain::NoTrump, 2).or(Some(Call::Pass))
        } else {
            Some(Call::Pass)
        }
    }
}

bidding_rule! {
    struct RaisePartnerMajor;
    name: "Raise Partner's Major",
    description: "Four-card support: game with 16+ HCP, else a single raise",
    propose: |s| {
        let (suit, _) = new_suit_response(s)?;
        if !suit.is_major() || s.length(suit) < 4 {
            return None;
        }
        if s.hcp() >= s.system.rebids.major_game_raise {
            s.game_in(suit)
        } else {
            s.cheapest(suit)
        }
    }
}

bidding_rule! {
    struct TwoNoTrumpAfterTwoLevel;
    name: "2NT after a Two-Level Response",
    description: "Balanced 15-17",
    propose: |s| {
        let (_, level) = new_suit_response(s)?;
        (level == 2
            && s.eval.balanced
            && s.system.rebids.notrump_after_two_level.contains(s.hcp()))
            .then(|| s.cheapest_up_to(Strain::NoTrump, 2))
            .flatten()
    }
}

bidding_rule! {
    /// Bidding a higher suit at the two level, or any suit at the three
    /// level, is a reverse and needs extra values.
    struct SecondSuit;
    name: "Second Suit",
    description: "A new four-card suit; reverses need 16+ HCP",
    propose: |s| {
        let own = one_suit(s)?;
        let partner_suits = s.partner_suits();
        let candidates: Vec<Suit> = Suit::BY_PRIORITY
            .into_iter()
            .filter(|&suit| suit != own && !partner_suits.contains(&suit))
            .collect();
        let suit = s.longest_among(&candidates, 4)?;
        let bid = s.cheapest(suit)?;
        let level = bid.level()?;
        let reverse = level > 2 || (level == 2 && suit > own);
        (!reverse || s.hcp() >= s.system.rebids.reverse_min).then_some(bid)
    }
}

bidding_rule! {
    struct MinorRaise;
    name: "Raise Partner's Minor",
    description: "Four-card support for partner's minor",
    propose: |s| {
        let (suit, _) = new_suit_response(s)?;
        (suit.is_minor() && s.length(suit) >= 4)
            .then(|| s.cheapest_up_to(suit, 3))
            .flatten()
    }
}

bidding_rule! {
    struct RebidOwnSuit;
    name: "Rebid Own Suit",
    description: "Six-card suit; jump with 16+ HCP",
    propose: |s| {
        let own = one_suit(s)?;
        if s.length(own) < 6 {
            return None;
        }
        if s.hcp() >= s.system.rebids.reverse_min {
            if let Some(jump) = s.jump(own).filter(|c| c.level().is_some_and(|l| l <= 3)) {
                return Some(jump);
            }
        }
        s.cheapest(own)
    }
}

bidding_rule! {
    struct MinimumNoTrump;
    name: "1NT Rebid",
    description: "Balanced 15-17 after a one-level response",
    propose: |s| {
        one_suit(s)?;
        (s.eval.balanced && s.system.rebids.notrump_after_two_level.contains(s.hcp()))
            .then(|| s.cheapest_up_to(Strain::NoTrump, 1))
            .flatten()
    }
}

bidding_rule! {
    /// Partner's new suit is forcing: repeat a five-card suit, give
    /// three-card support, or bid notrump.
    struct ForcedRebid;
    name: "Forced Rebid",
    description: "Cheapest descriptive call over a forcing response",
    propose: |s| {
        let own = one_suit(s)?;
        let (suit, _) = new_suit_response(s)?;
        if s.length(own) >= 5 {
            s.cheapest(own)
        } else if s.length(suit) >= 3 {
            s.cheapest(suit)
        } else {
            s.cheapest(Strain::NoTrump)
        }
    }
}

pub static RULES: &[&dyn Rule] = &[
    &CompleteStayman,
    &CompleteTransfer,
    &AcceptInvite,
    &NotrumpOpenerRests,
    &StrongTwoRebid,
    &WeakOpeningRebid,
    &StartBlackwood,
    &AfterRaise,
    &JumpNoTrump,
    &NoTrumpRaise,
    &RaisePartnerMajor,
    &TwoNoTrumpAfterTwoLevel,
    &SecondSuit,
    &MinorRaise,
    &RebidOwnSuit,
    &MinimumNoTrump,
    &ForcedRebid,
];

#[cfg(test)]
mod tests {
    use crate::rules::testing::bid;
    use bridge_core::{Call, Strain};

    #[test]
    fn test_stayman_replies() {
        assert_eq!(bid("K32.A32.Q432.K32", "1NT P 2C P"), Call::bid(2, Strain::Hearts));
        assert_eq!(bid("K432.A32.Q32.K32", "1NT P 2C P"), Call::bid(2, Strain::Diamonds));
    }

    #[test]
    fn test_transfer_is_completed() {
        assert_eq!(bid("K432.A32.Q32.K32", "1NT P 2D P"), Call::bid(2, Strain::Hearts));
        assert_eq!(bid("K432.A32.Q32.K32", "1NT P 2H P"), Call::bid(2, Strain::Spades));
    }

    #[test]
    fn test_invitation_accepted_with_maximum() {
        assert_eq!(bid("K32.A32.Q32.KJ32", "1NT P 2NT P"), Call::bid(3, Strain::NoTrump));
        assert_eq!(bid("K32.A32.Q32.QJ32", "1NT P 2NT P"), Call::Pass);
    }

    #[test]
    fn test_after_single_raise() {
        // 17 HCP plus a length point: game.
        assert_eq!(bid("2.AQ3.AKJ32.K432", "1H P 2H P"), Call::bid(4, Strain::Hearts));
        // 15 HCP plus a length point: invite.
        assert_eq!(bid("2.A32.AKJ32.K432", "1H P 2H P"), Call::bid(3, Strain::Hearts));
        // Minimum: pass.
        assert_eq!(bid("2.K32.AKJ32.Q432", "1H P 2H P"), Call::Pass);
    }

    #[test]
    fn test_jump_rebid_in_notrump() {
        assert_eq!(bid("K32.AQ32.KQ2.AJ2", "1D P 1S P"), Call::bid(2, Strain::NoTrump));
    }

    #[test]
    fn test_jump_to_game_in_notrump_over_a_two_level_response() {
        assert_eq!(bid("KQ2.AQ2.K2.AJ432", "1S P 2C P"), Call::bid(3, Strain::NoTrump));
    }

    #[test]
    fn test_raise_partners_major() {
        assert_eq!(bid("2.AKJ32.K32.Q432", "1D P 1S P"), Call::bid(2, Strain::Spades));
        // 17 HCP with four spades: straight to game.
        assert_eq!(bid("2.AKJ32.AQ2.K432", "1D P 1S P"), Call::bid(4, Strain::Spades));
    }

    #[test]
    fn test_reverse_needs_extra_values() {
        assert_eq!(bid("2.AKJ32.AQ32.K32", "1D P 1S P"), Call::bid(2, Strain::Hearts));
        assert_eq!(bid("2.AKJ32.Q432.K32", "1D P 1S P"), Call::bid(2, Strain::Diamonds));
    }

    #[test]
    fn test_rebid_six_card_suit() {
        assert_eq!(bid("2.K32.AKJ432.Q32", "1H P 1S P"), Call::bid(2, Strain::Hearts));
        // 18 HCP: jump.
        assert_eq!(bid("A2.K32.AKQ432.Q2", "1H P 1S P"), Call::bid(3, Strain::Hearts));
    }

    #[test]
    fn test_strong_two_clubs_rebid() {
        assert_eq!(bid("AK2.AKQ.KQ2.Q432", "2C P 2D P"), Call::bid(2, Strain::NoTrump));
    }
}
