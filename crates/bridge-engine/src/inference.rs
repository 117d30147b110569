use crate::context::{actions_by, Context, OpeningKind};
use crate::system::SystemConfig;
use bridge_core::{Auction, Call, Position, Strain, Suit};

/// Inferred information about partner's hand based on their calls in the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PartnerProfile {
    pub min_hcp: u8,
    pub max_hcp: u8,
    pub min_length: [u8; 4],
    pub balanced: bool,
}

impl Default for PartnerProfile {
    fn default() -> Self {
        Self {
            min_hcp: 0,
            max_hcp: 37,
            min_length: [0; 4],
            balanced: false,
        }
    }
}

impl PartnerProfile {
    /// Replays the auction and reads every call `partner` made in the
    /// context it was made in.
    pub fn infer(auction: &Auction, partner: Position, system: &SystemConfig) -> PartnerProfile {
        let mut profile = PartnerProfile::default();
        let mut before = Auction::new(auction.dealer(), auction.vulnerability());
        for entry in auction.entries() {
            if entry.seat == partner {
                let context = Context::detect(&before, partner);
                profile.merge(shown_by(&before, partner, context, entry.call, system));
            }
            match before.append(entry.call, entry.seat) {
                Ok(next) => before = next,
                Err(_) => break,
            }
        }
        profile
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.min_length[suit.idx()]
    }

    fn at_least(mut self, hcp: u8) -> Self {
        self.min_hcp = hcp;
        self
    }

    fn at_most(mut self, hcp: u8) -> Self {
        self.max_hcp = hcp;
        self
    }

    fn range(self, range: crate::system::PointRange) -> Self {
        self.at_least(range.min).at_most(range.max)
    }

    fn with_length(mut self, suit: Suit, length: u8) -> Self {
        self.min_length[suit.idx()] = length;
        self
    }

    fn flat(mut self) -> Self {
        self.balanced = true;
        self.min_length = [2; 4];
        self
    }

    fn merge(&mut self, shown: PartnerProfile) {
        self.min_hcp = self.min_hcp.max(shown.min_hcp);
        self.max_hcp = self.max_hcp.min(shown.max_hcp).max(self.min_hcp);
        for (have, more) in self.min_length.iter_mut().zip(shown.min_length) {
            *have = (*have).max(more);
        }
        self.balanced |= shown.balanced;
    }
}

/// How far above the cheapest sufficient bid in its strain `call` was.
fn jump_levels(before: &Auction, call: Call) -> u8 {
    match (call.level(), call.strain().and_then(|s| before.cheapest_bid_in(s))) {
        (Some(level), Some(cheapest)) => level.saturating_sub(cheapest.level().unwrap_or(level)),
        _ => 0,
    }
}

fn shown_by(
    before: &Auction,
    seat: Position,
    context: Context,
    call: Call,
    system: &SystemConfig,
) -> PartnerProfile {
    let none = PartnerProfile::default();
    let entries = before.entries();
    let opening = before.opening().map(|(_, e)| e);
    let kind = opening.map(|e| OpeningKind::of(e.call));
    let partner_suits: Vec<Suit> = actions_by(entries, seat.partner())
        .filter_map(Call::suit)
        .collect();
    let their_suits: Vec<Suit> = actions_by(entries, seat.lho())
        .chain(actions_by(entries, seat.rho()))
        .filter_map(Call::suit)
        .collect();
    let jump = jump_levels(before, call);
    let level = call.level().unwrap_or(0);
    let suit = call.suit();

    match context {
        Context::Opening => match OpeningKind::of(call) {
            _ if call.is_pass() => none.at_most(system.opening.min_hcp.saturating_sub(1)),
            OpeningKind::StrongTwoClubs => none.at_least(system.opening.strong_two_clubs),
            OpeningKind::NoTrump(1) => none.range(system.opening.one_notrump).flat(),
            OpeningKind::NoTrump(_) => none.range(system.opening.two_notrump).flat(),
            OpeningKind::Preempt(suit, 2) => none.range(system.opening.weak_two).with_length(suit, 6),
            OpeningKind::Preempt(suit, _) => none.range(system.opening.preempt).with_length(suit, 7),
            OpeningKind::OneSuit(suit) => none
                .at_least(system.opening.min_hcp.saturating_sub(2))
                .at_most(system.opening.strong_two_clubs.saturating_sub(1))
                .with_length(suit, 4),
            OpeningKind::Other => none,
        },
        Context::Response => {
            let responses = &system.responses;
            match (kind, suit) {
                _ if call.is_pass() => none.at_most(responses.forcing_min.saturating_sub(1)),
                (Some(OpeningKind::OneSuit(os)), Some(s)) if s == os => {
                    if level >= Strain::from_suit(os).game_level() {
                        none.at_least(responses.game_raise.min).with_length(os, 4)
                    } else if jump > 0 {
                        none.range(responses.limit_raise).with_length(os, 4)
                    } else {
                        none.range(responses.single_raise).with_length(os, 3)
                    }
                }
                (Some(OpeningKind::OneSuit(_)), Some(s)) => {
                    if jump > 0 {
                        none.at_least(responses.jump_shift).with_length(s, 5)
                    } else if level == 1 {
                        none.at_least(responses.one_level_new_suit).with_length(s, 4)
                    } else {
                        none.at_least(responses.two_level_new_suit).with_length(s, 5)
                    }
                }
                (Some(OpeningKind::OneSuit(_)), None) if call.is_notrump() => match level {
                    1 => none.range(responses.one_notrump).flat(),
                    2 => none.range(responses.two_notrump).flat(),
                    _ => none.at_least(responses.three_notrump.min).flat(),
                },
                (Some(OpeningKind::NoTrump(l)), _) => {
                    let range = if l == 1 {
                        system.opening.one_notrump
                    } else {
                        system.opening.two_notrump
                    };
                    let game = system.targets.game;
                    match (call.level(), call.strain()) {
                        (Some(n), Some(Strain::Clubs)) if n == l + 1 => {
                            none.at_least(game.saturating_sub(range.max))
                        }
                        (Some(n), Some(Strain::Diamonds)) if n == l + 1 => {
                            none.with_length(Suit::Hearts, 5)
                        }
                        (Some(n), Some(Strain::Hearts)) if n == l + 1 => {
                            none.with_length(Suit::Spades, 5)
                        }
                        (Some(4), Some(Strain::Clubs)) => {
                            none.at_least(system.targets.small_slam.saturating_sub(range.min))
                        }
                        (Some(2), Some(Strain::NoTrump)) => none
                            .at_least(game.saturating_sub(range.max))
                            .at_most(game.saturating_sub(range.min + 1)),
                        (Some(3), Some(Strain::NoTrump)) => {
                            none.at_least(game.saturating_sub(range.min))
                        }
                        _ => none,
                    }
                }
                (Some(OpeningKind::StrongTwoClubs), _) => {
                    if call == Call::bid(2, Strain::Diamonds) {
                        none.at_most(responses.strong_two_positive.saturating_sub(1))
                    } else if let Some(s) = suit {
                        none.at_least(responses.strong_two_positive).with_length(s, 5)
                    } else {
                        none.at_least(responses.strong_two_positive)
                    }
                }
                (Some(OpeningKind::Preempt(os, _)), Some(s)) if s == os => {
                    none.with_length(os, 3)
                }
                (Some(OpeningKind::Preempt(..)), Some(s)) => none.at_least(16).with_length(s, 5),
                _ => none,
            }
        }
        Context::OpenerRebid => {
            let own = opening.and_then(|e| e.call.suit());
            let stayman = matches!(kind, Some(OpeningKind::NoTrump(_)))
                && actions_by(entries, seat.partner())
                    .next()
                    .is_some_and(|c| c.strain() == Some(Strain::Clubs));
            match suit {
                Some(s) if kind.is_some_and(OpeningKind::is_notrump) => {
                    if stayman && s.is_major() {
                        none.with_length(s, 4)
                    } else {
                        none
                    }
                }
                Some(s) if partner_suits.contains(&s) && Some(s) != own => {
                    let shown = none.with_length(s, 4);
                    if s.is_major() && level >= 4 {
                        shown.at_least(system.rebids.major_game_raise)
                    } else {
                        shown
                    }
                }
                Some(s) if Some(s) == own => none.with_length(s, 5),
                Some(s) => {
                    let reverse = level == 2 && own.is_some_and(|o| s > o);
                    let shown = none.with_length(s, 4);
                    if reverse {
                        shown.at_least(system.rebids.reverse_min)
                    } else {
                        shown
                    }
                }
                None if call.is_notrump() && jump > 0 => none.range(system.rebids.jump_notrump).flat(),
                None if call.is_notrump() && level <= 2 => {
                    none.range(system.rebids.notrump_after_two_level).flat()
                }
                None => none,
            }
        }
        Context::DirectSeat | Context::BalancingSeat => {
            let balancing = context == Context::BalancingSeat;
            let competition = &system.competition;
            let over_notrump = before.last_bid().is_some_and(|e| e.call.is_notrump());
            match (call, suit) {
                (Call::Double, _) if over_notrump => none.at_least(competition.penalty_double_of_notrump),
                (Call::Double, _) => none.at_least(competition.takeout_double.get(balancing).saturating_sub(2)),
                (Call::Bid { .. }, None) => none.range(competition.one_notrump_overcall.get(balancing)).flat(),
                (Call::Bid { .. }, Some(s)) if jump > 0 => {
                    none.range(competition.weak_jump_overcall).with_length(s, 6)
                }
                (Call::Bid { .. }, Some(s)) => none
                    .at_least(competition.overcall.get(balancing).min + 2 * (level.max(1) - 1))
                    .with_length(s, 5),
                _ => none,
            }
        }
        Context::Advance | Context::Competitive => match (call, suit) {
            (Call::Double, _) if context == Context::Competitive => {
                none.at_least(system.competition.negative_double_min)
            }
            (Call::Redouble, _) => none.at_least(system.competition.redouble_min),
            (Call::Bid { .. }, Some(s)) if their_suits.contains(&s) => {
                none.at_least(system.competition.cue_bid_min)
            }
            (Call::Bid { .. }, Some(s)) if partner_suits.contains(&s) => {
                none.at_least(system.responses.single_raise.min).with_length(s, 3)
            }
            (Call::Bid { .. }, Some(s)) if jump > 0 => none.at_least(9).with_length(s, 4),
            (Call::Bid { .. }, Some(s)) => none.with_length(s, 4),
            (Call::Bid { .. }, None) => none.at_least(8).flat(),
            _ => none,
        },
        Context::ResponderRebid | Context::Continuation => match suit {
            Some(s) if partner_suits.contains(&s) => none.with_length(s, 3),
            _ => none,
        },
        Context::SlamAsk(_) => none,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::Vulnerability;

    fn profile(calls: &str, partner: Position) -> PartnerProfile {
        let auction = Auction::parse(Position::North, Vulnerability::None, calls).unwrap();
        PartnerProfile::infer(&auction, partner, &SystemConfig::default())
    }

    #[test]
    fn test_notrump_opening() {
        let p = profile("1NT P", Position::North);
        assert_eq!((p.min_hcp, p.max_hcp), (12, 14));
        assert!(p.balanced);
        assert_eq!(p.length(Suit::Spades), 2);
    }

    #[test]
    fn test_suit_opening_and_rebid() {
        let p = profile("1H P 1S P 2H P", Position::North);
        assert_eq!(p.min_hcp, 10);
        assert_eq!(p.length(Suit::Hearts), 5);

        let p = profile("1D P 1S P 2H P", Position::North);
        assert_eq!(p.min_hcp, 16);
        assert_eq!(p.length(Suit::Hearts), 4);
    }

    #[test]
    fn test_responses() {
        assert_eq!(profile("1H P 2H P", Position::South).length(Suit::Hearts), 3);
        let limit = profile("1H P 3H P", Position::South);
        assert_eq!((limit.min_hcp, limit.length(Suit::Hearts)), (10, 4));
        assert_eq!(profile("1H P 4H P", Position::South).min_hcp, 13);
        assert_eq!(profile("1H P 2C P", Position::South).min_hcp, 10);
        assert_eq!(profile("1H P 1S P", Position::South).length(Suit::Spades), 4);
        assert_eq!(profile("1H P P", Position::South).max_hcp, 5);
    }

    #[test]
    fn test_transfer_shows_the_major() {
        let p = profile("1NT P 2D P", Position::South);
        assert_eq!(p.length(Suit::Hearts), 5);
        assert_eq!(p.length(Suit::Diamonds), 0);
    }

    #[test]
    fn test_passed_hand_is_limited() {
        assert_eq!(profile("P P", Position::North).max_hcp, 11);
    }

    #[test]
    fn test_overcall() {
        let p = profile("1C 1S P", Position::East);
        assert_eq!((p.min_hcp, p.length(Suit::Spades)), (8, 5));
        let p = profile("1C 2S P", Position::East);
        assert_eq!(p.length(Suit::Spades), 6);
    }
}
