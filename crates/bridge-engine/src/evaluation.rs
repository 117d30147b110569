use bridge_core::hand::{Distribution, Hand};
use bridge_core::suit::Suit;
use serde::Serialize;

/// Everything the rules ask of a hand, computed once per decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandEvaluation {
    pub hcp: u8,
    pub distribution: Distribution,
    pub balanced: bool,
    pub length_points: u8,
    pub aces: u8,
    pub kings: u8,
}

impl HandEvaluation {
    pub fn new(hand: &Hand) -> Self {
        Self {
            hcp: hand.hcp(),
            distribution: hand.distribution(),
            balanced: hand.is_balanced(),
            length_points: hand.length_points(),
            aces: hand.aces(),
            kings: hand.kings(),
        }
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.distribution.length(suit)
    }

    pub fn total_points(&self) -> u8 {
        self.hcp + self.length_points
    }

    /// The longest suit among `candidates`; ties go to the earlier candidate.
    pub fn longest_of(&self, candidates: impl IntoIterator<Item = Suit>) -> Option<Suit> {
        candidates.into_iter().fold(None, |best, s| match best {
            Some(b) if self.length(b) >= self.length(s) => Some(b),
            _ => Some(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_snapshot() {
        let hand = Hand::parse("A2.KQ3.J5432.A54").unwrap();
        let eval = HandEvaluation::new(&hand);
        assert_eq!(eval.hcp, 14);
        assert_eq!(eval.length(Suit::Hearts), 5);
        assert!(eval.balanced);
        assert_eq!(eval.length_points, 1);
        assert_eq!(eval.total_points(), 15);
        assert_eq!(eval.aces, 2);
        assert_eq!(eval, HandEvaluation::new(&hand));
    }

    #[test]
    fn test_longest_of_prefers_earlier_on_ties() {
        let eval = HandEvaluation::new(&Hand::parse("AKQ2.32.5432.AKQ").unwrap());
        assert_eq!(
            eval.longest_of([Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]),
            Some(Suit::Hearts)
        );
        assert_eq!(
            eval.longest_of([Suit::Clubs, Suit::Hearts, Suit::Diamonds]),
            Some(Suit::Clubs)
        );
        assert_eq!(eval.longest_of([Suit::Spades]), Some(Suit::Spades));
    }
}
