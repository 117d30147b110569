// cspell:ignore AKQJT AKQJ
use crate::card::Card;
use crate::error::{HandError, ParseError};
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    /// 4-3-3-3, 4-4-3-2 or 5-3-3-2
    Balanced,
    /// One singleton or two doubletons, no voids, nothing longer than six (5-4-2-2, 6-3-2-2, 5-4-3-1)
    SemiBalanced,
    Unbalanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Distribution {
    pub spades: u8,
    pub hearts: u8,
    pub diamonds: u8,
    pub clubs: u8,
}

impl Distribution {
    pub fn length(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Spades => self.spades,
            Suit::Hearts => self.hearts,
            Suit::Diamonds => self.diamonds,
            Suit::Clubs => self.clubs,
        }
    }

    /// Suit lengths from longest to shortest.
    pub fn sorted_lengths(&self) -> [u8; 4] {
        let mut d = [self.spades, self.hearts, self.diamonds, self.clubs];
        d.sort_by(|a, b| b.cmp(a));
        d
    }

    pub fn shape(&self) -> Shape {
        let sorted = self.sorted_lengths();
        let doubletons = sorted.iter().filter(|&&l| l == 2).count();
        let singletons = sorted.iter().filter(|&&l| l == 1).count();
        let voids = sorted.iter().filter(|&&l| l == 0).count();

        if singletons == 0 && voids == 0 && doubletons <= 1 {
            Shape::Balanced
        } else if sorted[0] <= 6 && voids == 0 && (singletons == 1 || doubletons == 2) {
            Shape::SemiBalanced
        } else {
            Shape::Unbalanced
        }
    }
}

/// A hand of cards. Construction does not enforce thirteen cards so that
/// partial holdings can be built in tests; [`Hand::validate`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Parse a hand written as `Clubs.Diamonds.Hearts.Spades`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        crate::io::hand_parser::parse_hand(s)
    }

    /// Exactly thirteen cards, none repeated.
    pub fn validate(&self) -> Result<(), HandError> {
        if self.cards.len() != HAND_SIZE {
            return Err(HandError::WrongCardCount(self.cards.len()));
        }
        let mut seen = HashSet::with_capacity(HAND_SIZE);
        for card in &self.cards {
            if !seen.insert(*card) {
                return Err(HandError::DuplicateCard(*card));
            }
        }
        Ok(())
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.rank.hcp()).sum()
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.cards.iter().filter(|c| c.suit == suit).count() as u8
    }

    pub fn distribution(&self) -> Distribution {
        Distribution {
            spades: self.length(Suit::Spades),
            hearts: self.length(Suit::Hearts),
            diamonds: self.length(Suit::Diamonds),
            clubs: self.length(Suit::Clubs),
        }
    }

    pub fn shape(&self) -> Shape {
        self.distribution().shape()
    }

    pub fn is_balanced(&self) -> bool {
        self.shape() == Shape::Balanced
    }

    pub fn is_semi_balanced(&self) -> bool {
        self.shape() == Shape::SemiBalanced
    }

    /// One point for every card beyond the fourth in each suit.
    pub fn length_points(&self) -> u8 {
        Suit::ALL
            .iter()
            .map(|&s| self.length(s).saturating_sub(4))
            .sum()
    }

    /// High-card points plus length points.
    pub fn total_points(&self) -> u8 {
        self.hcp() + self.length_points()
    }

    /// HCP plus the lengths of the two longest suits.
    pub fn rule_of_twenty(&self) -> u8 {
        let sorted = self.distribution().sorted_lengths();
        self.hcp() + sorted[0] + sorted[1]
    }

    /// HCP plus spade length, used when opening in fourth seat.
    pub fn rule_of_fifteen(&self) -> u8 {
        self.hcp() + self.length(Suit::Spades)
    }

    fn holds(&self, suit: Suit, rank: Rank) -> bool {
        self.contains(Card::new(suit, rank))
    }

    /// A, Kx, Qxx or Jxxx.
    pub fn has_stopper(&self, suit: Suit) -> bool {
        let len = self.length(suit);
        self.holds(suit, Rank::Ace)
            || (self.holds(suit, Rank::King) && len >= 2)
            || (self.holds(suit, Rank::Queen) && len >= 3)
            || (self.holds(suit, Rank::Jack) && len >= 4)
    }

    /// At least `min_length` cards headed by two of the top three honors.
    pub fn has_good_suit(&self, suit: Suit, min_length: u8) -> bool {
        self.length(suit) >= min_length && self.top_honors(suit, 3) >= 2
    }

    /// Count how many of the top N honors (A, K, Q, J, T) the hand holds in a suit.
    pub fn top_honors(&self, suit: Suit, n: u8) -> u8 {
        const HONOR_RANKS: [Rank; 5] = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten];
        let top_n = &HONOR_RANKS[..(n as usize).min(HONOR_RANKS.len())];
        self.cards
            .iter()
            .filter(|c| c.suit == suit && top_n.contains(&c.rank))
            .count() as u8
    }

    pub fn count_rank(&self, rank: Rank) -> u8 {
        self.cards.iter().filter(|c| c.rank == rank).count() as u8
    }

    pub fn aces(&self) -> u8 {
        self.count_rank(Rank::Ace)
    }

    pub fn kings(&self) -> u8 {
        self.count_rank(Rank::King)
    }

    /// The longest suit; ties go to the higher-ranking suit.
    pub fn longest_suit(&self) -> Suit {
        Suit::BY_PRIORITY
            .iter()
            .copied()
            .fold(Suit::Spades, |best, s| {
                if self.length(s) > self.length(best) {
                    s
                } else {
                    best
                }
            })
    }

    /// All suits tied for the longest length, highest-ranking first.
    pub fn longest_suits(&self) -> Vec<Suit> {
        let max_len = Suit::ALL.iter().map(|&s| self.length(s)).max().unwrap_or(0);
        Suit::BY_PRIORITY
            .iter()
            .copied()
            .filter(|&s| self.length(s) == max_len)
            .collect()
    }

    /// Spades first, then hearts, diamonds, clubs; high cards first within a suit.
    pub fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| b.suit.cmp(&a.suit).then(b.rank.cmp(&a.rank)));
    }

    /// Ranks held in a suit, highest first, e.g. `AQ7`.
    pub fn holding(&self, suit: Suit) -> String {
        let mut ranks: Vec<Rank> = self
            .cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank)
            .collect();
        ranks.sort_by(|a, b| b.cmp(a));
        ranks.into_iter().map(Rank::to_char).collect()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Suit::BY_PRIORITY
            .iter()
            .map(|&s| {
                let holding = self.holding(s);
                format!("{}{}", s.symbol(), if holding.is_empty() { "-" } else { &holding })
            })
            .collect();
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        Hand::parse(s).unwrap()
    }

    #[test]
    fn test_hcp_calculation() {
        assert_eq!(hand("J.Q.K.A2").hcp(), 10);
        assert_eq!(hand("AKQ.AKQ.AKQ.AKQJ").hcp(), 37);
    }

    #[test]
    fn test_distribution() {
        let dist = hand("..Q.AK").distribution();
        assert_eq!(dist.spades, 2);
        assert_eq!(dist.hearts, 1);
        assert_eq!(dist.diamonds, 0);
        assert_eq!(dist.clubs, 0);
    }

    #[test]
    fn test_hand_sorting() {
        let mut h = hand("A...2");
        h.sort();
        assert_eq!(h.cards[0].suit, Suit::Spades);
        assert_eq!(h.cards[1].suit, Suit::Clubs);
    }

    #[test]
    fn test_balanced_patterns() {
        assert!(hand("AKQ.AKQ.AKQ.AKQJ").is_balanced());
        assert!(hand("AK.AKQ.AKQJ.AKQJ").is_balanced());
        assert!(hand("AK.AKQ.AKQ.AKQJT").is_balanced());
    }

    #[test]
    fn test_not_balanced_patterns() {
        let five_four_two_two = hand("AK.AK.AKQJ.AKQJT");
        assert_eq!(five_four_two_two.shape(), Shape::SemiBalanced);
        assert!(!five_four_two_two.is_balanced());
        assert_eq!(hand("A.AKQ.AKQJ.AKQJT").shape(), Shape::SemiBalanced);
        assert_eq!(hand(".AKQJ.AKQJ.AKQJT").shape(), Shape::Unbalanced);
        assert_eq!(hand("A.AK.AKQ.AKQJT98").shape(), Shape::Unbalanced);
    }

    #[test]
    fn test_evaluation_is_stable() {
        let h = hand("Q32.K54.A9876.J2");
        let first = (h.hcp(), h.distribution(), h.is_balanced());
        for _ in 0..3 {
            assert_eq!((h.hcp(), h.distribution(), h.is_balanced()), first);
        }
    }

    #[test]
    fn test_length_points() {
        // 6-5 in the majors: 2 + 1
        assert_eq!(hand(".2.AKQ32.AKQ432").length_points(), 3);
        assert_eq!(hand("AKQ.AKQ.AKQ.AKQJ").length_points(), 0);
    }

    #[test]
    fn test_stoppers() {
        assert!(hand("A...").has_stopper(Suit::Clubs));
        assert!(hand("K2...").has_stopper(Suit::Clubs));
        assert!(!hand("K...").has_stopper(Suit::Clubs));
        assert!(hand("Q32...").has_stopper(Suit::Clubs));
        assert!(!hand("Q3...").has_stopper(Suit::Clubs));
        assert!(hand("J432...").has_stopper(Suit::Clubs));
        assert!(!hand("J43...").has_stopper(Suit::Clubs));
        assert!(!hand("T9876...").has_stopper(Suit::Clubs));
    }

    #[test]
    fn test_good_suit() {
        assert!(hand("...KQ9876").has_good_suit(Suit::Spades, 6));
        assert!(!hand("...KJ9876").has_good_suit(Suit::Spades, 6));
        assert!(!hand("...AK987").has_good_suit(Suit::Spades, 6));
        assert!(hand("...AK987").has_good_suit(Suit::Spades, 5));
    }

    #[test]
    fn test_top_honors() {
        assert_eq!(hand("..AQ753.").top_honors(Suit::Hearts, 3), 2);
        let h = hand("..KJT42.");
        assert_eq!(h.top_honors(Suit::Hearts, 3), 1);
        assert_eq!(h.top_honors(Suit::Hearts, 5), 3);
        assert_eq!(hand("AKQJT...").top_honors(Suit::Spades, 5), 0);
    }

    #[test]
    fn test_aces_and_kings() {
        let h = hand("A2.K3.AK4.Q5");
        assert_eq!(h.aces(), 2);
        assert_eq!(h.kings(), 2);
    }

    #[test]
    fn test_longest_suits() {
        assert_eq!(hand(".A.AK.AKQJT").longest_suit(), Suit::Spades);
        let tied = hand("A.AK.AKQJT.AKQJT");
        assert_eq!(tied.longest_suits(), vec![Suit::Spades, Suit::Hearts]);
        assert_eq!(tied.longest_suit(), Suit::Spades);
        assert_eq!(hand("AKQJT.AKQJT.A.AK").longest_suit(), Suit::Diamonds);
    }

    #[test]
    fn test_rule_of_twenty() {
        // 10 HCP, 5-5
        let h = hand("J.43.AK432.Q5432");
        assert_eq!(h.hcp(), 10);
        assert_eq!(h.rule_of_twenty(), 20);
        assert_eq!(h.rule_of_fifteen(), 15);
    }

    #[test]
    fn test_validate() {
        assert!(hand("AKQ.AKQ.AKQ.AKQJ").validate().is_ok());
        assert_eq!(hand("AKQ...").validate(), Err(HandError::WrongCardCount(3)));
        let dup = Hand::new(vec![Card::new(Suit::Clubs, Rank::Ace); 13]);
        assert_eq!(
            dup.validate(),
            Err(HandError::DuplicateCard(Card::new(Suit::Clubs, Rank::Ace)))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(hand("J.43.AK432.Q5432").to_string(), "♠Q5432 ♥AK432 ♦43 ♣J");
        assert_eq!(hand("...A").to_string(), "♠A ♥- ♦- ♣-");
    }
}
