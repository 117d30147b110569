use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// The 52 cards, clubs first, two up to ace within each suit.
    pub fn deck() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

/// Parses `SA`, `hT`, `D9` and the like.
impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(suit), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::Card(s.to_string()));
        };
        let suit = Suit::from_char(suit).ok_or_else(|| ParseError::Card(s.to_string()))?;
        let rank = Rank::from_char(rank).ok_or_else(|| ParseError::Card(s.to_string()))?;
        Ok(Card::new(suit, rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deck_is_complete() {
        let deck = Card::deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.iter().collect::<HashSet<_>>().len(), 52);
    }

    #[test]
    fn test_card_text() {
        let card: Card = "hT".parse().unwrap();
        assert_eq!(card, Card::new(Suit::Hearts, Rank::Ten));
        assert_eq!(card.to_string(), "HT");
        assert!("H".parse::<Card>().is_err());
        assert!("HTT".parse::<Card>().is_err());
    }
}
