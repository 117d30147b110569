use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand string in the format "Clubs.Diamonds.Hearts.Spades".
///
/// Suits run in ascending order (C, D, H, S), the reverse of PBN. Use
/// [`crate::io::pbn::import_hand`] for PBN strings. Fewer than thirteen cards
/// are accepted; [`Hand::validate`] enforces a full hand.
pub fn parse_hand(s: &str) -> Result<Hand, ParseError> {
    let suits: Vec<&str> = s.trim().split('.').collect();
    if suits.len() != 4 {
        return Err(ParseError::Hand(s.to_string()));
    }
    let mut cards = Vec::new();
    for (suit, holding) in Suit::ALL.iter().zip(suits) {
        for c in holding.chars() {
            let rank = Rank::from_char(c).ok_or_else(|| ParseError::Hand(s.to_string()))?;
            cards.push(Card::new(*suit, rank));
        }
    }
    Ok(Hand::new(cards))
}

/// Inverse of [`parse_hand`].
pub fn format_hand(hand: &Hand) -> String {
    Suit::ALL
        .iter()
        .map(|&s| hand.holding(s))
        .collect::<Vec<_>>()
        .join(".")
}
