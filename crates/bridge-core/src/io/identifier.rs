use crate::auction::Auction;
use crate::board::{Deal, Position, Vulnerability};
use crate::call::parse_calls;
use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Imports a deal and optionally an auction from a board identifier.
/// Format: `<board_number>-<deal_hex>[:<calls>]`, calls comma-separated.
///
/// Dealer and vulnerability follow from the board number.
pub fn import_board(identifier: &str) -> Result<(Deal, Option<Auction>), ParseError> {
    let malformed = || ParseError::Identifier(identifier.to_string());

    let (board_part, rest) = identifier.trim().split_once('-').ok_or_else(malformed)?;
    let board_number: u32 = board_part.parse().map_err(|_| malformed())?;
    let (deal_hex, calls) = match rest.split_once(':') {
        Some((hex, calls)) => (hex, Some(calls)),
        None => (rest, None),
    };

    let dealer = Position::dealer_from_board_number(board_number);
    let vulnerability = Vulnerability::from_board_number(board_number);
    let deal = Deal::new(dealer, vulnerability, import_hex_deal(deal_hex)?)?;

    let auction = calls
        .map(|calls| Auction::from_calls(dealer, vulnerability, parse_calls(calls)?))
        .transpose()?;

    Ok((deal, auction))
}

/// Decodes 26 hex digits, each holding the owners of two consecutive cards.
pub fn import_hex_deal(hex: &str) -> Result<[Hand; 4], ParseError> {
    if hex.len() != 26 {
        return Err(ParseError::Identifier(hex.to_string()));
    }
    let mut hands: [Hand; 4] = Default::default();
    for (char_idx, c) in hex.chars().enumerate() {
        let value = c
            .to_digit(16)
            .ok_or_else(|| ParseError::Identifier(hex.to_string()))? as usize;
        for (offset, owner) in [(0, value / 4), (1, value % 4)] {
            if let Some(card) = card_from_id(char_idx * 2 + offset) {
                hands[owner].cards.push(card);
            }
        }
    }
    Ok(hands)
}

pub fn export_board(deal: &Deal, board_number: u32, auction: Option<&Auction>) -> String {
    let mut identifier = format!("{}-{}", board_number, export_hex_deal(deal));
    if let Some(a) = auction.filter(|a| !a.is_empty()) {
        let calls: Vec<String> = a.calls().map(|c| c.render()).collect();
        identifier.push(':');
        identifier.push_str(&calls.join(","));
    }
    identifier
}

pub fn export_hex_deal(deal: &Deal) -> String {
    let mut owner = [0usize; 52];
    for (pos, hand) in deal.hands() {
        for card in &hand.cards {
            owner[card_id(card)] = pos.idx();
        }
    }
    owner
        .chunks(2)
        .map(|pair| HEX_DIGITS[pair[0] * 4 + pair[1]] as char)
        .collect()
}

fn card_from_id(id: usize) -> Option<Card> {
    let suit = *Suit::ALL.get(id / 13)?;
    Some(Card::new(suit, Rank::ALL[id % 13]))
}

fn card_id(card: &Card) -> usize {
    card.suit.idx() * 13 + (card.rank as usize - 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::Call;
    use crate::strain::Strain;

    // North spades, East hearts, South diamonds, West clubs.
    const ONE_SUIT_EACH: &str = "ffffffeaaaaaa5555554000000";

    #[test]
    fn test_card_id_mapping() {
        assert_eq!(card_id(&Card::new(Suit::Clubs, Rank::Two)), 0);
        assert_eq!(card_id(&Card::new(Suit::Clubs, Rank::Ace)), 12);
        assert_eq!(card_id(&Card::new(Suit::Spades, Rank::Ace)), 51);
        assert_eq!(card_from_id(51), Some(Card::new(Suit::Spades, Rank::Ace)));
        assert_eq!(card_from_id(52), None);
    }

    #[test]
    fn test_import_board_identifier() {
        let identifier = format!("6-{}:1S,X,XX", ONE_SUIT_EACH);
        let (deal, auction) = import_board(&identifier).unwrap();

        assert_eq!(deal.dealer(), Position::East);
        assert_eq!(deal.vulnerability(), Vulnerability::EW);
        assert_eq!(deal.hand(Position::North).length(Suit::Spades), 13);
        assert_eq!(deal.hand(Position::West).length(Suit::Clubs), 13);

        let calls: Vec<Call> = auction.unwrap().calls().collect();
        assert_eq!(
            calls,
            vec![Call::bid(1, Strain::Spades), Call::Double, Call::Redouble]
        );
    }

    #[test]
    fn test_export_round_trip() {
        let identifier = format!("1-{}:1NT,Pass,3NT", ONE_SUIT_EACH);
        let (deal, auction) = import_board(&identifier).unwrap();
        assert_eq!(export_board(&deal, 1, auction.as_ref()), identifier);
        assert_eq!(
            export_board(&deal, 1, None),
            format!("1-{}", ONE_SUIT_EACH)
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(import_board("nonsense").is_err());
        assert!(import_board("1-123").is_err());
        // Every card to North is not a deal.
        assert!(matches!(
            import_board("1-00000000000000000000000000"),
            Err(ParseError::Deal(_))
        ));
        // Double of partner's bid.
        assert!(matches!(
            import_board(&format!("1-{}:1S,P,X", ONE_SUIT_EACH)),
            Err(ParseError::Auction { index: 2, .. })
        ));
    }
}
