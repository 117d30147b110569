use crate::board::{Deal, Position, Vulnerability};
use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use std::collections::HashMap;

/// Tag section for a deal, in the form double-dummy solvers accept.
pub fn export_deal(deal: &Deal, board_number: u32) -> String {
    let mut s = String::new();
    s.push_str("[Event \"?\"]\n");
    s.push_str(&format!("[Board \"{}\"]\n", board_number));
    s.push_str(&format!("[Dealer \"{}\"]\n", deal.dealer().to_char()));
    s.push_str(&format!(
        "[Vulnerable \"{}\"]\n",
        vulnerability_tag(deal.vulnerability())
    ));

    let mut hands = Vec::with_capacity(4);
    let mut pos = deal.dealer();
    for _ in 0..4 {
        hands.push(export_hand(deal.hand(pos)));
        pos = pos.next();
    }
    s.push_str(&format!(
        "[Deal \"{}:{}\"]\n",
        deal.dealer().to_char(),
        hands.join(" ")
    ));
    s
}

fn vulnerability_tag(v: Vulnerability) -> &'static str {
    match v {
        Vulnerability::None => "None",
        Vulnerability::NS => "NS",
        Vulnerability::EW => "EW",
        Vulnerability::Both => "All",
    }
}

/// `S.H.D.C`, high cards first.
pub fn export_hand(hand: &Hand) -> String {
    Suit::BY_PRIORITY
        .iter()
        .map(|&s| hand.holding(s))
        .collect::<Vec<_>>()
        .join(".")
}

fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix('[')?
        .strip_prefix(tag)?
        .trim_start()
        .strip_prefix('"')?
        .strip_suffix("\"]")
}

pub fn import_deal(pbn: &str) -> Result<Deal, ParseError> {
    let malformed = |what: &str| ParseError::Identifier(what.to_string());
    let mut dealer = Position::North;
    let mut vulnerability = Vulnerability::None;
    let mut hands = HashMap::new();

    for line in pbn.lines() {
        if let Some(d) = tag_value(line, "Dealer") {
            dealer = d.parse()?;
        } else if let Some(v) = tag_value(line, "Vulnerable") {
            vulnerability = match v {
                "None" | "Love" | "-" => Vulnerability::None,
                "NS" => Vulnerability::NS,
                "EW" => Vulnerability::EW,
                "All" | "Both" => Vulnerability::Both,
                other => return Err(malformed(other)),
            };
        } else if let Some(d) = tag_value(line, "Deal") {
            let (first, rest) = d.split_once(':').ok_or_else(|| malformed(d))?;
            let mut pos: Position = first.parse()?;
            for hand_str in rest.split_whitespace() {
                hands.insert(pos, import_hand(hand_str)?);
                pos = pos.next();
            }
        }
    }

    Ok(Deal::from_map(dealer, vulnerability, hands)?)
}

pub fn import_hand(hand_str: &str) -> Result<Hand, ParseError> {
    let suits: Vec<&str> = hand_str.split('.').collect();
    if suits.len() != 4 {
        return Err(ParseError::Hand(hand_str.to_string()));
    }
    let mut cards = Vec::new();
    for (suit, holding) in Suit::BY_PRIORITY.iter().zip(suits) {
        for c in holding.chars() {
            let rank = Rank::from_char(c).ok_or_else(|| ParseError::Hand(hand_str.to_string()))?;
            cards.push(Card::new(*suit, rank));
        }
    }
    Ok(Hand::new(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pbn_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        let deal = Deal::random(&mut rng, Position::West, Vulnerability::Both);
        let exported = export_deal(&deal, 4);
        assert!(exported.contains("[Dealer \"W\"]"));
        assert!(exported.contains("[Vulnerable \"All\"]"));
        assert_eq!(import_deal(&exported).unwrap(), deal);
    }

    #[test]
    fn test_hand_order() {
        let hand = import_hand("AK.QJ.T9.8765432").unwrap();
        assert_eq!(hand.length(Suit::Spades), 2);
        assert_eq!(hand.length(Suit::Clubs), 7);
        assert_eq!(export_hand(&hand), "AK.QJ.T9.8765432");
    }

    #[test]
    fn test_incomplete_deal_is_rejected() {
        let pbn = "[Dealer \"N\"]\n[Deal \"N:AK.QJ.T9.8765432 - - -\"]\n";
        assert!(import_deal(pbn).is_err());
    }
}
