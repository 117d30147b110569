use crate::card::Card;
use crate::error::{DealError, ParseError};
use crate::hand::{Hand, HAND_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub fn contains(self, pos: Position) -> bool {
        pos.partnership() == self
    }

    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl fmt::Display for Partnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Partnership::NS => "NS",
            Partnership::EW => "EW",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    #[default]
    North,
    East,
    South,
    West,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn partnership(self) -> Partnership {
        match self {
            Position::North | Position::South => Partnership::NS,
            Position::East | Position::West => Partnership::EW,
        }
    }

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        self.seat_after(1)
    }

    /// The seat `n` turns clockwise from this one.
    pub fn seat_after(self, n: usize) -> Self {
        Position::ALL[(self.idx() + n) % 4]
    }

    pub fn partner(self) -> Self {
        self.seat_after(2)
    }

    /// Left-hand opponent, who calls next.
    pub fn lho(self) -> Self {
        self.seat_after(1)
    }

    /// Right-hand opponent, who called last.
    pub fn rho(self) -> Self {
        self.seat_after(3)
    }

    pub fn is_partner_of(self, other: Position) -> bool {
        self.partnership() == other.partnership()
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    /// Board 1 is dealt by North, board 2 by East, and so on.
    pub fn dealer_from_board_number(board_number: u32) -> Self {
        Position::ALL[(board_number.saturating_sub(1) % 4) as usize]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Position::North),
            "e" | "east" => Ok(Position::East),
            "s" | "south" => Ok(Position::South),
            "w" | "west" => Ok(Position::West),
            _ => Err(ParseError::Position(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub const ALL: [Vulnerability; 4] = [
        Vulnerability::None,
        Vulnerability::NS,
        Vulnerability::EW,
        Vulnerability::Both,
    ];

    pub fn is_vulnerable(self, pos: Position) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => pos.partnership() == Partnership::NS,
            Vulnerability::EW => pos.partnership() == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    /// Standard sixteen-board rotation.
    pub fn from_board_number(board_number: u32) -> Self {
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }
}

impl fmt::Display for Vulnerability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Vulnerability::None => "None",
            Vulnerability::NS => "NS",
            Vulnerability::EW => "EW",
            Vulnerability::Both => "Both",
        })
    }
}

/// Four hands partitioning the deck, with the dealer and vulnerability.
///
/// Only constructible through [`Deal::new`] (or deserialization, which runs
/// the same checks), so every `Deal` in hand is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DealRecord", into = "DealRecord")]
pub struct Deal {
    dealer: Position,
    vulnerability: Vulnerability,
    hands: [Hand; 4],
}

impl Deal {
    /// `hands` are in North, East, South, West order. Each hand is stored
    /// sorted, so equal deals compare equal whatever order the cards came in.
    pub fn new(
        dealer: Position,
        vulnerability: Vulnerability,
        mut hands: [Hand; 4],
    ) -> Result<Self, DealError> {
        let mut owners: HashMap<Card, Position> = HashMap::with_capacity(52);
        for (pos, hand) in Position::ALL.iter().zip(&hands) {
            hand.validate()
                .map_err(|source| DealError::InvalidHand { seat: *pos, source })?;
            for card in &hand.cards {
                if let Some(first) = owners.insert(*card, *pos) {
                    return Err(DealError::OverlappingCard {
                        card: *card,
                        first,
                        second: *pos,
                    });
                }
            }
        }
        hands.iter_mut().for_each(Hand::sort);
        Ok(Self {
            dealer,
            vulnerability,
            hands,
        })
    }

    pub fn from_map(
        dealer: Position,
        vulnerability: Vulnerability,
        mut hands: HashMap<Position, Hand>,
    ) -> Result<Self, DealError> {
        let mut take = |pos: Position| hands.remove(&pos).unwrap_or_default();
        Deal::new(
            dealer,
            vulnerability,
            [
                take(Position::North),
                take(Position::East),
                take(Position::South),
                take(Position::West),
            ],
        )
    }

    /// Shuffle a fresh deck and deal thirteen cards to each seat.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        dealer: Position,
        vulnerability: Vulnerability,
    ) -> Self {
        let mut deck = Card::deck();
        deck.shuffle(rng);
        let mut chunks = deck.chunks(HAND_SIZE).map(|c| Hand::new(c.to_vec()));
        let mut next = || chunks.next().unwrap_or_default();
        let mut hands = [next(), next(), next(), next()];
        hands.iter_mut().for_each(Hand::sort);
        Self {
            dealer,
            vulnerability,
            hands,
        }
    }

    /// A random deal with a random dealer and vulnerability.
    pub fn random_board<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let dealer = Position::ALL[rng.gen_range(0..4)];
        let vulnerability = Vulnerability::ALL[rng.gen_range(0..4)];
        Deal::random(rng, dealer, vulnerability)
    }

    pub fn dealer(&self) -> Position {
        self.dealer
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn hand(&self, pos: Position) -> &Hand {
        &self.hands[pos.idx()]
    }

    pub fn hands(&self) -> impl Iterator<Item = (Position, &Hand)> {
        Position::ALL.into_iter().zip(self.hands.iter())
    }
}

/// Plain structural form of a [`Deal`], used for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    pub dealer: Position,
    pub vulnerability: Vulnerability,
    pub north: Hand,
    pub east: Hand,
    pub south: Hand,
    pub west: Hand,
}

impl TryFrom<DealRecord> for Deal {
    type Error = DealError;

    fn try_from(r: DealRecord) -> Result<Self, Self::Error> {
        Deal::new(r.dealer, r.vulnerability, [r.north, r.east, r.south, r.west])
    }
}

impl From<Deal> for DealRecord {
    fn from(deal: Deal) -> Self {
        let [north, east, south, west] = deal.hands;
        DealRecord {
            dealer: deal.dealer,
            vulnerability: deal.vulnerability,
            north,
            east,
            south,
            west,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandError;
    use crate::rank::Rank;
    use crate::suit::Suit;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Each seat gets one full suit: N spades, E hearts, S diamonds, W clubs.
    fn suit_per_seat() -> [Hand; 4] {
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs].map(|suit| {
            Hand::new(Rank::ALL.iter().map(|&rank| Card::new(suit, rank)).collect())
        })
    }

    #[test]
    fn test_position_navigation() {
        assert_eq!(Position::North.next(), Position::East);
        assert_eq!(Position::West.next(), Position::North);
        assert_eq!(Position::East.partner(), Position::West);
        assert_eq!(Position::South.lho(), Position::West);
        assert_eq!(Position::South.rho(), Position::East);
        assert_eq!(Position::West.seat_after(6), Position::East);
        assert!(Position::North.is_partner_of(Position::South));
        assert!(!Position::North.is_partner_of(Position::East));
        assert_eq!("west".parse::<Position>(), Ok(Position::West));
        assert!("X".parse::<Position>().is_err());
    }

    #[test]
    fn test_vulnerability() {
        assert!(Vulnerability::NS.is_vulnerable(Position::North));
        assert!(!Vulnerability::NS.is_vulnerable(Position::East));
        assert!(Vulnerability::Both.is_vulnerable(Position::West));
        assert_eq!(Vulnerability::from_board_number(1), Vulnerability::None);
        assert_eq!(Vulnerability::from_board_number(4), Vulnerability::Both);
        assert_eq!(Vulnerability::from_board_number(16), Vulnerability::EW);
        assert_eq!(Position::dealer_from_board_number(7), Position::South);
    }

    #[test]
    fn test_valid_deal() {
        let deal = Deal::new(Position::East, Vulnerability::Both, suit_per_seat()).unwrap();
        assert_eq!(deal.dealer(), Position::East);
        assert_eq!(deal.hand(Position::South).length(Suit::Diamonds), 13);
        assert_eq!(deal.hands().count(), 4);
    }

    #[test]
    fn test_short_hand_is_rejected() {
        let mut hands = suit_per_seat();
        hands[1].cards.pop();
        let err = Deal::new(Position::North, Vulnerability::None, hands).unwrap_err();
        assert_eq!(
            err,
            DealError::InvalidHand {
                seat: Position::East,
                source: HandError::WrongCardCount(12)
            }
        );
    }

    #[test]
    fn test_overlap_is_rejected() {
        let mut hands = suit_per_seat();
        let stolen = Card::new(Suit::Spades, Rank::Ace);
        hands[3].cards[0] = stolen;
        let err = Deal::new(Position::North, Vulnerability::None, hands).unwrap_err();
        assert_eq!(
            err,
            DealError::OverlappingCard {
                card: stolen,
                first: Position::North,
                second: Position::West
            }
        );
    }

    #[test]
    fn test_random_deals_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let deal = Deal::random_board(&mut rng);
            let record = DealRecord::from(deal.clone());
            assert_eq!(Deal::try_from(record), Ok(deal));
        }
    }

    #[test]
    fn test_deserialization_validates() {
        let deal = Deal::new(Position::North, Vulnerability::NS, suit_per_seat()).unwrap();
        let json = serde_json::to_string(&deal).unwrap();
        assert_eq!(serde_json::from_str::<Deal>(&json).unwrap(), deal);

        let mut record = DealRecord::from(deal);
        record.west.cards.truncate(5);
        let json = serde_json::to_string(&record).unwrap();
        assert!(serde_json::from_str::<Deal>(&json).is_err());
    }
}
