use crate::error::ParseError;
use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct bids, 1C through 7NT.
pub const BID_COUNT: u8 = 35;

/// One utterance in an auction.
///
/// Only bids are ordered; see [`Call::rank`]. Pass, Double and Redouble are
/// governed by the legality rules in [`crate::auction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Bid { level: u8, strain: Strain },
    Double,
    Redouble,
}

impl Call {
    pub const fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    /// Position of a bid on the ladder: 1C is 1, 1NT is 5, 7NT is 35.
    pub fn rank(self) -> Option<u8> {
        match self {
            Call::Bid {
                level: level @ 1..=7,
                strain,
            } => Some((level - 1) * 5 + strain.idx() as u8 + 1),
            _ => None,
        }
    }

    /// Inverse of [`Call::rank`].
    pub fn from_rank(rank: u8) -> Option<Self> {
        if !(1..=BID_COUNT).contains(&rank) {
            return None;
        }
        let index = rank - 1;
        Some(Call::bid(index / 5 + 1, Strain::ALL[(index % 5) as usize]))
    }

    /// True if both are bids and `self` is strictly higher on the ladder.
    pub fn outranks(self, other: Call) -> bool {
        matches!((self.rank(), other.rank()), (Some(a), Some(b)) if a > b)
    }

    /// The bid `steps` rungs above this one, if it exists.
    pub fn step_up(self, steps: u8) -> Option<Call> {
        Call::from_rank(self.rank()?.checked_add(steps)?)
    }

    pub fn is_bid(self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Call::Pass)
    }

    pub fn level(self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(level),
            _ => None,
        }
    }

    pub fn strain(self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(strain),
            _ => None,
        }
    }

    pub fn suit(self) -> Option<Suit> {
        self.strain().and_then(Strain::to_suit)
    }

    pub fn is_notrump(self) -> bool {
        self.strain() == Some(Strain::NoTrump)
    }

    /// Standard notation: `Pass`, `X`, `XX`, `1C` .. `7NT`.
    pub fn render(self) -> String {
        match self {
            Call::Pass => "Pass".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain),
        }
    }

    pub fn is_game_bid(self) -> bool {
        match self {
            Call::Bid { level, strain } => level >= strain.game_level(),
            _ => false,
        }
    }

    pub fn is_slam_bid(self) -> bool {
        matches!(self, Call::Bid { level, .. } if level >= 6)
    }

    pub fn is_major(self) -> bool {
        self.strain().is_some_and(Strain::is_major)
    }

    pub fn is_minor(self) -> bool {
        self.strain().is_some_and(Strain::is_minor)
    }
}

impl FromStr for Call {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        match token.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = token.chars();
        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .filter(|l| (1..=7).contains(l))
            .ok_or_else(|| ParseError::Call(s.to_string()))?;
        let strain =
            Strain::from_notation(chars.as_str()).ok_or_else(|| ParseError::Call(s.to_string()))?;
        Ok(Call::bid(level as u8, strain))
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Parses a whitespace- or comma-separated call list.
pub fn parse_calls(s: &str) -> Result<Vec<Call>, ParseError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}
