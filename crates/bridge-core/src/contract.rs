use crate::board::{Partnership, Position};
use crate::call::Call;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

/// The outcome of a finished auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Position,
}

impl Contract {
    /// The bid that set this contract.
    pub fn call(&self) -> Call {
        Call::bid(self.level, self.strain)
    }

    pub fn partnership(&self) -> Partnership {
        self.declarer.partnership()
    }

    pub fn belongs_to(&self, partnership: Partnership) -> bool {
        self.partnership() == partnership
    }

    pub fn is_game(&self) -> bool {
        self.level >= self.strain.game_level()
    }

    pub fn is_slam(&self) -> bool {
        self.level >= 6
    }

    pub fn is_grand_slam(&self) -> bool {
        self.level == 7
    }
}

/// `4S by N`, `3NT X by E`, `2H XX by W`.
impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.call())?;
        match self.double_status {
            DoubleStatus::Undoubled => {}
            DoubleStatus::Doubled => write!(f, " X")?,
            DoubleStatus::Redoubled => write!(f, " XX")?,
        }
        write!(f, " by {}", self.declarer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_display() {
        let contract = Contract {
            level: 3,
            strain: Strain::NoTrump,
            double_status: DoubleStatus::Doubled,
            declarer: Position::East,
        };
        assert_eq!(contract.to_string(), "3NT X by E");
        assert!(contract.is_game());
        assert!(!contract.is_slam());
        assert!(contract.belongs_to(Partnership::EW));
    }

    #[test]
    fn test_contract_levels() {
        let contract = Contract {
            level: 7,
            strain: Strain::Clubs,
            double_status: DoubleStatus::Undoubled,
            declarer: Position::North,
        };
        assert!(contract.is_grand_slam());
        assert_eq!(contract.to_string(), "7C by N");
    }
}
