//! Post-mortem on a finished auction.

use bridge_core::{Auction, Call, Deal, Position};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Opened with fewer than 12 HCP, other than a preempt.
    LightOpening { seat: Position, hcp: u8, call: Call },
    /// Passed with 12+ HCP while nobody had opened.
    MissedOpening { seat: Position, hcp: u8 },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::LightOpening { seat, hcp, call } => {
                write!(f, "Light opening: {seat} opened {call} with only {hcp} HCP")
            }
            Finding::MissedOpening { seat, hcp } => {
                write!(f, "Missed opening: {seat} passed with {hcp} HCP")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionReport {
    pub final_contract: String,
    pub total_calls: usize,
    pub findings: Vec<Finding>,
}

/// Two- and three-level suit openings.
fn is_preempt(call: Call) -> bool {
    matches!(call.level(), Some(2..=3)) && !call.is_notrump()
}

pub fn analyze(deal: &Deal, auction: &Auction) -> AuctionReport {
    let final_contract = match auction.final_contract() {
        Some(contract) => contract.to_string(),
        None if auction.is_terminated() => "All Pass".to_string(),
        None => "Unfinished".to_string(),
    };

    let hcp = |seat: Position| deal.hand(seat).hcp();
    let mut findings = Vec::new();
    for entry in auction.entries() {
        if entry.call.is_bid() {
            if hcp(entry.seat) < 12 && !is_preempt(entry.call) {
                findings.push(Finding::LightOpening {
                    seat: entry.seat,
                    hcp: hcp(entry.seat),
                    call: entry.call,
                });
            }
            break;
        }
        if hcp(entry.seat) >= 12 {
            findings.push(Finding::MissedOpening {
                seat: entry.seat,
                hcp: hcp(entry.seat),
            });
        }
    }

    AuctionReport {
        final_contract,
        total_calls: auction.len(),
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::{Card, Hand, Vulnerability};

    /// North holds `north`; everything else is dealt round the others.
    fn deal_with_north(north: &str) -> Deal {
        let north = Hand::parse(north).unwrap();
        let mut hands: [Vec<Card>; 4] = Default::default();
        hands[0] = north.cards.clone();
        let rest = Card::deck().into_iter().filter(|c| !north.contains(*c));
        for (i, card) in rest.enumerate() {
            hands[1 + i % 3].push(card);
        }
        Deal::new(Position::North, Vulnerability::None, hands.map(Hand::new)).unwrap()
    }

    fn auction(calls: &str) -> Auction {
        Auction::parse(Position::North, Vulnerability::None, calls).unwrap()
    }

    #[test]
    fn test_light_opening() {
        // 10 HCP
        let deal = deal_with_north("2.K32.AJ432.Q432");
        let report = analyze(&deal, &auction("1H P P P"));
        assert_eq!(report.final_contract, "1H by N");
        assert_eq!(report.total_calls, 4);
        assert_eq!(
            report.findings[0].to_string(),
            "Light opening: N opened 1H with only 10 HCP"
        );
    }

    #[test]
    fn test_weak_two_is_not_light() {
        let deal = deal_with_north("2.32.KQ9432.Q432");
        let report = analyze(&deal, &auction("2H P P P"));
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_missed_opening() {
        let deal = deal_with_north("AK2.KQ2.Q32.Q432");
        let report = analyze(&deal, &auction("P P P P"));
        assert_eq!(report.final_contract, "All Pass");
        assert_eq!(
            report.findings[0],
            Finding::MissedOpening {
                seat: Position::North,
                hcp: 16
            }
        );
    }
}
