//! First-match-wins selection over the rule list for the current context.

use crate::rules;
use crate::situation::Situation;
use crate::trace::RuleTrace;
use bridge_core::Call;
use tracing::{debug, warn};

pub struct Selection {
    pub call: Call,
    pub rule: Option<&'static str>,
    pub considered: Vec<RuleTrace>,
}

/// Walks the rules for `situation.context` in order and returns the first
/// legal proposal. A proposal that turns out to be illegal is logged and
/// skipped. When nothing applies the answer is Pass.
pub fn select(situation: &Situation<'_>) -> Selection {
    let mut considered = Vec::new();
    for rule in rules::for_context(&situation.context) {
        let proposed = rule.propose(situation);
        let legal = proposed.is_some_and(|call| situation.is_legal(call));
        considered.push(RuleTrace {
            rule_name: rule.name(),
            description: rule.description(),
            proposed,
            legal,
        });
        match proposed {
            Some(call) if legal => {
                debug!(
                    seat = ?situation.seat,
                    context = situation.context.name(),
                    rule = rule.name(),
                    %call,
                    "rule matched"
                );
                return Selection {
                    call,
                    rule: Some(rule.name()),
                    considered,
                };
            }
            Some(call) => {
                warn!(rule = rule.name(), %call, "rule proposed an illegal call, skipping");
            }
            None => {}
        }
    }
    debug!(
        seat = ?situation.seat,
        context = situation.context.name(),
        "no rule applies, passing"
    );
    Selection {
        call: Call::Pass,
        rule: None,
        considered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SystemConfig;
    use bridge_core::{Auction, Hand, Position, Strain, Vulnerability};

    #[test]
    fn test_selection_records_every_rule_up_to_the_match() {
        let hand = Hand::parse("K32.A32.Q32.K432").unwrap();
        let auction = Auction::new(Position::North, Vulnerability::None);
        let system = SystemConfig::default();
        let situation = Situation::new(&hand, &auction, Position::North, &system);
        let selection = select(&situation);
        assert_eq!(selection.call, Call::bid(1, Strain::NoTrump));
        assert_eq!(selection.rule, Some("1NT Opening"));
        let last = selection.considered.last().unwrap();
        assert!(last.matched());
        assert!(selection.considered[..selection.considered.len() - 1]
            .iter()
            .all(|r| !r.matched()));
    }

    #[test]
    fn test_nothing_applies_passes() {
        let hand = Hand::parse("432.432.5432.432").unwrap();
        let auction = Auction::new(Position::North, Vulnerability::None);
        let system = SystemConfig::default();
        let situation = Situation::new(&hand, &auction, Position::North, &system);
        let selection = select(&situation);
        assert_eq!(selection.call, Call::Pass);
        assert_eq!(selection.rule, None);
        assert_eq!(selection.considered.len(), crate::rules::opening::RULES.len());
    }
}
