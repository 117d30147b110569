use crate::context::Context;
use crate::inference::PartnerProfile;
use bridge_core::{Call, Hand, Position};
use serde::Serialize;

/// One rule the selector asked, and what came back.
#[derive(Debug, Serialize, Clone)]
pub struct RuleTrace {
    pub rule_name: &'static str,
    pub description: &'static str,
    pub proposed: Option<Call>,
    pub legal: bool,
}

impl RuleTrace {
    pub fn matched(&self) -> bool {
        self.proposed.is_some() && self.legal
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct BidTrace {
    pub seat: Position,
    pub hand: Hand,
    pub context: Context,
    pub profile: PartnerProfile,
    pub rules_considered: Vec<RuleTrace>,
    pub selected_rule: Option<&'static str>,
    pub selected_call: Call,
}
