//! Ordered rule lists, one per auction context.
//!
//! Each rule looks at a [`Situation`] and either proposes a call or declines.
//! The selector walks the list for the current context and takes the first
//! proposal that is legal.

use crate::context::Context;
use crate::situation::Situation;
use bridge_core::Call;

#[macro_use]
pub mod macros;

pub mod advance;
pub mod competitive;
pub mod continuation;
pub mod opener_rebid;
pub mod opening;
pub mod overcall;
pub mod responder_rebid;
pub mod response;
pub mod slam;

pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// The call this rule wants, or `None` if it does not apply.
    fn propose(&self, situation: &Situation<'_>) -> Option<Call>;
}

pub fn for_context(context: &Context) -> &'static [&'static dyn Rule] {
    match context {
        Context::Opening => opening::RULES,
        Context::SlamAsk(_) => slam::RULES,
        Context::OpenerRebid => opener_rebid::RULES,
        Context::Response => response::RULES,
        Context::ResponderRebid => responder_rebid::RULES,
        Context::Competitive => competitive::RULES,
        Context::DirectSeat | Context::BalancingSeat => overcall::RULES,
        Context::Advance => advance::RULES,
        Context::Continuation => continuation::RULES,
    }
}
