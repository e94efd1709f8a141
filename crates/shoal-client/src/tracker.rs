//! Invocation state read model
//!
//! Every invocation of a message renders, in the order the model issued
//! them; a turn may legitimately chain two different tools and the user
//! benefits from seeing both. The last-wins lookup stays available for
//! callers that only want the most recent action.

use shoal_types::{InvocationState, Message, ToolInvocation};

/// What the renderer should do with one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// Dispatched, no result yet: show the loading placeholder
    Loading,
    /// Terminal: show the mapped component (the payload's `success` decides
    /// which branch inside it)
    Ready,
}

pub fn phase(invocation: &ToolInvocation) -> RenderPhase {
    match invocation.state {
        InvocationState::Pending | InvocationState::Call => RenderPhase::Loading,
        InvocationState::Result => RenderPhase::Ready,
    }
}

/// All invocations of a message in original order
pub fn invocations_in_order(message: &Message) -> Vec<&ToolInvocation> {
    message.invocations().collect()
}

/// Last-wins alternative: the most recently issued invocation
pub fn latest_invocation(message: &Message) -> Option<&ToolInvocation> {
    message.latest_invocation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn phases_follow_invocation_state() {
        let mut invocation = ToolInvocation::call("c1", "swap", json!({}));
        assert_eq!(phase(&invocation), RenderPhase::Loading);
        invocation.advance_to_result(json!({"success": false})).unwrap();
        assert_eq!(phase(&invocation), RenderPhase::Ready);
    }

    #[test]
    fn in_order_view_keeps_every_invocation() {
        let mut message = Message::assistant();
        message.push_invocation(ToolInvocation::call("a", "get_all_balances", json!({})));
        message.push_invocation(ToolInvocation::call("b", "get_yield_opportunities", json!({})));

        let all = invocations_in_order(&message);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tool_call_id, "a");
        assert_eq!(all[1].tool_call_id, "b");
        assert_eq!(latest_invocation(&message).unwrap().tool_call_id, "b");
    }
}
