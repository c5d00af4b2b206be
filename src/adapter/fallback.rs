//! Deterministic local replies used when no provider answer is available.

use crate::chat::{ChatMessage, ChatRole};
use crate::termination::proposes_meeting;

pub const SCHEDULING_REPLY: &str = "Quinta às 19:00 funciona para mim. Combinado?";
pub const SMALL_TALK_REPLY: &str =
    "Gosto da ideia. Conta-me mais: o que te faz sorrir num dia normal?";

/// Builds a reply from the most recent message written by someone else.
///
/// When that message talks about meeting up, a concrete time is proposed;
/// otherwise the conversation is nudged forward with a light question. The
/// small-talk reply carries no scheduling vocabulary, so two fallback-only
/// agents never agree by accident. `note` is appended verbatim.
pub fn fallback_reply(messages: &[ChatMessage], note: &str) -> String {
    let last_other = messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    let reply = if proposes_meeting(last_other) {
        SCHEDULING_REPLY
    } else {
        SMALL_TALK_REPLY
    };

    if note.is_empty() {
        reply.to_string()
    } else {
        format!("{reply} {note}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposes_time_when_other_party_mentions_coffee() {
        let messages = [
            ChatMessage::system().content("persona").build(),
            ChatMessage::user().content("Bora a um café?").build(),
        ];
        assert_eq!(fallback_reply(&messages, ""), SCHEDULING_REPLY);
    }

    #[test]
    fn ignores_own_earlier_messages() {
        let messages = [
            ChatMessage::user().content("Olá!").build(),
            ChatMessage::assistant().content("Vamos jantar amanhã?").build(),
        ];
        assert_eq!(fallback_reply(&messages, "(stub)"), format!("{SMALL_TALK_REPLY} (stub)"));
    }

    #[test]
    fn small_talk_reply_does_not_propose_a_meeting() {
        assert!(!proposes_meeting(SMALL_TALK_REPLY));
        assert!(proposes_meeting(SCHEDULING_REPLY));
    }
}
