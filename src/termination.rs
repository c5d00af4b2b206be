//! Surface-pattern check for "the participants agreed to meet".
//!
//! The vocabulary is tuned to European Portuguese. It is deliberately
//! permissive: a weekday mention followed by any "ok" ends the run. False
//! positives are an accepted cost of keeping the rule simple; it is not a
//! meaning-based classifier.

use std::sync::OnceLock;

use regex::Regex;

use crate::dialogue::ConversationTurn;

const PROPOSAL_PATTERNS: [&str; 4] = [
    r"\b(?:encontro|encontrar|encontramo-nos|ver-nos|vermo-nos|combinar|marcar|vamos (?:tomar|beber|jantar|almoçar)|café|jantar|almoço|copo)\b",
    r"\b(?:hoje|amanhã|segunda|terça|quarta|quinta|sexta|sábado|domingo|fim de semana)(?:-feira)?\b",
    r"\b(?:às?|pelas?)\s*\d{1,2}(?:[:h]\d{0,2})?\b",
    r"\b\d{1,2}[:h]\d{2}\b",
];

const ACCEPTANCE_PATTERN: &str = r"\b(?:combinado|feito|perfeito|fechado|ok|funciona|pode ser)\b";

fn proposal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("(?i){}", PROPOSAL_PATTERNS.join("|")))
            .expect("proposal vocabulary is a valid regex")
    })
}

fn acceptance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("(?i){ACCEPTANCE_PATTERN}"))
            .expect("acceptance vocabulary is a valid regex")
    })
}

/// True when `text` mentions meeting verbs, a day or a clock time.
pub fn proposes_meeting(text: &str) -> bool {
    proposal_re().is_match(text)
}

/// True when `text` confirms, or itself proposes a meeting.
pub fn accepts_meeting(text: &str) -> bool {
    acceptance_re().is_match(text) || proposes_meeting(text)
}

/// Decides whether the last two texts read as "proposal, then acceptance".
///
/// Returns `false` for fewer than two entries.
pub fn meeting_agreed<S: AsRef<str>>(turns: &[S]) -> bool {
    match turns {
        [.., prev, last] => proposes_meeting(prev.as_ref()) && accepts_meeting(last.as_ref()),
        _ => false,
    }
}

/// Pluggable stop condition evaluated after every recorded turn.
pub trait TerminationDetector: Send + Sync {
    fn detect(&self, turns: &[ConversationTurn]) -> bool;
}

/// Default detector: stops once a meeting proposal is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingDetector;

impl TerminationDetector for MeetingDetector {
    fn detect(&self, turns: &[ConversationTurn]) -> bool {
        let tail = &turns[turns.len().saturating_sub(2)..];
        let texts: Vec<&str> = tail.iter().map(|t| t.text.as_str()).collect();
        meeting_agreed(&texts)
    }
}

/// Detector that never fires; the run always ends on its turn budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl TerminationDetector for NeverStop {
    fn detect(&self, _turns: &[ConversationTurn]) -> bool {
        false
    }
}
