//! Engagement/trust scoring, offer readiness and stage resolution

use moodcast_config::FunnelSettings;
use unicode_segmentation::UnicodeSegmentation;

use crate::rules::{contains_any, DISTRUST_WORDS, GRATITUDE_WORDS};
use crate::state::{ConversationState, FunnelStage};

/// Message length in user-perceived characters
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0x1F000..=0x1F2FF
    )
}

pub fn has_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// Engagement gained from one message
pub fn engagement_delta(text: &str, settings: &FunnelSettings) -> i32 {
    let length = grapheme_len(text);
    let mut delta = 0;

    if length > settings.long_message_chars {
        delta += 2;
    } else if length > settings.medium_message_chars {
        delta += 1;
    }
    if text.contains('?') {
        delta += 1;
    }
    if has_emoji(text) {
        delta += 1;
    }

    delta
}

/// Trust change from one lower-cased message
pub fn trust_delta(text: &str) -> i32 {
    let mut delta = 0;
    if contains_any(text, GRATITUDE_WORDS) {
        delta += 1;
    }
    if contains_any(text, DISTRUST_WORDS) {
        delta -= 1;
    }
    delta
}

/// Enough messages, enough trust, a known need and not too much pushback
pub fn offer_ready(state: &ConversationState, settings: &FunnelSettings) -> bool {
    state.messages_seen >= settings.ready_min_messages
        && state.trust_score >= settings.ready_min_trust
        && !state.pains.is_empty()
        && state.objections_seen < settings.max_objections
}

/// Inputs to stage resolution for the current turn
#[derive(Debug, Clone, Copy)]
pub struct StageFacts {
    pub messages_seen: u32,
    pub objection_now: bool,
    pub has_pains: bool,
    pub offer_ready: bool,
    pub pitch_made: bool,
}

impl StageFacts {
    pub fn from_state(state: &ConversationState, objection_now: bool, offer_ready: bool) -> Self {
        Self {
            messages_seen: state.messages_seen,
            objection_now,
            has_pains: !state.pains.is_empty(),
            offer_ready,
            pitch_made: state.pitch_made(),
        }
    }
}

type StageRule = (fn(&StageFacts) -> bool, FunnelStage);

/// Evaluated top to bottom; the last rule always matches
const STAGE_RULES: &[StageRule] = &[
    (|f| f.messages_seen <= 1, FunnelStage::Greeting),
    (|f| f.objection_now, FunnelStage::Objection),
    (|f| !f.has_pains, FunnelStage::Discovery),
    (|f| f.messages_seen < 3, FunnelStage::Deepening),
    (|f| f.offer_ready && f.pitch_made, FunnelStage::Closing),
    (|f| f.offer_ready, FunnelStage::Solution),
    (|_| true, FunnelStage::SolutionHint),
];

/// Recompute the stage from scratch
pub fn resolve_stage(facts: &StageFacts) -> FunnelStage {
    STAGE_RULES
        .iter()
        .find(|(applies, _)| applies(facts))
        .map(|(_, stage)| *stage)
        .unwrap_or(FunnelStage::SolutionHint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PainTag;

    fn facts() -> StageFacts {
        StageFacts {
            messages_seen: 4,
            objection_now: false,
            has_pains: true,
            offer_ready: false,
            pitch_made: false,
        }
    }

    #[test]
    fn test_grapheme_length() {
        assert_eq!(grapheme_len("привет"), 6);
        assert_eq!("привет".len(), 12);
        // family emoji is one grapheme
        assert_eq!(grapheme_len("👨‍👩‍👧"), 1);
    }

    #[test]
    fn test_engagement_delta() {
        let settings = FunnelSettings::default();
        assert_eq!(engagement_delta("ок", &settings), 0);
        assert_eq!(engagement_delta("а это как?", &settings), 1);
        assert_eq!(engagement_delta("класс 🔥", &settings), 1);
        assert_eq!(engagement_delta(&"а".repeat(60), &settings), 1);
        assert_eq!(engagement_delta(&"а".repeat(101), &settings), 2);
        assert_eq!(engagement_delta(&"а".repeat(100), &settings), 1);
        let long = format!("{}? ☀", "б".repeat(120));
        assert_eq!(engagement_delta(&long, &settings), 4);
    }

    #[test]
    fn test_trust_delta() {
        assert_eq!(trust_delta("спасибо!"), 1);
        assert_eq!(trust_delta("это обман"), -1);
        assert_eq!(trust_delta("спасибо, но я не верю"), 0);
        assert_eq!(trust_delta("ну да"), 0);
    }

    #[test]
    fn test_offer_readiness_thresholds() {
        let settings = FunnelSettings::default();
        let mut state = ConversationState::new("u");
        state.messages_seen = 3;
        state.trust_score = 2;
        state.add_pain(PainTag::Energy);
        assert!(offer_ready(&state, &settings));

        state.objections_seen = 3;
        assert!(!offer_ready(&state, &settings));

        state.objections_seen = 2;
        state.trust_score = 1;
        assert!(!offer_ready(&state, &settings));
    }

    #[test]
    fn test_stage_priority() {
        let mut f = facts();
        f.messages_seen = 1;
        f.objection_now = true;
        assert_eq!(resolve_stage(&f), FunnelStage::Greeting);

        let mut f = facts();
        f.objection_now = true;
        f.offer_ready = true;
        assert_eq!(resolve_stage(&f), FunnelStage::Objection);

        let mut f = facts();
        f.has_pains = false;
        assert_eq!(resolve_stage(&f), FunnelStage::Discovery);

        let mut f = facts();
        f.messages_seen = 2;
        assert_eq!(resolve_stage(&f), FunnelStage::Deepening);

        let mut f = facts();
        f.offer_ready = true;
        assert_eq!(resolve_stage(&f), FunnelStage::Solution);
        f.pitch_made = true;
        assert_eq!(resolve_stage(&f), FunnelStage::Closing);

        assert_eq!(resolve_stage(&facts()), FunnelStage::SolutionHint);
    }
}
