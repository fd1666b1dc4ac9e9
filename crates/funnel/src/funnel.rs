//! Conversational funnel
//!
//! One `ConversationState` per user, kept in an injected store. Turns from
//! the same user are serialized by a per-user lock held across
//! get → mutate → put; different users never contend.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use moodcast_config::FunnelSettings;
use moodcast_core::{InMemoryStore, Result, StateStore};
use parking_lot::Mutex;

use crate::recommendation::FunnelRecommendation;
use crate::rules::{classify_intent, detect_objection, detect_pains};
use crate::scoring::{engagement_delta, offer_ready, resolve_stage, trust_delta, StageFacts};
use crate::state::{ConversationState, FunnelStage};

fn state_key(user_id: &str) -> String {
    format!("conversation:{}", user_id)
}

pub struct ConversationFunnel {
    settings: FunnelSettings,
    store: Arc<dyn StateStore<ConversationState>>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ConversationFunnel {
    /// Funnel with an in-memory store
    pub fn new(settings: FunnelSettings) -> Self {
        Self::with_store(settings, Arc::new(InMemoryStore::<ConversationState>::new()))
    }

    pub fn with_store(settings: FunnelSettings, store: Arc<dyn StateStore<ConversationState>>) -> Self {
        tracing::debug!(backend = store.backend(), "Conversation funnel ready");
        Self {
            settings,
            store,
            locks: DashMap::new(),
        }
    }

    pub fn settings(&self) -> &FunnelSettings {
        &self.settings
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Process one incoming message and recommend the next move.
    ///
    /// Never fails on text; errors come only from the store.
    pub fn analyze_message(&self, user_id: &str, text: &str) -> Result<FunnelRecommendation> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        let key = state_key(user_id);
        let mut state = self
            .store
            .get(&key)?
            .unwrap_or_else(|| ConversationState::new(user_id));
        let lower = text.to_lowercase();

        state.messages_seen += 1;
        state.last_message_at = Some(Utc::now());

        if state.intent.is_none() {
            let intent = classify_intent(&lower);
            tracing::debug!(user_id = %user_id, intent = intent.as_str(), "Classified intent");
            state.intent = Some(intent);
        }

        for pain in detect_pains(&lower) {
            if state.add_pain(pain) {
                tracing::debug!(user_id = %user_id, pain = pain.as_str(), "New pain detected");
            }
        }

        let objection = detect_objection(&lower);
        if let Some(kind) = objection {
            state.record_objection(kind);
            tracing::debug!(
                user_id = %user_id,
                objection = kind.as_str(),
                count = state.objections_seen,
                "Objection detected"
            );
        }

        state.engagement_score += engagement_delta(text, &self.settings);
        state.trust_score += trust_delta(&lower);

        let ready = offer_ready(&state, &self.settings);
        let previous = state.stage;
        state.stage = resolve_stage(&StageFacts::from_state(&state, objection.is_some(), ready));

        if state.stage != previous {
            tracing::info!(
                user_id = %user_id,
                from = previous.as_str(),
                to = state.stage.as_str(),
                "Funnel stage changed"
            );
        }

        let recommendation =
            FunnelRecommendation::from_state(&state, objection, ready, &self.settings.product_name);

        // the offer is made on this turn, so the next ready turn closes
        if state.stage == FunnelStage::Solution {
            state.mark_pitch();
        }

        self.store.put(&key, state)?;
        Ok(recommendation)
    }

    /// Record that a product solution was pitched. Returns false for unknown users.
    pub fn mark_solution_suggested(&self, user_id: &str) -> Result<bool> {
        self.update(user_id, |state| state.solution_suggested = true)
    }

    /// Record that the business offer was pitched. Returns false for unknown users.
    pub fn mark_business_suggested(&self, user_id: &str) -> Result<bool> {
        self.update(user_id, |state| state.business_suggested = true)
    }

    fn update(&self, user_id: &str, apply: impl FnOnce(&mut ConversationState)) -> Result<bool> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        let key = state_key(user_id);
        match self.store.get(&key)? {
            Some(mut state) => {
                apply(&mut state);
                self.store.put(&key, state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Snapshot of a user's conversation
    pub fn conversation(&self, user_id: &str) -> Result<Option<ConversationState>> {
        self.store.get(&state_key(user_id))
    }

    /// Forget a user's conversation. Returns whether one existed.
    pub fn reset_conversation(&self, user_id: &str) -> Result<bool> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        let existed = self.store.delete(&state_key(user_id))?;
        if existed {
            tracing::info!(user_id = %user_id, "Conversation reset");
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Intent, ObjectionType, PainTag};

    fn funnel() -> ConversationFunnel {
        ConversationFunnel::new(FunnelSettings::default())
    }

    #[test]
    fn test_intent_frozen_after_first_message() {
        let funnel = funnel();
        let rec = funnel.analyze_message("u1", "Хочу купить коллаген").unwrap();
        assert_eq!(rec.intent, Intent::Product);

        let rec = funnel
            .analyze_message("u1", "А можно на этом заработать? Бизнес интересен")
            .unwrap();
        assert_eq!(rec.intent, Intent::Product);
        assert_eq!(rec.pains, vec![PainTag::Money]);
    }

    #[test]
    fn test_objection_preempts_readiness() {
        let funnel = funnel();
        funnel.analyze_message("u1", "Хочу похудеть, спасибо").unwrap();
        funnel.analyze_message("u1", "Спасибо, интересно").unwrap();
        let rec = funnel.analyze_message("u1", "Звучит дорого").unwrap();

        assert_eq!(rec.stage, FunnelStage::Objection);
        assert_eq!(rec.objection_type, Some(ObjectionType::Price));
        assert!(rec.offer_ready);
        assert!(rec.rebuttal.unwrap().contains("наш комплекс"));
    }

    #[test]
    fn test_solution_then_closing() {
        let funnel = funnel();
        funnel.analyze_message("u1", "Хочу больше энергии").unwrap();
        funnel.analyze_message("u1", "Спасибо, постоянно устаю").unwrap();
        let rec = funnel.analyze_message("u1", "Круто, а что посоветуете?").unwrap();
        assert_eq!(rec.stage, FunnelStage::Solution);

        let state = funnel.conversation("u1").unwrap().unwrap();
        assert!(state.solution_suggested);

        let rec = funnel.analyze_message("u1", "Ок").unwrap();
        assert_eq!(rec.stage, FunnelStage::Closing);
    }

    #[test]
    fn test_business_pitch_marked_for_business_intent() {
        let funnel = funnel();
        funnel.analyze_message("b1", "Ищу дополнительный доход").unwrap();
        funnel.analyze_message("b1", "Спасибо, интересно").unwrap();
        let rec = funnel.analyze_message("b1", "Хочу узнать условия").unwrap();

        assert_eq!(rec.stage, FunnelStage::Solution);
        assert_eq!(rec.offer_kind, crate::state::OfferKind::Business);
        let state = funnel.conversation("b1").unwrap().unwrap();
        assert!(state.business_suggested);
        assert!(!state.solution_suggested);
    }

    #[test]
    fn test_manual_marks_and_reset() {
        let funnel = funnel();
        assert!(!funnel.mark_solution_suggested("ghost").unwrap());

        funnel.analyze_message("u1", "привет").unwrap();
        assert!(funnel.mark_business_suggested("u1").unwrap());
        assert!(funnel.conversation("u1").unwrap().unwrap().business_suggested);

        assert!(funnel.reset_conversation("u1").unwrap());
        assert!(funnel.conversation("u1").unwrap().is_none());
        assert!(!funnel.reset_conversation("u1").unwrap());

        let rec = funnel.analyze_message("u1", "привет").unwrap();
        assert_eq!(rec.messages_seen, 1);
        assert_eq!(rec.stage, FunnelStage::Greeting);
    }

    #[test]
    fn test_users_are_independent() {
        let funnel = funnel();
        funnel.analyze_message("a", "Это развод?").unwrap();
        let rec = funnel.analyze_message("b", "привет").unwrap();
        assert_eq!(rec.intent, Intent::Curious);
        assert_eq!(rec.messages_seen, 1);
        assert_eq!(rec.trust_score, 0);
    }
}
