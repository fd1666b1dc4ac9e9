//! Conversational sales funnel
//!
//! Tracks each user's conversation through a staged dialogue:
//! - Intent classification on the first message
//! - Pain (need) and objection detection by keyword rules
//! - Engagement and trust scoring
//! - Stage resolution with offer readiness
//! - Recommendation with a deepening question, bridge phrase or rebuttal
//!
//! # Example
//!
//! ```ignore
//! use moodcast_funnel::ConversationFunnel;
//!
//! let funnel = ConversationFunnel::new(settings.funnel.clone());
//! let rec = funnel.analyze_message("user-42", "Хочу похудеть к лету")?;
//! let instructions = rec.prompt_fragment();
//! ```

pub mod funnel;
pub mod recommendation;
pub mod rules;
pub mod scoring;
pub mod state;

pub use funnel::ConversationFunnel;
pub use recommendation::{deepening_questions, rebuttal, transition_phrase, FunnelRecommendation};
pub use rules::{classify_intent, detect_objection, detect_pains, KeywordRule};
pub use scoring::{engagement_delta, offer_ready, resolve_stage, trust_delta, StageFacts};
pub use state::{ConversationState, FunnelStage, Intent, ObjectionType, OfferKind, PainTag};
