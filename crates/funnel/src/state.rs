//! Funnel stages, classifications and per-user conversation state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dialogue stage of the guided conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunnelStage {
    /// First contact
    #[default]
    Greeting,
    /// No need identified yet
    Discovery,
    /// Need identified, exploring it
    Deepening,
    /// Not ready for an offer, hint at a solution
    SolutionHint,
    /// Ready for an offer
    Solution,
    /// Offer already made, ask for commitment
    Closing,
    /// Pushback detected this turn; pre-empts every other stage
    Objection,
}

impl FunnelStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunnelStage::Greeting => "GREETING",
            FunnelStage::Discovery => "DISCOVERY",
            FunnelStage::Deepening => "DEEPENING",
            FunnelStage::SolutionHint => "SOLUTION_HINT",
            FunnelStage::Solution => "SOLUTION",
            FunnelStage::Closing => "CLOSING",
            FunnelStage::Objection => "OBJECTION",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FunnelStage::Greeting => "Greeting",
            FunnelStage::Discovery => "Discovery",
            FunnelStage::Deepening => "Deepening",
            FunnelStage::SolutionHint => "Solution Hint",
            FunnelStage::Solution => "Solution",
            FunnelStage::Closing => "Closing",
            FunnelStage::Objection => "Objection Handling",
        }
    }

    /// Instruction for the text generator at this stage
    pub fn guidance(&self) -> &'static str {
        match self {
            FunnelStage::Greeting => {
                "Greet warmly, introduce yourself in one line and ask an open question about what brought them here."
            }
            FunnelStage::Discovery => {
                "Ask open questions to learn what bothers the person. Do not mention any offer yet."
            }
            FunnelStage::Deepening => {
                "Dig into the stated need: how long it has lasted, what was already tried, what it costs them."
            }
            FunnelStage::SolutionHint => {
                "Hint that this need can be solved without pitching. Share a relatable story and keep building trust."
            }
            FunnelStage::Solution => {
                "Present the solution concretely and tie every benefit to the needs they named."
            }
            FunnelStage::Closing => {
                "Propose one concrete next step and make it easy to say yes."
            }
            FunnelStage::Objection => {
                "Acknowledge the concern, reframe it, support it with evidence, then gently return to the conversation."
            }
        }
    }
}

impl std::fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the person is talking to us; fixed after the first message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Product,
    Business,
    Skeptic,
    Curious,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Product => "PRODUCT",
            Intent::Business => "BUSINESS",
            Intent::Skeptic => "SKEPTIC",
            Intent::Curious => "CURIOUS",
        }
    }
}

/// Inferred user need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainTag {
    Weight,
    Energy,
    Money,
    Skin,
    Sleep,
    Immunity,
    Stress,
}

impl PainTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PainTag::Weight => "weight",
            PainTag::Energy => "energy",
            PainTag::Money => "money",
            PainTag::Skin => "skin",
            PainTag::Sleep => "sleep",
            PainTag::Immunity => "immunity",
            PainTag::Stress => "stress",
        }
    }
}

/// Pushback category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionType {
    Price,
    Trust,
    Time,
    Delay,
}

impl ObjectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectionType::Price => "price",
            ObjectionType::Trust => "trust",
            ObjectionType::Time => "time",
            ObjectionType::Delay => "delay",
        }
    }
}

/// What kind of offer the conversation leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    #[default]
    Product,
    Business,
}

impl OfferKind {
    pub fn for_intent(intent: Option<Intent>) -> Self {
        match intent {
            Some(Intent::Business) => OfferKind::Business,
            _ => OfferKind::Product,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferKind::Product => "product",
            OfferKind::Business => "business",
        }
    }
}

/// Per-user conversation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_id: String,
    pub stage: FunnelStage,
    /// Set from the first message, never changed afterwards
    pub intent: Option<Intent>,
    /// Distinct pains in order of first detection
    pub pains: Vec<PainTag>,
    /// Every detected objection, in order
    pub objections: Vec<ObjectionType>,
    pub engagement_score: i32,
    pub trust_score: i32,
    pub messages_seen: u32,
    pub objections_seen: u32,
    pub solution_suggested: bool,
    pub business_suggested: bool,
    pub started_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl ConversationState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            stage: FunnelStage::Greeting,
            intent: None,
            pains: Vec::new(),
            objections: Vec::new(),
            engagement_score: 0,
            trust_score: 0,
            messages_seen: 0,
            objections_seen: 0,
            solution_suggested: false,
            business_suggested: false,
            started_at: Utc::now(),
            last_message_at: None,
        }
    }

    /// Append a pain unless already recorded. Returns whether it was new.
    pub fn add_pain(&mut self, pain: PainTag) -> bool {
        if self.pains.contains(&pain) {
            return false;
        }
        self.pains.push(pain);
        true
    }

    pub fn record_objection(&mut self, kind: ObjectionType) {
        self.objections.push(kind);
        self.objections_seen += 1;
    }

    /// Whether any pitch was already made
    pub fn pitch_made(&self) -> bool {
        self.solution_suggested || self.business_suggested
    }

    pub fn offer_kind(&self) -> OfferKind {
        OfferKind::for_intent(self.intent)
    }

    /// Record that the pitch matching the intent was made
    pub fn mark_pitch(&mut self) {
        match self.offer_kind() {
            OfferKind::Business => self.business_suggested = true,
            OfferKind::Product => self.solution_suggested = true,
        }
    }
}
