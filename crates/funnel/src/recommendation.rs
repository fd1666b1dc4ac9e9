//! Funnel recommendation and the hint banks it draws from

use serde::{Deserialize, Serialize};

use crate::state::{ConversationState, FunnelStage, Intent, ObjectionType, OfferKind, PainTag};

/// Questions that explore a pain further, rotated per turn
pub fn deepening_questions(pain: PainTag) -> &'static [&'static str] {
    match pain {
        PainTag::Weight => &[
            "Как давно вас беспокоит вес? Что уже пробовали?",
            "Сколько килограммов хотелось бы сбросить и к какому сроку?",
            "Что обычно мешает удержать результат?",
        ],
        PainTag::Energy => &[
            "Когда чаще всего чувствуете упадок сил: утром или ближе к вечеру?",
            "Сколько часов в среднем удаётся спать?",
            "Как обычно питаетесь в течение дня?",
        ],
        PainTag::Money => &[
            "Сколько хотелось бы дополнительно зарабатывать в месяц?",
            "Сколько времени в неделю готовы уделять новому делу?",
            "Был ли у вас опыт подработки или своего дела?",
        ],
        PainTag::Skin => &[
            "Что больше всего беспокоит в коже прямо сейчас?",
            "Какой уход уже используете?",
            "Как давно заметили изменения?",
        ],
        PainTag::Sleep => &[
            "Сложнее заснуть или вы просыпаетесь среди ночи?",
            "Во сколько обычно ложитесь?",
            "Как чувствуете себя утром после пробуждения?",
        ],
        PainTag::Immunity => &[
            "Как часто болеете в течение года?",
            "Что обычно помогает быстрее восстановиться?",
            "Сдавали ли недавно анализы?",
        ],
        PainTag::Stress => &[
            "Что сейчас сильнее всего выматывает?",
            "Как обычно снимаете напряжение?",
            "Давно ли чувствуете себя на пределе?",
        ],
    }
}

/// Phrase that bridges from a pain to the offer
pub fn transition_phrase(pain: PainTag) -> &'static str {
    match pain {
        PainTag::Weight => {
            "Многим с похожей задачей помог мягкий подход к питанию без жёстких диет. Рассказать, как это устроено?"
        }
        PainTag::Energy => {
            "Часто упадок сил связан с нехваткой витаминов и воды. Есть простой способ это поправить, показать?"
        }
        PainTag::Money => {
            "Кстати, у нас есть формат дополнительного дохода, который можно совмещать с работой. Интересно узнать подробнее?"
        }
        PainTag::Skin => {
            "Состояние кожи во многом идёт изнутри. Могу рассказать, что помогло нашим клиентам."
        }
        PainTag::Sleep => {
            "Сон часто налаживается, когда организм получает нужные вещества вечером. Рассказать подробнее?"
        }
        PainTag::Immunity => {
            "Иммунитет можно поддержать заранее, а не только когда уже заболели. Показать, как мы это делаем?"
        }
        PainTag::Stress => {
            "Когда стресс держится долго, организму нужна поддержка. Есть мягкое решение, рассказать?"
        }
    }
}

/// Rebuttal script for an objection; `{product}` is replaced by the product name
pub fn rebuttal_template(kind: ObjectionType) -> &'static str {
    match kind {
        ObjectionType::Price => {
            "Понимаю. Давайте посчитаем: {product} в день обходится дешевле чашки кофе, а результат остаётся с вами надолго."
        }
        ObjectionType::Trust => {
            "Сомневаться нормально. {product} сертифицирован, и я могу показать отзывы реальных людей, а не рекламу."
        }
        ObjectionType::Time => {
            "Как раз поэтому {product} и удобен: пара минут в день, и не нужно перестраивать график."
        }
        ObjectionType::Delay => {
            "Конечно, подумайте. Чтобы было проще решить, пришлю короткую памятку про {product}: что входит и какого результата ждать."
        }
    }
}

pub fn rebuttal(kind: ObjectionType, product_name: &str) -> String {
    rebuttal_template(kind).replace("{product}", product_name)
}

/// Next-move advice for one user turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelRecommendation {
    pub user_id: String,
    pub stage: FunnelStage,
    pub intent: Intent,
    pub pains: Vec<PainTag>,
    pub objections: Vec<ObjectionType>,
    /// Objection detected in this message
    pub objection_type: Option<ObjectionType>,
    pub engagement_score: i32,
    pub trust_score: i32,
    pub messages_seen: u32,
    pub objections_seen: u32,
    pub offer_ready: bool,
    pub offer_kind: OfferKind,
    pub deepening_question: Option<String>,
    pub transition_phrase: Option<String>,
    pub rebuttal: Option<String>,
}

impl FunnelRecommendation {
    /// Build from the updated state
    pub fn from_state(
        state: &ConversationState,
        objection_type: Option<ObjectionType>,
        offer_ready: bool,
        product_name: &str,
    ) -> Self {
        let deepening_question = state.pains.last().and_then(|pain| {
            let bank = deepening_questions(*pain);
            let rotation = state.messages_seen as usize % bank.len().max(1);
            bank.get(rotation).map(|q| q.to_string())
        });

        let transition = state
            .pains
            .first()
            .map(|pain| transition_phrase(*pain).to_string());

        let rebuttal_text = match (state.stage, objection_type) {
            (FunnelStage::Objection, Some(kind)) => Some(rebuttal(kind, product_name)),
            _ => None,
        };

        Self {
            user_id: state.user_id.clone(),
            stage: state.stage,
            intent: state.intent.unwrap_or(Intent::Curious),
            pains: state.pains.clone(),
            objections: state.objections.clone(),
            objection_type,
            engagement_score: state.engagement_score,
            trust_score: state.trust_score,
            messages_seen: state.messages_seen,
            objections_seen: state.objections_seen,
            offer_ready,
            offer_kind: state.offer_kind(),
            deepening_question,
            transition_phrase: transition,
            rebuttal: rebuttal_text,
        }
    }

    /// Instruction block to merge with the persona's voice instructions
    pub fn prompt_fragment(&self) -> String {
        let mut lines = vec![
            "## Sales Funnel".to_string(),
            format!("Stage: {} - {}", self.stage.display_name(), self.stage.guidance()),
            format!("Intent: {}", self.intent.as_str()),
        ];

        if !self.pains.is_empty() {
            let pains: Vec<&str> = self.pains.iter().map(|p| p.as_str()).collect();
            lines.push(format!("Known needs: {}", pains.join(", ")));
        }
        if !self.objections.is_empty() {
            let objections: Vec<&str> = self.objections.iter().map(|o| o.as_str()).collect();
            lines.push(format!("Objections so far: {}", objections.join(", ")));
        }

        lines.push(format!(
            "Offer ({}): {}",
            self.offer_kind.as_str(),
            if self.offer_ready { "ready" } else { "not yet" }
        ));

        match self.stage {
            FunnelStage::Objection => {
                if let Some(rebuttal) = &self.rebuttal {
                    lines.push(format!("Answer the objection along these lines: {}", rebuttal));
                }
            }
            FunnelStage::Solution | FunnelStage::Closing | FunnelStage::SolutionHint => {
                if let Some(phrase) = &self.transition_phrase {
                    lines.push(format!("Bridge to the offer: {}", phrase));
                }
            }
            _ => {
                if let Some(question) = &self.deepening_question {
                    lines.push(format!("Ask next: {}", question));
                }
            }
        }

        lines.join("\n")
    }
}
