//! Keyword rule tables
//!
//! Each table is an ordered list of (keyword predicate, result) rules.
//! Matching is a lower-cased substring search; for exclusive
//! classifications the first matching rule wins.

use crate::state::{Intent, ObjectionType, PainTag};

/// A rule that fires when the text contains any of its keywords
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub result: T,
    pub keywords: &'static [&'static str],
}

impl<T: Copy> KeywordRule<T> {
    /// `text` must already be lower-cased
    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.keywords)
    }
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Result of the first matching rule
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    rules.iter().find(|r| r.matches(text)).map(|r| r.result)
}

/// Results of every matching rule, in table order
pub fn all_matches<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Vec<T> {
    rules
        .iter()
        .filter(|r| r.matches(text))
        .map(|r| r.result)
        .collect()
}

/// SKEPTIC > BUSINESS > PRODUCT; CURIOUS when nothing matches
pub const INTENT_RULES: &[KeywordRule<Intent>] = &[
    KeywordRule {
        result: Intent::Skeptic,
        keywords: &[
            "развод", "пирамид", "млм", "mlm", "обман", "не верю", "лохотрон", "сетевой", "секта",
        ],
    },
    KeywordRule {
        result: Intent::Business,
        keywords: &[
            "заработ", "доход", "бизнес", "партнер", "партнёр", "подработ", "пассивн",
            "работа из дома",
        ],
    },
    KeywordRule {
        result: Intent::Product,
        keywords: &[
            "продукт", "похуд", "вес", "энерги", "витамин", "коллаген", "здоров", "купить",
            "заказать",
        ],
    },
];

/// Independent: a message may carry several pains
pub const PAIN_RULES: &[KeywordRule<PainTag>] = &[
    KeywordRule {
        result: PainTag::Weight,
        keywords: &[
            "похуд", "лишн", "вес", "толст", "диет", "фигур", "килограмм", "жир",
        ],
    },
    KeywordRule {
        result: PainTag::Energy,
        keywords: &[
            "устал", "энерги", "нет сил", "сил нет", "вял", "сонлив", "бодрост",
        ],
    },
    KeywordRule {
        result: PainTag::Money,
        keywords: &[
            "денег", "деньг", "зарплат", "долг", "кредит", "доход", "заработ", "финанс",
        ],
    },
    KeywordRule {
        result: PainTag::Skin,
        keywords: &["кож", "морщин", "прыщ", "акне", "волос", "ногт"],
    },
    KeywordRule {
        result: PainTag::Sleep,
        keywords: &["бессонниц", "не сплю", "плохо сплю", "высып", "засыпа", "сон"],
    },
    KeywordRule {
        result: PainTag::Immunity,
        keywords: &["иммунитет", "болею", "болеть", "простуд", "простыва", "вирус"],
    },
    KeywordRule {
        result: PainTag::Stress,
        keywords: &["стресс", "нерв", "тревож", "депресс", "выгоран", "раздраж"],
    },
];

/// price > trust > time > delay
pub const OBJECTION_RULES: &[KeywordRule<ObjectionType>] = &[
    KeywordRule {
        result: ObjectionType::Price,
        keywords: &["дорого", "дороговато", "нет денег", "не по карману", "дешевле"],
    },
    KeywordRule {
        result: ObjectionType::Trust,
        keywords: &["не верю", "развод", "обман", "сомнева", "не уверен", "пирамид"],
    },
    KeywordRule {
        result: ObjectionType::Time,
        keywords: &["нет времени", "некогда", "занят"],
    },
    KeywordRule {
        result: ObjectionType::Delay,
        keywords: &["подумаю", "потом", "позже", "не сейчас", "посоветуюсь"],
    },
];

/// Gratitude or interest: trust +1
pub const GRATITUDE_WORDS: &[&str] = &[
    "спасибо", "благодар", "интересно", "круто", "здорово", "класс", "супер", "понравил", "хочу",
];

/// Distrust: trust -1
pub const DISTRUST_WORDS: &[&str] = &[
    "не верю", "развод", "обман", "врете", "врёте", "лохотрон", "сомнева",
];

pub fn classify_intent(text: &str) -> Intent {
    first_match(INTENT_RULES, text).unwrap_or(Intent::Curious)
}

pub fn detect_pains(text: &str) -> Vec<PainTag> {
    all_matches(PAIN_RULES, text)
}

/// Objection presence is any objection keyword; the type is the first rule hit.
pub fn detect_objection(text: &str) -> Option<ObjectionType> {
    first_match(OBJECTION_RULES, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_priority() {
        assert_eq!(classify_intent("это пирамида? хочу заработать"), Intent::Skeptic);
        assert_eq!(classify_intent("интересен доход и продукт"), Intent::Business);
        assert_eq!(classify_intent("хочу купить витамины"), Intent::Product);
        assert_eq!(classify_intent("привет"), Intent::Curious);
        assert_eq!(classify_intent(""), Intent::Curious);
    }

    #[test]
    fn test_multiple_pains_in_table_order() {
        let pains = detect_pains("постоянно устала, плохо сплю и хочу похудеть");
        assert_eq!(pains, vec![PainTag::Weight, PainTag::Energy, PainTag::Sleep]);
        assert!(detect_pains("как дела?").is_empty());
    }

    #[test]
    fn test_objection_first_match() {
        assert_eq!(detect_objection("дорого"), Some(ObjectionType::Price));
        // price outranks delay
        assert_eq!(
            detect_objection("дороговато, подумаю"),
            Some(ObjectionType::Price)
        );
        assert_eq!(detect_objection("не верю я в это"), Some(ObjectionType::Trust));
        assert_eq!(detect_objection("совсем некогда"), Some(ObjectionType::Time));
        assert_eq!(detect_objection("напишу позже"), Some(ObjectionType::Delay));
        assert_eq!(detect_objection("расскажите подробнее"), None);
    }

    #[test]
    fn test_rule_helpers() {
        assert!(contains_any("очень круто", GRATITUDE_WORDS));
        assert!(!contains_any("нейтрально", DISTRUST_WORDS));
        assert_eq!(first_match::<Intent>(&[], "что угодно"), None);
    }
}
