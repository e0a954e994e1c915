//! Composite rating over the day's boolean signal tuple.
//!
//! One ordered decision table replaces the near-identical if/else chains
//! the rating and advice used to live in. Row order is the precedence
//! contract: the first row whose predicate holds wins, and the final row
//! matches everything, so the function is total over all 64 tuples.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Composite letter grade, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    APlusPlus,
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    DMinus,
    E,
    F,
}

impl Grade {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlusPlus => "A++",
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DMinus => "D-",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six boolean signals the rating is a pure function of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RatingSignals {
    /// Sealed at end of session.
    pub is_limit: bool,
    /// The seal broke at some point.
    pub is_broken: bool,
    /// A large sell order leaked through after the final seal.
    pub has_big_sell: bool,
    /// A break was followed by a reseal that held.
    pub is_resealed: bool,
    /// Member of the strong-stock pool.
    pub is_strong_pool: bool,
    /// One-word board: opened pinned at the cap.
    pub is_one_word: bool,
}

/// Final verdict: grade plus its fixed description and advisory text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingVerdict {
    pub grade: Grade,
    pub description: &'static str,
    pub advice: &'static str,
}

struct Rule {
    applies: fn(RatingSignals) -> bool,
    grade: Grade,
    description: &'static str,
    advice: &'static str,
}

/// Precedence table. Each row carries its advisory strings verbatim;
/// nothing downstream re-derives them.
const RULES: [Rule; 13] = [
    Rule {
        applies: |s| s.is_broken && !s.is_resealed,
        grade: Grade::DMinus,
        description: "broken seal never resealed, weak close",
        advice: "seal broke and never re-formed; weak tape, best avoided",
    },
    Rule {
        applies: |s| s.is_one_word && !s.has_big_sell && !s.is_broken,
        grade: Grade::APlusPlus,
        description: "one-word limit, no leakage",
        advice: "iron one-word seal; mind next-day open risk before chasing",
    },
    Rule {
        applies: |s| s.is_one_word,
        grade: Grade::APlus,
        description: "one-word limit but anomalies present, monitor",
        advice: "one-word board with anomalies on the tape; watch closely",
    },
    Rule {
        applies: |s| s.is_limit && !s.is_broken && !s.has_big_sell && s.is_strong_pool,
        grade: Grade::APlus,
        description: "firm seal, no leakage, strong-pool member",
        advice: "excellent seal quality; holding or a measured entry is reasonable",
    },
    Rule {
        applies: |s| s.is_limit && !s.is_broken && !s.has_big_sell,
        grade: Grade::A,
        description: "firm seal, no leakage",
        advice: "seal held firm; watch how the next session opens",
    },
    Rule {
        applies: |s| s.is_limit && s.is_resealed && !s.has_big_sell && s.is_strong_pool,
        grade: Grade::AMinus,
        description: "resealed after a break, no leakage, strong-pool member",
        advice: "reseal shows real absorption; cautious interest warranted",
    },
    Rule {
        applies: |s| s.is_limit && s.is_resealed && !s.has_big_sell,
        grade: Grade::BPlus,
        description: "resealed after a break, no leakage",
        advice: "reseal shows some absorption, but keep the risk in view",
    },
    Rule {
        applies: |s| s.is_limit && s.is_strong_pool,
        grade: Grade::B,
        description: "sealed strong-pool member, anomalies present",
        advice: "sealed and strong, but the anomalies call for caution",
    },
    Rule {
        applies: |s| s.is_limit,
        grade: Grade::BMinus,
        description: "sealed, anomalies need watching",
        advice: "sealed, but stay alert to the tape before acting",
    },
    Rule {
        applies: |s| !s.is_limit && s.is_strong_pool && !s.is_broken,
        grade: Grade::CPlus,
        description: "not sealed, but a strong-pool member",
        advice: "not capped today; a pullback may offer an entry",
    },
    Rule {
        applies: |s| !s.is_limit && s.is_strong_pool,
        grade: Grade::C,
        description: "strong-pool member with break risk",
        advice: "strong stock, but the broken seal adds risk",
    },
    Rule {
        applies: |s| s.has_big_sell,
        grade: Grade::E,
        description: "large sell orders leaking through",
        advice: "leaked sell orders suggest distribution; best avoided",
    },
    Rule {
        applies: |_| true,
        grade: Grade::F,
        description: "no notable activity",
        advice: "nothing notable on the tape; keep observing",
    },
];

/// Map the signal tuple to its verdict.
///
/// Pure and deterministic: no clock, no randomness, no external state.
/// Identical inputs return byte-identical output.
pub fn rate(signals: RatingSignals) -> RatingVerdict {
    for rule in &RULES {
        if (rule.applies)(signals) {
            return RatingVerdict {
                grade: rule.grade,
                description: rule.description,
                advice: rule.advice,
            };
        }
    }
    // The final table row matches every tuple.
    unreachable!("rating decision table is exhaustive")
}
