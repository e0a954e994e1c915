//! Exhaustive verification of the rating decision table.
//!
//! The signal tuple has six booleans, so all 64 combinations are
//! enumerated against an independent statement of the precedence rules.

use boardpulse_core::{rate, Grade, RatingSignals};

fn signals(bits: u8) -> RatingSignals {
    RatingSignals {
        is_limit: bits & 0b00_0001 != 0,
        is_broken: bits & 0b00_0010 != 0,
        has_big_sell: bits & 0b00_0100 != 0,
        is_resealed: bits & 0b00_1000 != 0,
        is_strong_pool: bits & 0b01_0000 != 0,
        is_one_word: bits & 0b10_0000 != 0,
    }
}

/// The precedence rules restated as a plain chain, independent of the
/// production table's representation.
fn expected_grade(s: RatingSignals) -> Grade {
    if s.is_broken && !s.is_resealed {
        Grade::DMinus
    } else if s.is_one_word && !s.has_big_sell && !s.is_broken {
        Grade::APlusPlus
    } else if s.is_one_word {
        Grade::APlus
    } else if s.is_limit && !s.is_broken && !s.has_big_sell && s.is_strong_pool {
        Grade::APlus
    } else if s.is_limit && !s.is_broken && !s.has_big_sell {
        Grade::A
    } else if s.is_limit && s.is_resealed && !s.has_big_sell && s.is_strong_pool {
        Grade::AMinus
    } else if s.is_limit && s.is_resealed && !s.has_big_sell {
        Grade::BPlus
    } else if s.is_limit && s.is_strong_pool {
        Grade::B
    } else if s.is_limit {
        Grade::BMinus
    } else if s.is_strong_pool && !s.is_broken {
        Grade::CPlus
    } else if s.is_strong_pool {
        Grade::C
    } else if s.has_big_sell {
        Grade::E
    } else {
        Grade::F
    }
}

#[test]
fn when_all_64_signal_tuples_are_rated_system_matches_the_precedence_rules() {
    for bits in 0u8..64 {
        let input = signals(bits);
        let verdict = rate(input);
        assert_eq!(
            verdict.grade,
            expected_grade(input),
            "tuple {bits:06b} ({input:?})"
        );
    }
}

#[test]
fn when_the_same_tuple_is_rated_twice_system_returns_identical_verdicts() {
    for bits in 0u8..64 {
        let input = signals(bits);
        let first = rate(input);
        let second = rate(input);
        assert_eq!(first, second, "tuple {bits:06b}");
    }
}

#[test]
fn when_a_break_never_reseals_system_always_grades_d_minus() {
    // The unresealed break outranks every positive signal, including a
    // one-word open and strong-pool membership.
    for bits in 0u8..64 {
        let input = signals(bits);
        if input.is_broken && !input.is_resealed {
            assert_eq!(rate(input).grade, Grade::DMinus, "tuple {bits:06b}");
        }
    }
}

#[test]
fn when_verdicts_are_produced_system_attaches_nonempty_advisory_text() {
    for bits in 0u8..64 {
        let verdict = rate(signals(bits));
        assert!(!verdict.description.is_empty(), "tuple {bits:06b}");
        assert!(!verdict.advice.is_empty(), "tuple {bits:06b}");
    }
}

#[test]
fn when_flagship_patterns_are_rated_system_assigns_the_expected_grades() {
    // Clean one-word board.
    let one_word = RatingSignals {
        is_limit: true,
        is_one_word: true,
        ..RatingSignals::default()
    };
    assert_eq!(rate(one_word).grade, Grade::APlusPlus);

    // Firm ordinary seal.
    let firm = RatingSignals {
        is_limit: true,
        ..RatingSignals::default()
    };
    assert_eq!(rate(firm).grade, Grade::A);

    // Broken and never resealed.
    let failed = RatingSignals {
        is_broken: true,
        ..RatingSignals::default()
    };
    assert_eq!(rate(failed).grade, Grade::DMinus);

    // Nothing happened at all.
    assert_eq!(rate(RatingSignals::default()).grade, Grade::F);
}
