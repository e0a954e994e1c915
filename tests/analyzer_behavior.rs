//! Behavior-driven tests for the end-to-end analysis facade.
//!
//! These tests verify HOW free-text queries flow through resolution,
//! caching, classification, and rating into one consistent verdict.

use boardpulse_tests::{
    analyzer_over, bar, broken_day, date, event, one_word_day, sealed_day, unsealed_day,
    AnalysisError, Arc, Grade, ScriptedSource, SealClassification, SealEventKind,
    TradingDaySnapshot,
};

// =============================================================================
// Analyzer: Full Verdicts
// =============================================================================

#[tokio::test]
async fn when_user_queries_by_name_system_resolves_and_analyzes() {
    // Given: a three-day run for 贵州茅台 ending on a one-word board
    let source = Arc::new(
        ScriptedSource::new()
            .trading(unsealed_day("20250109"))
            .trading(sealed_day("20250110"))
            .closed("20250111")
            .closed("20250112")
            .trading(sealed_day("20250113"))
            .trading(one_word_day("20250114")),
    );
    let analyzer = analyzer_over(source);

    // When: the user asks by company name
    let verdict = analyzer
        .analyze("贵州茅台", date("20250114"))
        .await
        .expect("analysis should compute");

    // Then: the name resolved to the code and the whole picture lines up
    assert_eq!(verdict.symbol.as_str(), "600519");
    assert_eq!(verdict.streak.streak_days, 3);
    assert!(!verdict.streak.truncated);
    assert_eq!(verdict.classification, SealClassification::OneWord);
    assert_eq!(verdict.rating.grade, Grade::APlusPlus);
    assert_eq!(verdict.break_count, 0);
}

#[tokio::test]
async fn when_seal_broke_without_reseal_system_grades_d_minus() {
    // Given: a day in the broken pool whose seal never re-formed
    let source = Arc::new(ScriptedSource::new().trading(broken_day("20250114")));
    let analyzer = analyzer_over(source);

    // When: the day is analyzed
    let verdict = analyzer
        .analyze("600519", date("20250114"))
        .await
        .expect("analysis should compute");

    // Then: the failed seal dominates everything else
    assert_eq!(verdict.classification, SealClassification::BrokenUnsealed);
    assert_eq!(verdict.rating.grade, Grade::DMinus);
    assert_eq!(verdict.streak.streak_days, 0);
}

#[tokio::test]
async fn when_strong_pool_member_seals_cleanly_system_grades_a_plus() {
    // Given: a firm seal on a strong-pool member, no anomalies
    let snapshot = TradingDaySnapshot::new(
        date("20250114"),
        true,
        false,
        true,
        Some(11.0),
        Some(bar(10.2, 11.0, 10.1, 11.0)),
        vec![event("10:00", SealEventKind::Sealed)],
    );
    let analyzer = analyzer_over(Arc::new(ScriptedSource::new().trading(snapshot)));

    // When: the rating is requested directly
    let rating = analyzer
        .get_rating("600519", date("20250114"))
        .await
        .expect("rating should compute");

    // Then: pool membership lifts the grade above a plain seal
    assert_eq!(rating.grade, Grade::APlus);
}

#[tokio::test]
async fn when_big_sell_leaks_after_the_seal_system_downgrades() {
    // Given: a sealed day with a large sell order after the seal formed
    let snapshot = TradingDaySnapshot::new(
        date("20250114"),
        true,
        false,
        false,
        Some(11.0),
        Some(bar(10.2, 11.0, 10.1, 11.0)),
        vec![
            event("10:00", SealEventKind::Sealed),
            event("13:30", SealEventKind::BigSell),
        ],
    );
    let analyzer = analyzer_over(Arc::new(ScriptedSource::new().trading(snapshot)));

    // When: the rating is requested
    let rating = analyzer
        .get_rating("600519", date("20250114"))
        .await
        .expect("rating should compute");

    // Then: the leakage pulls an A-grade seal down to B-
    assert_eq!(rating.grade, Grade::BMinus);
}

// =============================================================================
// Analyzer: Symbol Resolution Failures
// =============================================================================

#[tokio::test]
async fn when_query_matches_two_listings_system_asks_for_disambiguation() {
    // Given: "平安" appears in both 平安银行 and 中国平安
    let analyzer = analyzer_over(Arc::new(ScriptedSource::new()));

    // When: the ambiguous name is analyzed
    let error = analyzer
        .analyze("平安", date("20250114"))
        .await
        .expect_err("ambiguity must surface");

    // Then: both candidates are handed back; neither is silently chosen
    match error {
        AnalysisError::AmbiguousSymbol { query, candidates } => {
            assert_eq!(query, "平安");
            assert_eq!(candidates.len(), 2);
            let codes: Vec<&str> = candidates.iter().map(|c| c.code.as_str()).collect();
            assert!(codes.contains(&"000001"));
            assert!(codes.contains(&"601318"));
        }
        other => panic!("expected AmbiguousSymbol, got {other:?}"),
    }
}

#[tokio::test]
async fn when_query_matches_nothing_system_reports_symbol_not_found() {
    let analyzer = analyzer_over(Arc::new(ScriptedSource::new()));

    let error = analyzer
        .get_streak("不存在的公司", date("20250114"))
        .await
        .expect_err("unknown name must fail");

    assert!(matches!(error, AnalysisError::SymbolNotFound { .. }));
}

#[tokio::test]
async fn when_query_is_a_bare_code_system_skips_the_directory() {
    // Given: a source with data but an analyzer whose directory does not
    // list the code
    let source = Arc::new(ScriptedSource::new().trading(sealed_day("20250114")));
    let analyzer = analyzer_over(source);

    // When: a code absent from the directory is analyzed
    let verdict = analyzer
        .analyze("300750", date("20250114"))
        .await
        .expect("code queries bypass the directory");

    // Then: the code is used as-is
    assert_eq!(verdict.symbol.as_str(), "300750");
}

// =============================================================================
// Analyzer: Caching and Consistency
// =============================================================================

#[tokio::test]
async fn when_the_same_day_is_analyzed_twice_system_fetches_it_once() {
    // Given: a two-day history
    let source = Arc::new(
        ScriptedSource::new()
            .trading(unsealed_day("20250113"))
            .trading(sealed_day("20250114")),
    );
    let analyzer = analyzer_over(source.clone());

    // When: the same question is asked twice
    let first = analyzer
        .analyze("600519", date("20250114"))
        .await
        .expect("analysis should compute");
    let calls_after_first = source.call_count();
    let second = analyzer
        .analyze("600519", date("20250114"))
        .await
        .expect("analysis should compute");

    // Then: the second pass is served entirely from cache
    assert_eq!(source.call_count(), calls_after_first);
    assert_eq!(first, second);
}

#[tokio::test]
async fn when_anchor_day_is_unavailable_system_fails_every_operation_the_same_way() {
    // Given: an as-of day that cannot be fetched
    let source = Arc::new(ScriptedSource::new().failing("20250114"));
    let analyzer = analyzer_over(source);
    let as_of = date("20250114");

    // When/Then: streak, classification, and rating all surface the
    // same explicit failure
    assert!(matches!(
        analyzer.get_streak("600519", as_of).await,
        Err(AnalysisError::DataUnavailable { .. })
    ));
    assert!(matches!(
        analyzer.get_seal_classification("600519", as_of).await,
        Err(AnalysisError::DataUnavailable { .. })
    ));
    assert!(matches!(
        analyzer.get_rating("600519", as_of).await,
        Err(AnalysisError::DataUnavailable { .. })
    ));
}
