//! Free-text symbol resolution.
//!
//! Maps user input (a code, an exact name, or a name fragment) to a
//! canonical [`SymbolCode`]. Ambiguity is surfaced, never swallowed: a
//! query matching two listings is the caller's decision to make.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::SymbolCode;
use crate::error::AnalysisError;

/// One resolver candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub code: SymbolCode,
    pub display_name: String,
}

/// Name-to-code lookup contract.
pub trait SymbolResolver: Send + Sync {
    /// All candidates for a free-text query, best matches first.
    fn resolve(&self, query: &str) -> Vec<SymbolMatch>;
}

/// In-memory directory of (code, name) listings.
///
/// Exact name matches rank ahead of substring matches; duplicates are
/// collapsed; results are bounded by `max_results`.
pub struct DirectoryResolver {
    names: Vec<(SymbolCode, String)>,
    by_name: HashMap<String, Vec<usize>>,
    max_results: usize,
}

impl DirectoryResolver {
    pub fn new(entries: Vec<(SymbolCode, String)>) -> Self {
        Self::with_max_results(entries, 10)
    }

    pub fn with_max_results(entries: Vec<(SymbolCode, String)>, max_results: usize) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, (_, name)) in entries.iter().enumerate() {
            by_name.entry(name.clone()).or_default().push(index);
        }
        Self {
            names: entries,
            by_name,
            max_results,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SymbolResolver for DirectoryResolver {
    fn resolve(&self, query: &str) -> Vec<SymbolMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SymbolMatch> = Vec::new();
        let mut push = |code: &SymbolCode, name: &str, results: &mut Vec<SymbolMatch>| {
            let candidate = SymbolMatch {
                code: code.clone(),
                display_name: name.to_owned(),
            };
            if !results.contains(&candidate) {
                results.push(candidate);
            }
        };

        if let Some(indices) = self.by_name.get(query) {
            for &index in indices {
                let (code, name) = &self.names[index];
                push(code, name, &mut results);
            }
        }

        if results.len() < self.max_results {
            for (code, name) in &self.names {
                if name.contains(query) {
                    push(code, name, &mut results);
                }
                if results.len() >= self.max_results {
                    break;
                }
            }
        }

        results.truncate(self.max_results);
        results
    }
}

/// Resolve free text to exactly one code.
///
/// Input already shaped like a code bypasses the directory entirely.
///
/// # Errors
///
/// `SymbolNotFound` for zero candidates, `AmbiguousSymbol` (carrying the
/// candidates) for more than one; the first match is never silently
/// chosen.
pub fn resolve_query(
    resolver: &dyn SymbolResolver,
    query: &str,
) -> Result<SymbolCode, AnalysisError> {
    if SymbolCode::looks_like_code(query) {
        return Ok(SymbolCode::parse(query)?);
    }

    let mut candidates = resolver.resolve(query);
    match candidates.len() {
        0 => Err(AnalysisError::SymbolNotFound {
            query: query.to_owned(),
        }),
        1 => Ok(candidates.remove(0).code),
        _ => Err(AnalysisError::AmbiguousSymbol {
            query: query.to_owned(),
            candidates,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> SymbolCode {
        SymbolCode::parse(raw).expect("code")
    }

    fn directory() -> DirectoryResolver {
        DirectoryResolver::new(vec![
            (code("000001"), "平安银行".to_owned()),
            (code("601318"), "中国平安".to_owned()),
            (code("600519"), "贵州茅台".to_owned()),
            (code("600036"), "招商银行".to_owned()),
        ])
    }

    #[test]
    fn exact_name_match_resolves() {
        let resolver = directory();
        let resolved = resolve_query(&resolver, "贵州茅台").expect("must resolve");
        assert_eq!(resolved.as_str(), "600519");
    }

    #[test]
    fn substring_query_with_two_hits_is_ambiguous() {
        let resolver = directory();
        let err = resolve_query(&resolver, "平安").expect_err("must be ambiguous");
        match err {
            AnalysisError::AmbiguousSymbol { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected AmbiguousSymbol, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_is_not_found() {
        let resolver = directory();
        let err = resolve_query(&resolver, "未知股票").expect_err("must fail");
        assert!(matches!(err, AnalysisError::SymbolNotFound { .. }));
    }

    #[test]
    fn code_shaped_input_bypasses_the_directory() {
        let resolver = DirectoryResolver::new(vec![]);
        let resolved = resolve_query(&resolver, "519").expect("must resolve");
        assert_eq!(resolved.as_str(), "000519");
    }

    #[test]
    fn exact_match_ranks_ahead_of_substring() {
        let resolver = DirectoryResolver::new(vec![
            (code("000002"), "万科A".to_owned()),
            (code("600000"), "浦发银行".to_owned()),
            (code("000011"), "银行".to_owned()),
        ]);
        let results = resolver.resolve("银行");
        assert_eq!(results[0].code.as_str(), "000011");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn results_are_bounded() {
        let entries = (0..20)
            .map(|i| (code(&format!("{i:06}")), format!("测试{i}银行")))
            .collect();
        let resolver = DirectoryResolver::with_max_results(entries, 5);
        assert_eq!(resolver.resolve("银行").len(), 5);
    }
}
