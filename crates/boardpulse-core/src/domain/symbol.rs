use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const CODE_LEN: usize = 6;

/// Canonical 6-digit A-share symbol code.
///
/// Upstream feeds are sloppy about the shape of a code: some carry an
/// exchange suffix (`600519.SH`), some drop leading zeros (`1` for
/// `000001`). Parsing normalizes all of those to the 6-digit form so a
/// code compares equal no matter which feed produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolCode(String);

impl SymbolCode {
    /// Parse and normalize a raw code to canonical 6-digit form.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbolCode);
        }

        // Strip an exchange suffix such as ".SH" / ".SZ".
        let bare = trimmed.split('.').next().unwrap_or(trimmed);

        if bare.chars().count() > CODE_LEN {
            return Err(ValidationError::SymbolCodeTooLong {
                value: input.to_owned(),
            });
        }

        for ch in bare.chars() {
            if !ch.is_ascii_digit() {
                return Err(ValidationError::SymbolCodeNotNumeric {
                    value: input.to_owned(),
                    ch,
                });
            }
        }

        Ok(Self(format!("{bare:0>width$}", width = CODE_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when free-text input is already shaped like a code and can
    /// bypass name resolution entirely.
    pub fn looks_like_code(input: &str) -> bool {
        let trimmed = input.trim();
        !trimmed.is_empty()
            && trimmed.chars().count() <= CODE_LEN
            && trimmed.chars().all(|ch| ch.is_ascii_digit())
    }
}

impl Display for SymbolCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SymbolCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for SymbolCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SymbolCode> for String {
    fn from(value: SymbolCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_codes_to_six_digits() {
        let parsed = SymbolCode::parse("1").expect("code should parse");
        assert_eq!(parsed.as_str(), "000001");
    }

    #[test]
    fn strips_exchange_suffix() {
        let parsed = SymbolCode::parse("600519.SH").expect("code should parse");
        assert_eq!(parsed.as_str(), "600519");
    }

    #[test]
    fn rejects_non_digit_input() {
        let err = SymbolCode::parse("PingAn").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolCodeNotNumeric { .. }));
    }

    #[test]
    fn rejects_overlong_codes() {
        let err = SymbolCode::parse("1234567").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolCodeTooLong { .. }));
    }

    #[test]
    fn detects_code_shaped_input() {
        assert!(SymbolCode::looks_like_code(" 600519 "));
        assert!(SymbolCode::looks_like_code("1"));
        assert!(!SymbolCode::looks_like_code("平安"));
        assert!(!SymbolCode::looks_like_code("600519.SH"));
    }
}
