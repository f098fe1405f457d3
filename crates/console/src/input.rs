//! Operator input parsing
//!
//! Id lists arrive as comma-separated text. Tokens are trimmed and empty ones
//! skipped; tokens that are not all digits are reported and skipped rather
//! than failing the whole list.

use adops_domain::{AdOpsError, Result};

/// Outcome of parsing a comma-separated id list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIds {
    pub ids: Vec<u64>,
    pub rejected: Vec<String>,
}

impl ParsedIds {
    /// The accepted ids, or `Validation` when none survived.
    pub fn require_non_empty(self, label: &str) -> Result<Vec<u64>> {
        if self.ids.is_empty() {
            return Err(AdOpsError::Validation(format!("no valid {label} ids were provided")));
        }
        Ok(self.ids)
    }
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Split `raw` on commas into numeric ids.
pub fn parse_id_list(raw: &str) -> ParsedIds {
    let mut parsed = ParsedIds::default();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<u64>() {
            Ok(id) if is_digits(token) => parsed.ids.push(id),
            _ => parsed.rejected.push(token.to_string()),
        }
    }
    parsed
}

/// A single numeric id such as an advertiser or pixel id.
pub fn parse_id(label: &str, raw: &str) -> Result<u64> {
    let token = raw.trim();
    if !is_digits(token) {
        return Err(AdOpsError::Validation(format!("{label} must be numeric, got {raw:?}")));
    }
    token
        .parse::<u64>()
        .map_err(|e| AdOpsError::Validation(format!("{label} is out of range: {e}")))
}

/// Comma-separated names, trimmed, empties dropped.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_skips_blanks_and_reports_non_digits() {
        let parsed = parse_id_list(" 111, ,222,abc, 33x ,+4,");
        assert_eq!(parsed.ids, vec![111, 222]);
        assert_eq!(parsed.rejected, vec!["abc", "33x", "+4"]);
    }

    #[test]
    fn empty_id_list_fails_validation() {
        let err = parse_id_list(" , x").require_non_empty("line item").unwrap_err();
        assert!(matches!(err, AdOpsError::Validation(ref m) if m.contains("line item")));
    }

    #[test]
    fn single_id_must_be_digits() {
        assert_eq!(parse_id("advertiser", " 42 ").unwrap(), 42);
        assert!(parse_id("advertiser", "-42").is_err());
        assert!(parse_id("pixel", "").is_err());
        assert!(parse_id("pixel", "99999999999999999999999").is_err());
    }

    #[test]
    fn name_list_is_trimmed() {
        assert_eq!(parse_name_list(" Lyon ,, Paris"), vec!["Lyon", "Paris"]);
    }
}
