use std::collections::HashMap;

use tracing::debug;

use crate::errors::ParserError;
use crate::model::{ColumnLayout, ColumnRole, ResolvedColumn};

/// Canonical form of a raw header: trimmed, lower-cased, spaces replaced by `_`.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Normalizes every header, rejecting two headers that collapse onto the same label.
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, ParserError> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(raw.len());
    let mut labels = Vec::with_capacity(raw.len());

    for (idx, header) in raw.iter().enumerate() {
        let label = normalize_label(header.as_ref());
        if let Some(&first) = seen.get(&label) {
            return Err(ParserError::DuplicateColumn {
                label,
                first,
                second: idx,
            });
        }
        seen.insert(label.clone(), idx);
        labels.push(label);
    }

    Ok(labels)
}

/// Matches `token`, `token_(unit)` or `token(unit)` against the role tokens.
pub(crate) fn match_role(label: &str) -> Option<(ColumnRole, Option<String>)> {
    for role in ColumnRole::ALL {
        for token in role.tokens() {
            let Some(rest) = label.strip_prefix(token) else {
                continue;
            };
            if rest.is_empty() {
                return Some((role, None));
            }

            let rest = rest.strip_prefix('_').unwrap_or(rest);
            if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                let unit = inner.trim_matches('_');
                let unit = (!unit.is_empty()).then(|| unit.to_string());
                return Some((role, unit));
            }
        }
    }
    None
}

/// Locates the year and money columns among normalized labels.
pub fn resolve_columns(labels: &[String]) -> Result<ColumnLayout, ParserError> {
    let mut found: HashMap<ColumnRole, ResolvedColumn> = HashMap::new();

    for (index, label) in labels.iter().enumerate() {
        let Some((role, unit)) = match_role(label) else {
            debug!(column = %label, "ignoring unrecognized column");
            continue;
        };

        if let Some(existing) = found.get(&role) {
            return Err(ParserError::AmbiguousColumn {
                role,
                first: existing.label.clone(),
                second: label.clone(),
            });
        }

        found.insert(
            role,
            ResolvedColumn {
                role,
                index,
                label: label.clone(),
                unit,
            },
        );
    }

    let mut take = |role: ColumnRole| found.remove(&role).ok_or(ParserError::MissingColumn(role));

    Ok(ColumnLayout {
        year: take(ColumnRole::Year)?,
        revenue: take(ColumnRole::Revenue)?,
        expenses: take(ColumnRole::Expenses)?,
        profit: take(ColumnRole::Profit)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_whitespace_and_case() {
        assert_eq!(normalize_label("  Revenue (Million USD) "), "revenue_(million_usd)");
        assert_eq!(normalize_label("Year"), "year");
        assert_eq!(normalize_label("Net  Profit"), "net__profit");
    }

    #[test]
    fn rejects_headers_that_collapse() {
        let err = normalize_headers(&["Year", " year "]).unwrap_err();
        match err {
            ParserError::DuplicateColumn {
                label,
                first,
                second,
            } => {
                assert_eq!(label, "year");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn matches_roles_with_and_without_units() {
        assert_eq!(
            match_role("revenue_(million_usd)"),
            Some((ColumnRole::Revenue, Some("million_usd".to_string())))
        );
        assert_eq!(
            match_role("expense(eur)"),
            Some((ColumnRole::Expenses, Some("eur".to_string())))
        );
        assert_eq!(match_role("profit"), Some((ColumnRole::Profit, None)));
        assert_eq!(match_role("revenue_growth"), None);
        assert_eq!(match_role("region"), None);
    }

    #[test]
    fn resolve_reports_missing_role() {
        let labels = vec!["year".to_string(), "revenue".to_string(), "profit".to_string()];
        let err = resolve_columns(&labels).unwrap_err();
        assert!(matches!(err, ParserError::MissingColumn(ColumnRole::Expenses)));
    }

    #[test]
    fn resolve_rejects_two_revenue_columns() {
        let labels = vec![
            "year".to_string(),
            "revenue".to_string(),
            "revenue_(usd)".to_string(),
            "expenses".to_string(),
            "profit".to_string(),
        ];
        let err = resolve_columns(&labels).unwrap_err();
        assert!(matches!(
            err,
            ParserError::AmbiguousColumn {
                role: ColumnRole::Revenue,
                ..
            }
        ));
    }
}
