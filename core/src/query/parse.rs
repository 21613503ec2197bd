//! Query-string translation.

use std::collections::HashMap;

use wl_shared::PageWindow;

use crate::errors::{DomainError, DomainResult};

use super::{Comparison, Condition, ListQuery, Scalar, SortDirection, SortKey};

/// Keys with fixed meanings that never become filter conditions
pub const RESERVED_KEYS: &[&str] = &["select", "sort", "page", "limit"];

/// Translates raw query parameters into a [`ListQuery`].
///
/// Plain keys become equality filters; `field[op]` keys apply the bracket
/// operator (`gt`, `gte`, `lt`, `lte`, `in`). The `in` operand is split on
/// commas. An unrecognized operator is a validation error rather than a
/// silently ignored filter.
pub fn parse_list_query(params: &HashMap<String, String>) -> DomainResult<ListQuery> {
    let mut conditions = Vec::new();

    for (key, raw) in params {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }

        let (field, op) = split_bracket(key)?;
        let comparison = match op {
            None => Comparison::Eq(Scalar::infer(raw)),
            Some("gt") => Comparison::Gt(Scalar::infer(raw)),
            Some("gte") => Comparison::Gte(Scalar::infer(raw)),
            Some("lt") => Comparison::Lt(Scalar::infer(raw)),
            Some("lte") => Comparison::Lte(Scalar::infer(raw)),
            Some("in") => Comparison::In(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Scalar::infer)
                    .collect(),
            ),
            Some(other) => {
                return Err(DomainError::validation(
                    field,
                    format!("Unsupported query operator '{other}'"),
                ))
            }
        };

        conditions.push(Condition {
            field: field.to_string(),
            comparison,
        });
    }

    // Deterministic plan regardless of parameter iteration order
    conditions.sort_by(|a, b| a.field.cmp(&b.field));

    let select = params.get("select").map(|raw| split_fields(raw));

    let sort = match params.get("sort") {
        Some(raw) => parse_sort(raw),
        None => vec![SortKey::desc("created_at")],
    };

    let page = parse_or_default(params.get("page"), wl_shared::types::pagination::DEFAULT_PAGE);
    let limit = parse_or_default(params.get("limit"), wl_shared::types::pagination::DEFAULT_LIMIT);

    Ok(ListQuery {
        conditions,
        select,
        sort,
        window: PageWindow::new(page, limit),
    })
}

/// Splits `field[op]` into its parts; plain keys return no operator
fn split_bracket(key: &str) -> DomainResult<(&str, Option<&str>)> {
    match key.find('[') {
        None => Ok((key, None)),
        Some(open) => {
            let field = &key[..open];
            let rest = &key[open + 1..];
            match rest.strip_suffix(']') {
                Some(op) if !field.is_empty() && !op.is_empty() => Ok((field, Some(op))),
                _ => Err(DomainError::validation(
                    key,
                    format!("Malformed query parameter '{key}'"),
                )),
            }
        }
    }
}

fn split_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_sort(raw: &str) -> Vec<SortKey> {
    let keys: Vec<SortKey> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|field| match field.strip_prefix('-') {
            Some(name) => SortKey {
                field: name.to_string(),
                direction: SortDirection::Desc,
            },
            None => SortKey {
                field: field.to_string(),
                direction: SortDirection::Asc,
            },
        })
        .collect();

    if keys.is_empty() {
        vec![SortKey::desc("created_at")]
    } else {
        keys
    }
}

fn parse_or_default(raw: Option<&String>, default: u64) -> u64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_key_is_equality() {
        let query = parse_list_query(&params(&[("remote_work", "true")])).unwrap();
        assert_eq!(
            query.conditions,
            vec![Condition::eq("remote_work", Scalar::Bool(true))]
        );
    }

    #[test]
    fn test_bracket_operators() {
        let query = parse_list_query(&params(&[("salary[gte]", "10000")])).unwrap();
        assert_eq!(
            query.conditions[0].comparison,
            Comparison::Gte(Scalar::Number(10000.0))
        );

        let query = parse_list_query(&params(&[("rating[lt]", "5")])).unwrap();
        assert_eq!(
            query.conditions[0].comparison,
            Comparison::Lt(Scalar::Number(5.0))
        );
    }

    #[test]
    fn test_in_operator_splits_on_commas() {
        let query =
            parse_list_query(&params(&[("industries[in]", "Tech,Marketing")])).unwrap();
        assert_eq!(
            query.conditions[0].comparison,
            Comparison::In(vec![
                Scalar::Text("Tech".to_string()),
                Scalar::Text("Marketing".to_string()),
            ])
        );
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = parse_list_query(&params(&[("salary[regex]", "x")])).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_malformed_bracket_rejected() {
        assert!(parse_list_query(&params(&[("salary[gte", "1")])).is_err());
        assert!(parse_list_query(&params(&[("[gte]", "1")])).is_err());
    }

    #[test]
    fn test_reserved_keys_never_filter() {
        let query = parse_list_query(&params(&[
            ("select", "name,salary"),
            ("sort", "salary"),
            ("page", "2"),
            ("limit", "10"),
        ]))
        .unwrap();

        assert!(query.conditions.is_empty());
        assert_eq!(
            query.select,
            Some(vec!["name".to_string(), "salary".to_string()])
        );
        assert_eq!(query.sort, vec![SortKey::asc("salary")]);
        assert_eq!(query.window, PageWindow::new(2, 10));
    }

    #[test]
    fn test_sort_prefix_minus_is_descending() {
        let query = parse_list_query(&params(&[("sort", "-salary,name")])).unwrap();
        assert_eq!(
            query.sort,
            vec![SortKey::desc("salary"), SortKey::asc("name")]
        );
    }

    #[test]
    fn test_defaults() {
        let query = parse_list_query(&HashMap::new()).unwrap();
        assert_eq!(query.window, PageWindow::default());
        assert_eq!(query.sort, vec![SortKey::desc("created_at")]);
        assert!(query.select.is_none());
    }

    #[test]
    fn test_unparseable_page_falls_back_to_default() {
        let query = parse_list_query(&params(&[("page", "abc")])).unwrap();
        assert_eq!(query.window.page, 1);
    }
}
