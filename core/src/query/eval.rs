//! In-memory execution of a [`ListQuery`] over JSON documents.
//!
//! The mock repositories serialize their entities and run the query plan
//! here, so services exercise the exact same filter, sort, projection and
//! windowing semantics in tests as against the real store.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use super::{Comparison, Condition, ListQuery, Page, Scalar, SortDirection, SortKey};

/// Runs the full plan over a document set: filter, count, sort, window,
/// project
pub fn apply(query: &ListQuery, documents: Vec<Value>) -> Page<Value> {
    let mut matched: Vec<Value> = documents
        .into_iter()
        .filter(|doc| matches(doc, &query.conditions))
        .collect();

    let total = matched.len() as u64;

    sort_documents(&mut matched, &query.sort);

    let start = query.window.start_index() as usize;
    let end = (query.window.end_index() as usize).min(matched.len());
    let windowed: Vec<Value> = if start >= matched.len() {
        Vec::new()
    } else {
        matched[start..end].to_vec()
    };

    let items = match &query.select {
        Some(fields) => windowed.iter().map(|doc| project(doc, fields)).collect(),
        None => windowed,
    };

    Page::new(items, total)
}

/// Whether a document satisfies every condition
pub fn matches(document: &Value, conditions: &[Condition]) -> bool {
    conditions.iter().all(|condition| {
        match document.get(&condition.field) {
            Some(value) => satisfies(value, &condition.comparison),
            None => false,
        }
    })
}

fn satisfies(value: &Value, comparison: &Comparison) -> bool {
    // Equality and membership against an array field match any element
    if let Value::Array(items) = value {
        if matches!(comparison, Comparison::Eq(_) | Comparison::In(_)) {
            return items.iter().any(|item| satisfies(item, comparison));
        }
    }

    match comparison {
        Comparison::Eq(operand) => scalar_eq(value, operand),
        Comparison::In(operands) => operands.iter().any(|op| scalar_eq(value, op)),
        Comparison::Gt(operand) => {
            matches!(scalar_cmp(value, operand), Some(Ordering::Greater))
        }
        Comparison::Gte(operand) => matches!(
            scalar_cmp(value, operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Comparison::Lt(operand) => matches!(scalar_cmp(value, operand), Some(Ordering::Less)),
        Comparison::Lte(operand) => matches!(
            scalar_cmp(value, operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
    }
}

fn scalar_eq(value: &Value, operand: &Scalar) -> bool {
    match (value, operand) {
        (Value::Number(n), Scalar::Number(m)) => n.as_f64() == Some(*m),
        (Value::Bool(a), Scalar::Bool(b)) => a == b,
        (Value::String(s), Scalar::Text(t)) => s == t,
        // Uuid and similar fields serialize as strings; a numeric-looking
        // query operand still has to match them textually
        (Value::String(s), Scalar::Number(m)) => s.parse::<f64>() == Ok(*m),
        _ => false,
    }
}

fn scalar_cmp(value: &Value, operand: &Scalar) -> Option<Ordering> {
    match (value, operand) {
        (Value::Number(n), Scalar::Number(m)) => n.as_f64()?.partial_cmp(m),
        (Value::String(s), Scalar::Text(t)) => Some(s.as_str().cmp(t.as_str())),
        (Value::String(s), Scalar::Number(m)) => s.parse::<f64>().ok()?.partial_cmp(m),
        _ => None,
    }
}

/// Sorts documents by the given keys, left to right
pub fn sort_documents(documents: &mut [Value], keys: &[SortKey]) {
    documents.sort_by(|a, b| {
        for key in keys {
            let ordering = json_cmp(a.get(&key.field), b.get(&key.field));
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn json_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Projects a document to the selected fields; `id` always survives
pub fn project(document: &Value, fields: &[String]) -> Value {
    let mut out = Map::new();
    if let Some(object) = document.as_object() {
        if let Some(id) = object.get("id") {
            out.insert("id".to_string(), id.clone());
        }
        for field in fields {
            if let Some(value) = object.get(field) {
                out.insert(field.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_list_query;
    use serde_json::json;
    use std::collections::HashMap;

    fn jobs() -> Vec<Value> {
        vec![
            json!({"id": "1", "title": "Backend", "salary": 9000, "created_at": "2026-01-01T00:00:00Z"}),
            json!({"id": "2", "title": "Frontend", "salary": 12000, "created_at": "2026-01-02T00:00:00Z"}),
            json!({"id": "3", "title": "Data", "salary": 15000, "created_at": "2026-01-03T00:00:00Z"}),
        ]
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        parse_list_query(&params).unwrap()
    }

    #[test]
    fn test_gte_filter() {
        let page = apply(&query(&[("salary[gte]", "12000")]), jobs());
        assert_eq!(page.total, 2);
        let ids: Vec<&str> = page.items.iter().map(|j| j["id"].as_str().unwrap()).collect();
        assert!(ids.contains(&"2") && ids.contains(&"3"));
    }

    #[test]
    fn test_in_filter() {
        let page = apply(&query(&[("title[in]", "Backend,Data")]), jobs());
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let page = apply(&query(&[]), jobs());
        assert_eq!(page.items[0]["id"], "3");
        assert_eq!(page.items[2]["id"], "1");
    }

    #[test]
    fn test_ascending_sort() {
        let page = apply(&query(&[("sort", "salary")]), jobs());
        assert_eq!(page.items[0]["id"], "1");
    }

    #[test]
    fn test_window_slices_after_filter() {
        let page = apply(&query(&[("page", "2"), ("limit", "2"), ("sort", "salary")]), jobs());
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["id"], "3");
    }

    #[test]
    fn test_full_pipeline_windows_and_links_over_25_records() {
        use wl_shared::{PageLink, PaginationLinks};

        // Salaries 1000..=25000, so descending order is 25, 24, ... 1
        let records: Vec<Value> = (1..=25)
            .map(|n| json!({"id": n.to_string(), "salary": n * 1000}))
            .collect();

        let query = query(&[("sort", "-salary"), ("page", "2"), ("limit", "10")]);
        let page = apply(&query, records);

        // Page 2 of 10 holds records 11-20: salaries 15000 down to 6000
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0]["salary"], 15000);
        assert_eq!(page.items[9]["salary"], 6000);

        let links = PaginationLinks::for_window(query.window, page.total);
        assert_eq!(links.prev, Some(PageLink { page: 1, limit: 10 }));
        assert_eq!(links.next, Some(PageLink { page: 3, limit: 10 }));
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let page = apply(&query(&[("page", "5")]), jobs());
        assert_eq!(page.total, 3);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_projection_keeps_id() {
        let page = apply(&query(&[("select", "title")]), jobs());
        let first = page.items[0].as_object().unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.contains_key("id"));
        assert!(first.contains_key("title"));
    }

    #[test]
    fn test_array_field_equality_matches_elements() {
        let docs = vec![
            json!({"id": "1", "industries": ["Tech", "Retail"]}),
            json!({"id": "2", "industries": ["Marketing"]}),
        ];
        let page = apply(&query(&[("industries", "Tech")]), docs);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0]["id"], "1");
    }

    #[test]
    fn test_missing_field_never_matches() {
        let page = apply(&query(&[("unknown", "x")]), jobs());
        assert_eq!(page.total, 0);
    }
}
