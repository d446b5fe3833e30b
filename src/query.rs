use crate::pagination::{clamp_page, slice_bounds, total_pages, DEFAULT_PAGE_SIZE};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One field of a record as seen by the list pipeline. Derived fields (stock
/// status, priority, grade) surface here as text so filters on a derived label
/// recompute the classifier on every read.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Missing,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// String form used for substring search and exact filter comparison.
    /// Missing values read as empty, never as a wildcard.
    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
            Self::Flag(value) => value.to_string(),
            Self::Date(value) => value.to_string(),
            Self::Timestamp(value) => value.to_rfc3339(),
            Self::Missing => String::new(),
        }
    }

    fn matches_search(&self, needle_lower: &str) -> bool {
        self.display().to_lowercase().contains(needle_lower)
    }

    fn matches_filter(&self, expected: &str) -> bool {
        self.display() == expected
    }

    fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Missing, _) => Ordering::Less,
            (_, Self::Missing) => Ordering::Greater,
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Flag(left), Self::Flag(right)) => left.cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Timestamp(left), Self::Timestamp(right)) => left.cmp(right),
            (left, right) => left
                .display()
                .to_lowercase()
                .cmp(&right.display().to_lowercase()),
        }
    }
}

pub trait Queryable {
    fn field(&self, name: &str) -> FieldValue;
}

/// Which fields a screen exposes to the pipeline. Consolidating this per
/// screen keeps boundary behavior identical everywhere a list is rendered.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub searchable: &'static [&'static str],
    pub filterable: &'static [&'static str],
    pub sortable: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort_by: None,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub total_count: usize,
    pub total_pages: u32,
    /// The page actually served, after clamping. Callers must store this back
    /// so pagination controls agree with the data shown.
    pub current_page: u32,
}

fn filter_is_disabled(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("any")
}

/// The full pipeline: free-text search, exact field filters, stable sort,
/// then clamp and slice. Stage order matters because the totals must reflect
/// the post-filter, pre-pagination size.
pub fn apply<T: Queryable + Clone>(records: &[T], query: &ListQuery, spec: &ListSpec) -> ListPage<T> {
    let mut kept: Vec<&T> = Vec::with_capacity(records.len());

    let needle = query.search_term.trim().to_lowercase();
    for record in records {
        if !needle.is_empty() {
            let hit = spec
                .searchable
                .iter()
                .any(|field| record.field(field).matches_search(&needle));
            if !hit {
                continue;
            }
        }

        let filters_pass = query.filters.iter().all(|(field, expected)| {
            if filter_is_disabled(expected) || !spec.filterable.contains(&field.as_str()) {
                return true;
            }
            record.field(field).matches_filter(expected)
        });
        if filters_pass {
            kept.push(record);
        }
    }

    // An unknown sort field degrades to the incoming order rather than failing.
    if let Some(sort_by) = query.sort_by.as_deref() {
        if spec.sortable.contains(&sort_by) {
            kept.sort_by(|left, right| {
                let ordering = left.field(sort_by).compare(&right.field(sort_by));
                match query.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
    }

    let total_count = kept.len();
    let total_pages = total_pages(total_count, query.page_size);
    let current_page = clamp_page(query.page, total_pages);
    let (start, end) = slice_bounds(current_page, query.page_size, total_count);

    ListPage {
        rows: kept[start..end].iter().map(|record| (*record).clone()).collect(),
        total_count,
        total_pages,
        current_page,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, FieldValue, ListQuery, ListSpec, Queryable, SortOrder};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        department: &'static str,
        score: f64,
        seq: u32,
    }

    impl Queryable for Row {
        fn field(&self, name: &str) -> FieldValue {
            match name {
                "name" => FieldValue::text(self.name),
                "department" => FieldValue::text(self.department),
                "score" => FieldValue::Number(self.score),
                _ => FieldValue::Missing,
            }
        }
    }

    const SPEC: ListSpec = ListSpec {
        searchable: &["name", "department"],
        filterable: &["department"],
        sortable: &["name", "score"],
    };

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Stapler", department: "Admin", score: 4.0, seq: 0 },
            Row { name: "Notebook", department: "HR", score: 2.0, seq: 1 },
            Row { name: "Marker", department: "Admin", score: 4.0, seq: 2 },
            Row { name: "Envelope", department: "Finance", score: 1.0, seq: 3 },
            Row { name: "notepad", department: "HR", score: 3.0, seq: 4 },
        ]
    }

    fn names(page: &[Row]) -> Vec<&'static str> {
        page.iter().map(|row| row.name).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = ListQuery {
            search_term: "note".to_string(),
            ..ListQuery::default()
        };
        let page = apply(&rows(), &query, &SPEC);
        assert_eq!(names(&page.rows), vec!["Notebook", "notepad"]);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn whitespace_search_term_matches_everything() {
        let query = ListQuery {
            search_term: "   ".to_string(),
            ..ListQuery::default()
        };
        assert_eq!(apply(&rows(), &query, &SPEC).total_count, 5);
    }

    #[test]
    fn filters_are_exact_and_all_sentinel_is_ignored() {
        let mut filters = BTreeMap::new();
        filters.insert("department".to_string(), "HR".to_string());
        let query = ListQuery { filters, ..ListQuery::default() };
        assert_eq!(apply(&rows(), &query, &SPEC).total_count, 2);

        let mut filters = BTreeMap::new();
        filters.insert("department".to_string(), "All".to_string());
        let query = ListQuery { filters, ..ListQuery::default() };
        assert_eq!(apply(&rows(), &query, &SPEC).total_count, 5);
    }

    #[test]
    fn adding_a_search_term_never_grows_the_result() {
        let base = ListQuery::default();
        let narrowed = ListQuery {
            search_term: "e".to_string(),
            ..ListQuery::default()
        };
        let all = apply(&rows(), &base, &SPEC).total_count;
        let fewer = apply(&rows(), &narrowed, &SPEC).total_count;
        assert!(fewer <= all);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let query = ListQuery {
            sort_by: Some("score".to_string()),
            sort_order: SortOrder::Desc,
            ..ListQuery::default()
        };
        let page = apply(&rows(), &query, &SPEC);
        // Stapler (seq 0) and Marker (seq 2) share score 4.0 and must keep
        // their original relative order in either direction.
        assert_eq!(names(&page.rows), vec!["Stapler", "Marker", "notepad", "Notebook", "Envelope"]);

        let ascending = ListQuery {
            sort_by: Some("score".to_string()),
            sort_order: SortOrder::Asc,
            ..ListQuery::default()
        };
        let page = apply(&rows(), &ascending, &SPEC);
        assert_eq!(names(&page.rows), vec!["Envelope", "Notebook", "notepad", "Stapler", "Marker"]);
    }

    #[test]
    fn string_sort_ignores_case() {
        let query = ListQuery {
            sort_by: Some("name".to_string()),
            ..ListQuery::default()
        };
        let page = apply(&rows(), &query, &SPEC);
        assert_eq!(names(&page.rows), vec!["Envelope", "Marker", "Notebook", "notepad", "Stapler"]);
    }

    #[test]
    fn unknown_sort_field_keeps_incoming_order() {
        let query = ListQuery {
            sort_by: Some("missing_field".to_string()),
            ..ListQuery::default()
        };
        let page = apply(&rows(), &query, &SPEC);
        assert_eq!(names(&page.rows), vec!["Stapler", "Notebook", "Marker", "Envelope", "notepad"]);
    }

    #[test]
    fn pagination_round_trip_reproduces_the_filtered_sequence() {
        let query = ListQuery {
            sort_by: Some("name".to_string()),
            page_size: 2,
            ..ListQuery::default()
        };
        let full = apply(&rows(), &ListQuery { page_size: 100, ..query.clone() }, &SPEC);
        let mut stitched = Vec::new();
        let total_pages = apply(&rows(), &query, &SPEC).total_pages;
        for page in 1..=total_pages {
            let result = apply(&rows(), &ListQuery { page, ..query.clone() }, &SPEC);
            assert_eq!(result.current_page, page);
            stitched.extend(result.rows);
        }
        assert_eq!(names(&stitched), names(&full.rows));
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let query = ListQuery {
            page: 5,
            page_size: 2,
            ..ListQuery::default()
        };
        let page = apply(&rows(), &query, &SPEC);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn apply_is_pure() {
        let records = rows();
        let query = ListQuery {
            search_term: "a".to_string(),
            sort_by: Some("name".to_string()),
            ..ListQuery::default()
        };
        let first = apply(&records, &query, &SPEC);
        let second = apply(&records, &query, &SPEC);
        assert_eq!(names(&first.rows), names(&second.rows));
        assert_eq!(records, rows());
    }
}
