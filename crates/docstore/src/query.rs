//! # Queries
//!
//! Field filters, multi-field sort expressions and page windows evaluated by the
//! collection actor against [`Document::field`].

use crate::document::Document;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A field value as seen by the query engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Time(DateTime<Utc>),
    /// Multi-valued field. Conditions match when any element matches.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Orders two scalar values. Numbers compare across `Int` and `Float`;
    /// values of different kinds are unordered.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Int(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Str(a), FieldValue::Str(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Time(a), FieldValue::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn any(&self, mut pred: impl FnMut(&FieldValue) -> bool) -> bool {
        match self {
            FieldValue::List(values) => values.iter().any(pred),
            value => pred(value),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Str(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Time(v) => write!(f, "{}", v.to_rfc3339()),
            FieldValue::List(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(","))
            }
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Time(v)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// A single field condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(FieldValue),
    In(Vec<FieldValue>),
    Gt(FieldValue),
    Gte(FieldValue),
    Lt(FieldValue),
    Lte(FieldValue),
    /// Case-insensitive substring match. The needle is stored lowercased.
    Contains(String),
}

impl Condition {
    fn matches(&self, value: Option<&FieldValue>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let ordered = |target: &FieldValue, accept: fn(Ordering) -> bool| {
            value.any(|v| v.compare(target).is_some_and(accept))
        };
        match self {
            Condition::Eq(target) => ordered(target, Ordering::is_eq),
            Condition::In(set) => value.any(|v| {
                set.iter()
                    .any(|target| v.compare(target) == Some(Ordering::Equal))
            }),
            Condition::Gt(target) => ordered(target, Ordering::is_gt),
            Condition::Gte(target) => ordered(target, Ordering::is_ge),
            Condition::Lt(target) => ordered(target, Ordering::is_lt),
            Condition::Lte(target) => ordered(target, Ordering::is_le),
            Condition::Contains(needle) => value.any(|v| match v {
                FieldValue::Str(s) => s.to_lowercase().contains(needle.as_str()),
                _ => false,
            }),
        }
    }
}

/// A conjunction of field conditions, plus an optional free-text search that
/// matches when any of its fields contains the text.
///
/// ```
/// use docstore::Filter;
///
/// let filter = Filter::new()
///     .one_of("status", ["shipped", "paid"])
///     .gt("total", 10u32)
///     .search(&["email"], "ALICE");
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    all: Vec<(String, Condition)>,
    any: Vec<(String, Condition)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty()
    }

    pub fn with(mut self, field: &str, condition: Condition) -> Self {
        self.all.push((field.to_string(), condition));
        self
    }

    pub fn eq(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.with(field, Condition::Eq(value.into()))
    }

    /// Field must equal one of `values`. An empty set leaves the field unconstrained.
    pub fn one_of<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let set: Vec<FieldValue> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            self
        } else {
            self.with(field, Condition::In(set))
        }
    }

    pub fn gt(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.with(field, Condition::Gt(value.into()))
    }

    pub fn gte(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.with(field, Condition::Gte(value.into()))
    }

    pub fn lt(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.with(field, Condition::Lt(value.into()))
    }

    pub fn lte(self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.with(field, Condition::Lte(value.into()))
    }

    /// Case-insensitive substring search over `fields`. Blank text is ignored.
    pub fn search(mut self, fields: &[&str], text: &str) -> Self {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self;
        }
        for field in fields {
            self.any
                .push((field.to_string(), Condition::Contains(needle.clone())));
        }
        self
    }

    pub fn matches<T: Document>(&self, doc: &T) -> bool {
        let holds = |(field, condition): &(String, Condition)| {
            condition.matches(doc.field(field).as_ref())
        };
        self.all.iter().all(holds) && (self.any.is_empty() || self.any.iter().any(holds))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Multi-field sort order, e.g. `"createdAt desc, name asc"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<(String, SortDirection)>,
}

impl SortSpec {
    /// Parses a comma-separated list of `field direction` pairs.
    ///
    /// The direction is ascending when it reads `asc` in any case; anything else,
    /// including a missing direction, sorts descending. Empty segments are skipped.
    pub fn parse(expression: &str) -> Self {
        let keys = expression
            .split(',')
            .filter_map(|segment| {
                let mut tokens = segment.split_whitespace();
                let field = tokens.next()?;
                let direction = match tokens.next() {
                    Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Ascending,
                    _ => SortDirection::Descending,
                };
                Some((field.to_string(), direction))
            })
            .collect();
        Self { keys }
    }

    pub fn by(field: &str, direction: SortDirection) -> Self {
        Self {
            keys: vec![(field.to_string(), direction)],
        }
    }

    pub fn then(mut self, field: &str, direction: SortDirection) -> Self {
        self.keys.push((field.to_string(), direction));
        self
    }

    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Missing fields sort before present ones; unordered pairs compare equal.
    pub fn compare<T: Document>(&self, a: &T, b: &T) -> Ordering {
        for (field, direction) in &self.keys {
            let ordering = match (a.field(field), b.field(field)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
            };
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Which slice of the matching documents to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// 1-based page of `limit` documents.
    Page { page: u32, limit: u32 },
    /// Every matching document on a single page.
    All,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Page 0 is read as page 1 and a zero limit as 1.
    pub fn page(page: u32, limit: u32) -> Self {
        Pagination::Page {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        match self {
            Pagination::Page { page, .. } => *page,
            Pagination::All => 1,
        }
    }

    pub fn total_pages(&self, total: usize) -> usize {
        match self {
            Pagination::Page { limit, .. } => total.div_ceil(*limit as usize),
            Pagination::All => 1,
        }
    }

    fn window(&self, total: usize) -> (usize, usize) {
        match self {
            Pagination::Page { page, limit } => {
                let limit = *limit as usize;
                let skip = (page.saturating_sub(1) as usize).saturating_mul(limit);
                (skip.min(total), limit)
            }
            Pagination::All => (0, total),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::page(1, Self::DEFAULT_LIMIT)
    }
}

/// A complete find request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub sort: SortSpec,
    pub pagination: Pagination,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Evaluates the query over documents given in natural (insertion) order.
    /// The sort is stable, so ties keep that order.
    pub fn apply<'a, T, I>(&self, docs: I) -> Page<T>
    where
        T: Document,
        I: IntoIterator<Item = &'a T>,
    {
        let mut matched: Vec<&T> = docs
            .into_iter()
            .filter(|doc| self.filter.matches(*doc))
            .collect();
        if !self.sort.is_empty() {
            matched.sort_by(|a, b| self.sort.compare(*a, *b));
        }
        let total_count = matched.len();
        let (skip, take) = self.pagination.window(total_count);
        Page {
            items: matched.into_iter().skip(skip).take(take).cloned().collect(),
            total_count,
            total_page: self.pagination.total_pages(total_count),
            current_page: self.pagination.current_page(),
        }
    }
}

/// One page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_page: usize,
    pub current_page: u32,
}

impl<T> Page<T> {
    /// Projects every item, keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_page: self.total_page,
            current_page: self.current_page,
        }
    }
}
