use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

use crate::{Error, Result};

use super::response::Paginate;

/// A single `key=value` entry of a request's query string.
pub type QueryPair = (String, String);

/// Conversion of a typed parameter into the text the API expects in a query string.
pub trait QueryValue {
    fn to_query_value(&self) -> Result<String>;
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> Result<String> {
        (**self).to_query_value()
    }
}

macro_rules! impl_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Result<String> {
                    Ok(self.to_string())
                }
            }
        )*
    }
}

macro_rules! impl_query_value_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Result<String> {
                    if !self.is_finite() {
                        return Err(Error::encoding(format!("{self} is not a finite number")));
                    }
                    // `Display` for floats is the shortest form that round trips: 0.4, 120, -5.5
                    Ok(self.to_string())
                }
            }
        )*
    }
}

impl_query_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, bool, str, String);
impl_query_value_float!(f32, f64);

impl QueryValue for NaiveDateTime {
    fn to_query_value(&self) -> Result<String> {
        Ok(self.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

/// Which end of a [`Range`] a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Target,
    Max,
}

impl Bound {
    pub fn prefix(&self) -> &'static str {
        match self {
            Bound::Min => "min_",
            Bound::Target => "target_",
            Bound::Max => "max_",
        }
    }
}

impl Display for Bound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix().trim_end_matches('_'))
    }
}

/// Tunable attribute bounds: `min_<attr>`, `target_<attr>` and `max_<attr>`.
///
/// Each bound is optional and encoded independently of the other two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min: Option<T>,
    pub target: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            target: None,
            max: None,
        }
    }
}

impl<T> Range<T> {
    pub fn new(min: Option<T>, target: Option<T>, max: Option<T>) -> Self {
        Self { min, target, max }
    }

    pub fn between(min: T, max: T) -> Self {
        Self::new(Some(min), None, Some(max))
    }

    pub fn at_least(min: T) -> Self {
        Self::new(Some(min), None, None)
    }

    pub fn at_most(max: T) -> Self {
        Self::new(None, None, Some(max))
    }

    pub fn around(target: T) -> Self {
        Self::new(None, Some(target), None)
    }

    pub fn with_min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    pub fn set(&mut self, bound: Bound, value: T) {
        match bound {
            Bound::Min => self.min = Some(value),
            Bound::Target => self.target = Some(value),
            Bound::Max => self.max = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.target.is_none() && self.max.is_none()
    }

    fn bounds(&self) -> [(Bound, Option<&T>); 3] {
        [
            (Bound::Min, self.min.as_ref()),
            (Bound::Target, self.target.as_ref()),
            (Bound::Max, self.max.as_ref()),
        ]
    }
}

/// Page window of a list resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

impl From<Paginate> for Pagination {
    fn from(value: Paginate) -> Self {
        let default = Self::default();
        Self {
            limit: value.limit.unwrap_or(default.limit),
            offset: value.offset.unwrap_or(default.offset),
        }
    }
}

/// A single pair when `value` is present, nothing otherwise.
pub fn optional<K: Display, V: QueryValue>(key: K, value: Option<V>) -> Result<Vec<QueryPair>> {
    match value {
        Some(value) => Ok(vec![(key.to_string(), value.to_query_value()?)]),
        None => Ok(Vec::new()),
    }
}

/// One pair per present bound, prefixed onto `attr`, in min, target, max order.
pub fn range<T: QueryValue>(attr: &str, range: &Range<T>) -> Result<Vec<QueryPair>> {
    range
        .bounds()
        .into_iter()
        .filter_map(|(bound, value)| value.map(|v| (bound, v)))
        .map(|(bound, value)| {
            value
                .to_query_value()
                .map(|v| (format!("{}{attr}", bound.prefix()), v))
        })
        .collect()
}

/// Comma joined seed ids, omitted when there is nothing but separators to send.
pub fn seeds<K: Display, S: AsRef<str>>(key: K, seeds: &[S]) -> Vec<QueryPair> {
    let joined = seeds
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");

    if joined.chars().all(|c| c == ',' || c.is_whitespace()) {
        return Vec::new();
    }
    vec![(key.to_string(), joined)]
}

pub fn pagination(limit: usize, offset: usize) -> Vec<QueryPair> {
    vec![
        ("limit".to_string(), limit.to_string()),
        ("offset".to_string(), offset.to_string()),
    ]
}

/// Ordered query parameters of a single request.
///
/// Keys are not deduplicated; a repeated key is sent as many times as it was added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<QueryPair>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn concat<I: IntoIterator<Item = Vec<QueryPair>>>(parts: I) -> Self {
        Self(parts.into_iter().flatten().collect())
    }

    pub fn push<K: Display, V: Display>(mut self, key: K, value: V) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn optional<K: Display, V: QueryValue>(mut self, key: K, value: Option<V>) -> Result<Self> {
        self.0.extend(optional(key, value)?);
        Ok(self)
    }

    pub fn range<T: QueryValue>(mut self, attr: &str, value: &Range<T>) -> Result<Self> {
        self.0.extend(range(attr, value)?);
        Ok(self)
    }

    pub fn seeds<K: Display, S: AsRef<str>>(mut self, key: K, value: &[S]) -> Self {
        self.0.extend(seeds(key, value));
        self
    }

    pub fn paginate(mut self, page: Pagination) -> Self {
        self.0.extend(pagination(page.limit, page.offset));
        self
    }

    pub fn pairs(&self) -> &[QueryPair] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First value sent for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_query_string(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.0)?)
    }
}

impl From<Vec<QueryPair>> for Query {
    fn from(value: Vec<QueryPair>) -> Self {
        Self(value)
    }
}

impl IntoIterator for Query {
    type Item = QueryPair;
    type IntoIter = std::vec::IntoIter<QueryPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
