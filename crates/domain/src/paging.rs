//! Sorting and paging requests shared by repositories and services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Items per page when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound applied to requested page sizes.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Sort direction of a single property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

impl FromStr for Direction {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(SortParseError::Direction(s.to_string())),
        }
    }
}

/// One `(property, direction)` pair of a [`Sort`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

/// Ordered list of sort criteria. Earlier orders take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// No sorting; stores return their natural order.
    #[must_use]
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort ascending by `property`.
    #[must_use]
    pub fn by(property: impl Into<String>) -> Self {
        Self {
            orders: vec![SortOrder {
                property: property.into(),
                direction: Direction::Asc,
            }],
        }
    }

    /// Append the orders of `other` after this one's.
    #[must_use]
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// Switch every order to ascending.
    #[must_use]
    pub fn ascending(self) -> Self {
        self.with_direction(Direction::Asc)
    }

    /// Switch every order to descending.
    #[must_use]
    pub fn descending(self) -> Self {
        self.with_direction(Direction::Desc)
    }

    fn with_direction(mut self, direction: Direction) -> Self {
        for order in &mut self.orders {
            order.direction = direction;
        }
        self
    }

    #[must_use]
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return f.write_str("UNSORTED");
        }
        for (index, order) in self.orders.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", order.property, order.direction)?;
        }
        Ok(())
    }
}

/// Parses `name`, `name:desc` or comma separated lists such as `name,id:desc`.
impl FromStr for Sort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut orders = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (property, direction) = match part.split_once(':') {
                Some((property, direction)) => (property.trim(), direction.trim().parse()?),
                None => (part, Direction::Asc),
            };
            if property.is_empty() {
                return Err(SortParseError::EmptyProperty);
            }
            orders.push(SortOrder {
                property: property.to_string(),
                direction,
            });
        }
        Ok(Self { orders })
    }
}

/// Failure to parse a [`Sort`] or [`Direction`] from text.
#[derive(Debug, thiserror::Error)]
pub enum SortParseError {
    #[error("unknown sort direction '{0}', expected 'asc' or 'desc'")]
    Direction(String),
    #[error("sort property cannot be empty")]
    EmptyProperty,
}

/// Request for one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    number: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Page `number` (zero-based) of `size` items. `size` is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn of(number: u32, size: u32) -> Self {
        Self {
            number,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Sort::unsorted(),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Index of the first item of this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results together with the total count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.number(),
            size: request.size(),
            total_elements,
        }
    }

    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size.max(1)))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Transform the content, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
