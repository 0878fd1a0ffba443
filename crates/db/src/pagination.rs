use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(format!(
                "invalid sort direction '{value}'; expected asc or desc"
            ))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("asc"),
            Direction::Desc => f.write_str("desc"),
        }
    }
}

/// Field and direction a page is ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::asc("id")
    }
}

/// Parses the `field[,direction]` form used by the `sort` query parameter.
impl FromStr for Sort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(2, ',');
        let field = parts.next().unwrap_or_default().trim();
        if field.is_empty() {
            return Err("sort field must not be empty".to_string());
        }

        let direction = match parts.next() {
            Some(direction) => direction.trim().parse()?,
            None => Direction::Asc,
        };

        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

/// Zero-based page request. `size` is always at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        Self {
            page,
            size: size.max(1),
            sort,
        }
    }

    pub fn of_size(size: u32) -> Self {
        Self::new(0, size, Sort::default())
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Index of the first element of this page within the full result set.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 5, Sort::default())
    }
}

/// One page of a larger, ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    page_number: u32,
    page_size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page_number: request.page,
            page_size: request.size,
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// `ceil(total_elements / page_size)`; zero for an empty result set.
    pub fn total_pages(&self) -> u64 {
        let size = u64::from(self.page_size.max(1));
        self.total_elements.div_ceil(size)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Convert the content while keeping the paging figures.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
        }
    }
}
