use serde::{Deserialize, Serialize};

use crate::entities::Project;
use crate::errors::DomainError;

/// Offset pagination, 1-based pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32, max_page_size: u32) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::ValidationError("Page must be at least 1".to_string()));
        }
        if page_size == 0 {
            return Err(DomainError::ValidationError("Page size must be at least 1".to_string()));
        }
        if page_size > max_page_size {
            return Err(DomainError::ValidationError(format!(
                "Page size cannot exceed {}",
                max_page_size
            )));
        }
        Ok(Self { page, page_size })
    }

    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    pub fn take(&self) -> u64 {
        self.page_size as u64
    }
}

/// Listing filter. At most one criterion is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Category(String),
    Search(String),
}

impl ProjectFilter {
    /// Category wins when both are supplied; blank values count as absent.
    pub fn from_params(category: Option<&str>, search: Option<&str>) -> Self {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if let Some(category) = present(category) {
            ProjectFilter::Category(category)
        } else if let Some(search) = present(search) {
            ProjectFilter::Search(search)
        } else {
            ProjectFilter::All
        }
    }
}

/// Store-level criteria, the filter plus the author-scoped variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectQuery {
    All,
    Category(String),
    TitleContains(String),
    Author(String),
}

impl From<ProjectFilter> for ProjectQuery {
    fn from(filter: ProjectFilter) -> Self {
        match filter {
            ProjectFilter::All => ProjectQuery::All,
            ProjectFilter::Category(category) => ProjectQuery::Category(category),
            ProjectFilter::Search(text) => ProjectQuery::TitleContains(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub items: Vec<Project>,
    pub total_count: u64,
}

impl ProjectPage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}
