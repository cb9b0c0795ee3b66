//! Searching, sorting and paging survey summaries.

use std::cmp::Ordering;

use survey_flow_types::SurveySummary;

/// Column a catalog is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Title,
    Responses,
    Status,
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Default number of surveys shown per page.
pub const DEFAULT_PER_PAGE: usize = 5;

/// A catalog listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against titles.
    pub search: String,
    pub sort: SortField,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortField::default(),
            direction: SortDirection::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub items: Vec<SurveySummary>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl CatalogQuery {
    /// Create a query with default sorting and paging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter titles by a search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self.page = 1;
        self
    }

    /// Sort by a field in a direction.
    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = field;
        self.direction = direction;
        self
    }

    /// Select a page (1-based).
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Click on a column header: same field flips direction, a new field
    /// starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.sort == field {
            self.direction = self.direction.reversed();
        } else {
            self.sort = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Run the query over a set of summaries.
    pub fn apply(&self, summaries: impl IntoIterator<Item = SurveySummary>) -> CatalogPage {
        let needle = self.search.to_lowercase();
        let mut matching: Vec<_> = summaries
            .into_iter()
            .filter(|s| needle.is_empty() || s.title.to_lowercase().contains(&needle))
            .collect();

        matching.sort_by(|a, b| {
            let ordering = compare(self.sort, a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let per_page = self.per_page.max(1);
        let total_items = matching.len();
        let total_pages = total_items.div_ceil(per_page);
        let page = self.page.max(1);
        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        CatalogPage {
            items,
            page,
            total_pages,
            total_items,
        }
    }
}

fn compare(field: SortField, a: &SurveySummary, b: &SurveySummary) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Responses => a.responses.cmp(&b.responses),
        SortField::Status => a.status.to_string().cmp(&b.status.to_string()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
