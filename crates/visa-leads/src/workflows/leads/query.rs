use super::domain::LeadStatus;

/// Rows shown per page of the lead list.
pub const PAGE_SIZE: usize = 8;

/// Typed filter specification for the lead list.
///
/// Repository adapters interpret this one value for both the count and the
/// page query, which keeps pagination totals consistent with the listed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadFilter {
    All,
    Search(String),
    Status(LeadStatus),
    SearchAndStatus { search: String, status: LeadStatus },
}

impl LeadFilter {
    /// Build the filter from raw query parameters. Blank search text and
    /// unknown status labels degrade to "no clause" rather than failing.
    pub fn from_params(search: Option<&str>, status: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        let status = status.and_then(LeadStatus::parse);

        match (search, status) {
            (None, None) => Self::All,
            (Some(search), None) => Self::Search(search),
            (None, Some(status)) => Self::Status(status),
            (Some(search), Some(status)) => Self::SearchAndStatus { search, status },
        }
    }

    /// Single predicate implementation: `(first_name CONTAINS search OR
    /// country CONTAINS search) AND status == wanted`, clause-wise.
    pub fn matches(&self, first_name: &str, country_name: Option<&str>, status: LeadStatus) -> bool {
        match self {
            LeadFilter::All => true,
            LeadFilter::Search(search) => search_hit(search, first_name, country_name),
            LeadFilter::Status(wanted) => status == *wanted,
            LeadFilter::SearchAndStatus {
                search,
                status: wanted,
            } => search_hit(search, first_name, country_name) && status == *wanted,
        }
    }
}

// Case-insensitive substring over the first name OR the joined country name.
fn search_hit(search: &str, first_name: &str, country_name: Option<&str>) -> bool {
    let needle = search.to_lowercase();
    first_name.to_lowercase().contains(&needle)
        || country_name
            .map(str::to_lowercase)
            .is_some_and(|name| name.contains(&needle))
}

/// Offset/limit window handed to repository adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub offset: usize,
    pub limit: usize,
}

/// 1-indexed pagination over a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Paginator {
    /// Normalize a raw `page` parameter: absent, non-numeric, or anything
    /// below 1 becomes page 1, so offsets never go negative.
    pub fn from_param(raw: Option<&str>) -> Self {
        Self::with_page_size(raw, PAGE_SIZE)
    }

    pub fn with_page_size(raw: Option<&str>, page_size: usize) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        Self { page, page_size }
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn offset(&self) -> usize {
        // Saturating: a huge page number must land on an empty window, not
        // overflow.
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub const fn slice(&self) -> PageSlice {
        PageSlice {
            offset: self.offset(),
            limit: self.page_size,
        }
    }

    /// Pages past this bound are not clamped; they yield an empty row set.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }
}
