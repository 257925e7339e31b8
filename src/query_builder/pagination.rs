use super::descriptor::QueryDescriptor;
use super::params::ListQuery;
use crate::config::PaginationConfig;
use crate::database::{Document, DocumentStore};
use crate::error::Result;
use serde::Serialize;

/// Sanitized page request; both values are at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        let config = PaginationConfig::default();
        Self {
            page: config.default_page,
            limit: config.default_per_page,
        }
    }
}

impl PageOptions {
    /// Zero falls back to the defaults
    pub fn new(page: u32, limit: u32) -> Self {
        let defaults = Self::default();
        Self {
            page: if page == 0 { defaults.page } else { page },
            limit: if limit == 0 { defaults.limit } else { limit },
        }
    }

    pub fn from_query(query: &ListQuery, config: &PaginationConfig) -> Self {
        Self::new(
            query.page.unwrap_or(config.default_page),
            query.per_page.unwrap_or(config.default_per_page),
        )
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }
}

/// Skip/limit slice handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u32,
}

impl PageWindow {
    /// Create a window from a 1-indexed page number and page size
    pub fn new(page: u32, per_page: u32) -> Self {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(per_page);
        Self {
            skip,
            limit: per_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_docs: u64,
    pub total_pages: u64,
    pub page: u32,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl PaginationMeta {
    pub fn compute(total_docs: u64, options: PageOptions) -> Self {
        let limit = u64::from(options.limit.max(1));
        let total_pages = total_docs.div_ceil(limit);
        let page = options.page;
        let has_next_page = u64::from(page) < total_pages;
        let has_prev_page = page > 1;
        Self {
            total_docs,
            total_pages,
            page,
            limit: options.limit,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| page + 1),
            prev_page: has_prev_page.then(|| page - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T = Document> {
    pub docs: Vec<T>,
    #[serde(flatten)]
    pub meta: PaginationMeta,
}

impl<T> PaginatedResult<T> {
    pub fn into_parts(self) -> (Vec<T>, PaginationMeta) {
        (self.docs, self.meta)
    }
}

/// Run a refined descriptor for one page. The count and the page fetch are
/// awaited together; store errors propagate unchanged.
pub async fn paginate(
    store: &dyn DocumentStore,
    descriptor: &QueryDescriptor,
    options: PageOptions,
) -> Result<PaginatedResult> {
    let (total_docs, docs) = futures::try_join!(
        store.count_matching(descriptor.collection(), descriptor.predicate()),
        store.find_matching(descriptor, Some(options.window())),
    )?;

    crate::logging::log_query_operation(
        descriptor.collection(),
        descriptor.predicate().len(),
        options.page,
        options.limit,
        Some(total_docs),
    );

    Ok(PaginatedResult {
        docs,
        meta: PaginationMeta::compute(total_docs, options),
    })
}
