//! Shared constants for collections, well-known document fields and query-string keys.

/// Collection names used by the repositories
pub mod collections {
    pub const TASKS: &str = "tasks";
    pub const COMMENTS: &str = "comments";
    pub const USERS: &str = "users";

    pub const ALL: &[&str] = &[TASKS, COMMENTS, USERS];
}

/// Field names every stored document carries
pub mod fields {
    pub const ID: &str = "id";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const DELETED_AT: &str = "deletedAt";
    pub const READERS: &str = "readers";
    pub const STATUS: &str = "status";
    /// Version-control field some stores inject; never projected
    pub const VERSION: &str = "__v";
}

/// Query-string keys with a fixed meaning; never treated as field filters
pub mod params {
    pub const PAGE: &str = "page";
    pub const PER_PAGE: &str = "perPage";
    pub const LIMIT: &str = "limit";
    pub const SORT: &str = "sort";
    pub const SEARCH: &str = "search";
    pub const DELETED: &str = "deleted";
    pub const FIELDS: &str = "fields";

    pub const RESERVED: &[&str] = &[PAGE, PER_PAGE, LIMIT, SORT, SEARCH, DELETED, FIELDS];

    pub fn is_reserved(key: &str) -> bool {
        RESERVED.contains(&key)
    }
}

/// Pagination fallbacks
pub mod pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PER_PAGE: u32 = 10;
}
