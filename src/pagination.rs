use crate::error::{AppError, Result};

pub const ITEMS_PER_PAGE: u32 = 10;

// one-based ?page= query parameter shared by the listing endpoints; missing
// (or zero) means the first page
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        i64::from(ITEMS_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(ITEMS_PER_PAGE)
    }

    // Reading past the last page is a 404. The first page of an empty table
    // is not: it is a valid, empty listing.
    pub fn check_in_range(&self, total: i64) -> Result<()> {
        if self.page > 1 && self.offset() >= total {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
