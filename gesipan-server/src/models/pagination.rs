//! Pagination types
//!
//! Pages are 1-indexed and hold a fixed number of posts. The list page
//! groups page links into blocks of [`PAGE_BLOCK`].

use std::ops::RangeInclusive;

use serde::Serialize;

use super::ValidationError;

/// Posts per page
pub const PAGE_SIZE: u32 = 25;

/// Page links shown per pagination block
pub const PAGE_BLOCK: u32 = 10;

/// Requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
}

impl Pagination {
    /// Create pagination for a page number; page 0 is rejected.
    pub fn new(page: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::InvalidFormat {
                field: "cpg",
                reason: "page number must be a positive integer",
            });
        }
        Ok(Self { page })
    }

    /// Parse a page number taken from a URL path.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let page = raw.trim().parse::<u32>().map_err(|_| ValidationError::InvalidFormat {
            field: "cpg",
            reason: "page number must be a positive integer",
        })?;
        Self::new(page)
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * PAGE_SIZE as i64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        PAGE_SIZE as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
}

impl<T> Paginated<T> {
    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.total)
    }
}

/// First page of the block that contains `cpg`.
pub fn page_block_start(cpg: u32) -> u32 {
    (cpg.max(1) - 1) / PAGE_BLOCK * PAGE_BLOCK + 1
}

/// Number of pages needed for `total` posts; 0 when there are none.
pub fn total_pages(total: i64) -> u32 {
    if total <= 0 {
        return 0;
    }
    let total = total as u64;
    total.div_ceil(PAGE_SIZE as u64) as u32
}

/// Values the list page needs to draw "prev / 1..10 / next" navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    /// Current page
    pub cpg: u32,
    /// First page of the current block
    pub stpgb: u32,
    /// Total number of pages
    pub allpage: u32,
}

impl Pager {
    pub fn new(cpg: u32, total: i64) -> Self {
        Self {
            cpg,
            stpgb: page_block_start(cpg),
            allpage: total_pages(total),
        }
    }

    /// Page numbers linked from the current block.
    pub fn block_pages(&self) -> RangeInclusive<u32> {
        let last = self.stpgb.saturating_add(PAGE_BLOCK - 1).min(self.allpage);
        self.stpgb..=last
    }

    /// Last page of the previous block, if there is one.
    pub fn prev_block(&self) -> Option<u32> {
        (self.stpgb > 1).then(|| self.stpgb - 1)
    }

    /// First page of the next block, if there is one.
    pub fn next_block(&self) -> Option<u32> {
        self.stpgb
            .checked_add(PAGE_BLOCK)
            .filter(|next| *next <= self.allpage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1).unwrap().offset(), 0);
        assert_eq!(Pagination::new(2).unwrap().offset(), 25);
        assert_eq!(Pagination::new(3).unwrap().offset(), 50);
    }

    #[test]
    fn rejects_page_zero() {
        assert!(Pagination::new(0).is_err());
        assert!(Pagination::parse("0").is_err());
        assert!(Pagination::parse("-3").is_err());
        assert!(Pagination::parse("abc").is_err());
        assert_eq!(Pagination::parse("4").unwrap().page, 4);
    }

    #[test]
    fn block_start() {
        assert_eq!(page_block_start(1), 1);
        assert_eq!(page_block_start(10), 1);
        assert_eq!(page_block_start(11), 11);
        assert_eq!(page_block_start(20), 11);
        assert_eq!(page_block_start(25), 21);
    }

    #[test]
    fn page_count() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(25), 1);
        assert_eq!(total_pages(26), 2);
        assert_eq!(total_pages(250), 10);
    }

    #[test]
    fn block_links_on_first_block() {
        let pager = Pager::new(3, 26);
        assert_eq!(pager.block_pages(), 1..=2);
        assert_eq!(pager.prev_block(), None);
        assert_eq!(pager.next_block(), None);
    }

    #[test]
    fn block_links_in_middle_block() {
        // 30 pages, looking at page 15
        let pager = Pager::new(15, 30 * 25);
        assert_eq!(pager.stpgb, 11);
        assert_eq!(pager.block_pages(), 11..=20);
        assert_eq!(pager.prev_block(), Some(10));
        assert_eq!(pager.next_block(), Some(21));
    }

    #[test]
    fn last_block_of_u32_range_does_not_overflow() {
        let pager = Pager::new(u32::MAX, 100);
        assert_eq!(pager.stpgb, 4_294_967_291);
        assert!(pager.block_pages().is_empty());
        assert_eq!(pager.prev_block(), Some(4_294_967_290));
        assert_eq!(pager.next_block(), None);

        // every page in that block, with a board big enough to reach it
        for cpg in 4_294_967_291..=u32::MAX {
            let pager = Pager::new(cpg, i64::from(u32::MAX) * 25);
            assert_eq!(pager.block_pages(), 4_294_967_291..=u32::MAX);
            assert_eq!(pager.next_block(), None);
        }
    }

    #[test]
    fn empty_board_has_no_links() {
        let pager = Pager::new(1, 0);
        assert_eq!(pager.allpage, 0);
        assert!(pager.block_pages().is_empty());
        assert_eq!(pager.next_block(), None);
    }
}
