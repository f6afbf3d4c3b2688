//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 默认分页大小（与控制台表格一致）
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 分页参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// 后端 `skip` 查询参数；按 u64 计算，任意页码都不会溢出
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// 后端 `limit` 查询参数
    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::default().offset(), 0);
        assert_eq!(Pagination::new(3, 20).offset(), 40);
        // page 0 is treated as the first page
        assert_eq!(Pagination::new(0, 20).offset(), 0);
    }

    #[test]
    fn test_offset_of_last_page_does_not_overflow() {
        let pagination = Pagination::new(u32::MAX, 10);
        assert_eq!(pagination.offset(), u64::from(u32::MAX - 1) * 10);

        let widest = Pagination::new(u32::MAX, u32::MAX);
        assert_eq!(widest.offset(), u64::from(u32::MAX - 1) * u64::from(u32::MAX));
    }

    #[test]
    fn test_total_pages() {
        let pagination = Pagination::new(1, 10);
        let result: PagedResult<u32> = PagedResult::new(vec![1, 2, 3], 21, &pagination);
        assert_eq!(result.total_pages(), 3);

        let empty: PagedResult<u32> = PagedResult::new(vec![], 0, &pagination);
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_total_pages_beyond_u32() {
        let pagination = Pagination::new(1, 1);
        let total = u64::from(u32::MAX) + 5;
        let result: PagedResult<u32> = PagedResult::new(vec![], total, &pagination);
        assert_eq!(result.total_pages(), total);
    }
}
