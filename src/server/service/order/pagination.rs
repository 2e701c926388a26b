//! Slicing filtered order listings into pages.

use sea_orm::{Condition, ConnectionTrait, DbErr};

use crate::server::{data::order::OrderRepository, model::db::OrderModel};

/// One page of results together with its position in the full result set.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of results across all pages
    pub total: u64,
    /// 1-based page number
    pub page: u64,
    pub per_page: u64,
    /// 1-based index of the first record on this page, 0 when there are no results
    pub start_record: u64,
    /// 1-based index of the last record on this page, capped at `total`
    pub end_record: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let (start_record, end_record) = record_range(total, page, per_page);

        Self {
            items,
            total,
            page,
            per_page,
            start_record,
            end_record,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }

    pub fn display_info(&self) -> String {
        format!(
            "Showing records {} to {} of {}",
            self.start_record, self.end_record, self.total
        )
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            start_record: self.start_record,
            end_record: self.end_record,
        }
    }
}

/// Resolves an optional requested page, treating absent or zero as the first page.
pub fn normalize_page(page: Option<u64>) -> u64 {
    page.unwrap_or(1).max(1)
}

/// First and last record numbers shown on `page`.
///
/// Pages past the end keep the same formulas, so their start exceeds their end.
pub fn record_range(total: u64, page: u64, per_page: u64) -> (u64, u64) {
    if total == 0 {
        return (0, 0);
    }

    let start = (page.max(1) - 1)
        .saturating_mul(per_page)
        .saturating_add(1);
    let end = start.saturating_add(per_page - 1).min(total);

    (start, end)
}

/// Fetches one page of orders matching `condition`, newest upload first.
pub async fn paginate_orders<C: ConnectionTrait>(
    db: &C,
    condition: Condition,
    page: u64,
    per_page: u64,
) -> Result<Page<OrderModel>, DbErr> {
    let page = page.max(1);
    let per_page = per_page.max(1);

    let (orders, total) = OrderRepository::new(db)
        .get_page(condition, page, per_page)
        .await?;

    Ok(Page::new(orders, total, page, per_page))
}
