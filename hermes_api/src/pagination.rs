use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_page() -> usize {
    1
}
fn default_per_page() -> usize {
    20
}

impl Pagination {
    pub fn offset(&self) -> usize {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.per_page.max(1))
    }

    /// Slices `items` down to the requested page, keeping their order.
    pub fn paginate<T>(&self, items: Vec<T>) -> PaginatedResponse<T> {
        let total = items.len();
        let per_page = self.per_page.max(1);
        let data = items
            .into_iter()
            .skip(self.offset())
            .take(per_page)
            .collect();

        PaginatedResponse {
            data,
            page: self.page.max(1),
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

#[derive(Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}
