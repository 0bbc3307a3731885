use serde::Deserialize;

/// Query for `GET /doctors`: zero-based page index and page size.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub pages: u32,
    /// Missing size means no limit.
    pub size: Option<u32>,
}

impl PageQuery {
    /// `(skip, limit)` for the store. A skip past `i64::MAX` saturates,
    /// which still lands beyond the last document.
    pub fn window(&self) -> (i64, Option<i64>) {
        match self.size {
            Some(size) => {
                let size = i64::from(size);
                (i64::from(self.pages).saturating_mul(size), Some(size))
            }
            None => (0, None),
        }
    }
}
