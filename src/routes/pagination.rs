use serde::Deserialize;

const DEFAULT_RECORDS_PER_PAGE: i64 = 10;

/// Query string of a paginated listing. Values that are missing, not
/// numeric or below 1 fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "recordPerPage")]
    pub record_per_page: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "startIndex")]
    pub start_index: Option<String>,
}

fn positive(value: &Option<String>) -> Option<i64> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}

impl PageQuery {
    /// `(offset, limit)` for the store. An explicit `startIndex` wins over
    /// the offset derived from `page`.
    pub fn window(&self) -> (i64, i64) {
        let limit = positive(&self.record_per_page).unwrap_or(DEFAULT_RECORDS_PER_PAGE);
        let page = positive(&self.page).unwrap_or(1);
        let offset = self
            .start_index
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .unwrap_or_else(|| (page - 1).saturating_mul(limit));
        (offset, limit)
    }
}
