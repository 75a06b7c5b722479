//! Query parameters for list endpoints

/// Offset paging and filtering for list endpoints.
///
/// Defaults match the backend: `skip=0`, `limit=100`, and the server-side
/// default for `active_only` (only active records).
///
/// # Example
///
/// ```
/// use shiftboard_lib::api::ListParams;
///
/// let params = ListParams::new().limit(500).active_only(false);
/// assert_eq!(params.to_query(), "?skip=0&limit=500&active_only=false");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub skip: u32,
    pub limit: u32,
    /// `None` leaves the backend default in place.
    pub active_only: Option<bool>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            active_only: None,
        }
    }
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Restricts to active records (`true`) or includes inactive ones (`false`).
    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = Some(active_only);
        self
    }

    /// Renders the parameters as a query string, leading `?` included.
    pub fn to_query(&self) -> String {
        let mut query = format!("?skip={}&limit={}", self.skip, self.limit);
        if let Some(active_only) = self.active_only {
            query.push_str(&format!("&active_only={active_only}"));
        }
        query
    }

    /// Same parameters without the `active_only` filter, for endpoints that
    /// do not take it.
    pub(crate) fn without_filter(self) -> Self {
        Self {
            active_only: None,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        assert_eq!(ListParams::default().to_query(), "?skip=0&limit=100");
    }

    #[test]
    fn test_without_filter_drops_active_only() {
        let params = ListParams::new().skip(20).active_only(true).without_filter();
        assert_eq!(params.to_query(), "?skip=20&limit=100");
    }
}
