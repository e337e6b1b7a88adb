// Per-page filter state; never persisted

/// Parameters that select what the remote API returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub period: Option<String>,
    pub report_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub category: String,
    pub stock: String,
    pub period: Option<String>,
    pub report_type: Option<String>,
}

impl FilterState {
    pub fn from_query(query: &PageQuery) -> Self {
        Self {
            period: query.period.clone(),
            report_type: query.report_type.clone(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> PageQuery {
        PageQuery {
            period: self.period.clone(),
            report_type: self.report_type.clone(),
        }
    }

    /// Lowercased search needle; empty matches everything.
    pub fn needle(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    pub fn has_local_filters(&self) -> bool {
        !self.search_term.is_empty() || !self.category.is_empty() || !self.stock.is_empty()
    }
}
