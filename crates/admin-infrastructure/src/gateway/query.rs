//! PostgREST filter and ordering parameters

/// Query-string parameters for one table request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    params: Vec<(String, String)>,
}

impl TableQuery {
    /// `select=*`
    pub fn all() -> Self {
        Self::default().select("*")
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring match
    pub fn ilike(mut self, column: &str, term: &str) -> Self {
        let term = term.replace(['*', '%'], "");
        self.params
            .push((column.to_string(), format!("ilike.*{}*", term.trim())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Total row count from a `Content-Range` header such as `0-9/25` or `*/0`
pub fn parse_content_range(value: &str) -> Option<u64> {
    value
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
}
