//! Table metadata used while compiling.
//!
//! The compiler needs to know a table's primary key to resolve `$id`, and
//! its column list to expand exclusion projections.

/// Metadata for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    primary_key: Vec<String>,
    columns: Option<Vec<String>>,
}

impl Table {
    /// Creates a table whose primary key is `id` and whose columns are unknown.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: vec![String::from("id")],
            columns: None,
        }
    }

    /// Sets the primary-key columns. An empty list declares no primary key.
    #[must_use]
    pub fn primary_key<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.primary_key = columns.iter().map(|c| String::from(c.as_ref())).collect();
        self
    }

    /// Sets the full column list.
    #[must_use]
    pub fn columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.columns = Some(columns.iter().map(|c| String::from(c.as_ref())).collect());
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the primary-key columns.
    #[must_use]
    pub fn primary_key_columns(&self) -> &[String] {
        &self.primary_key
    }

    /// Returns the column list, when known.
    #[must_use]
    pub fn column_names(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }
}
