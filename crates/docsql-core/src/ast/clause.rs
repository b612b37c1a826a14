//! Projection, ordering and paging clauses.

use std::fmt;

use super::expression::Key;

/// Which columns a projection keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Only these columns.
    Include(Vec<Key>),
    /// Every known column except these.
    Exclude(Vec<Key>),
}

/// A parsed projection; `None` selects every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection(pub Option<ProjectionKind>);

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// The sorted field.
    pub key: Key,
    /// The direction.
    pub direction: Direction,
}

/// A parsed ORDER BY clause; `None` leaves order unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy(pub Option<Vec<Ordering>>);

/// A parsed row limit, at least 1 when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit(pub Option<u64>);

/// A parsed row offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset(pub Option<u64>);

fn write_keys(f: &mut fmt::Formatter<'_>, tag: &str, keys: &[Key]) -> fmt::Result {
    write!(f, "[\"{tag}\"")?;
    for key in keys {
        write!(f, ", {key}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("[\"PROJECTION\", null]"),
            Some(ProjectionKind::Include(keys)) => {
                f.write_str("[\"PROJECTION\", ")?;
                write_keys(f, "INCLUDE", keys)?;
                f.write_str("]")
            }
            Some(ProjectionKind::Exclude(keys)) => {
                f.write_str("[\"NPROJECTION\", ")?;
                write_keys(f, "EXCLUDE", keys)?;
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[\"{}\", {}]", self.direction.as_str(), self.key)
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("[\"ORDERBY\", null]"),
            Some(terms) => {
                f.write_str("[\"ORDERBY\"")?;
                for term in terms {
                    write!(f, ", {term}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "[\"LIMIT\", {n}]"),
            None => f.write_str("[\"LIMIT\", null]"),
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "[\"OFFSET\", {n}]"),
            None => f.write_str("[\"OFFSET\", null]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_display() {
        let include = Projection(Some(ProjectionKind::Include(vec![Key::column("a"), Key::Id])));
        assert_eq!(
            include.to_string(),
            r#"["PROJECTION", ["INCLUDE", ["KEY", "a"], ["ID"]]]"#
        );
        let exclude = Projection(Some(ProjectionKind::Exclude(vec![Key::column("b")])));
        assert_eq!(
            exclude.to_string(),
            r#"["NPROJECTION", ["EXCLUDE", ["KEY", "b"]]]"#
        );
        assert_eq!(Projection::default().to_string(), r#"["PROJECTION", null]"#);
    }

    #[test]
    fn test_absent_clauses_render_null() {
        assert_eq!(OrderBy::default().to_string(), r#"["ORDERBY", null]"#);
        assert_eq!(Limit::default().to_string(), r#"["LIMIT", null]"#);
        assert_eq!(Offset(Some(0)).to_string(), r#"["OFFSET", 0]"#);
    }
}
