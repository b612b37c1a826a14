//! Incremental SQL text and parameter accumulation.

use crate::ast::{
    Comparison, Element, Key, Limit, Node, Offset, Operand, Operator, OrderBy, Selection,
};
use crate::dialect::Dialect;
use crate::error::{CompileError, CompileResult};
use crate::schema::Table;
use crate::sql_value::SqlValue;

use super::CompiledQuery;

/// Builds one statement's SQL text and its parameters side by side.
///
/// Every placeholder is pushed together with its value, so the number of
/// `?` in the text always equals the number of parameters.
pub struct SqlWriter<'a, D: Dialect + ?Sized> {
    dialect: &'a D,
    table: &'a Table,
    sql: String,
    params: Vec<SqlValue>,
}

impl<'a, D: Dialect + ?Sized> SqlWriter<'a, D> {
    /// Creates an empty writer for a statement on `table`.
    pub fn new(dialect: &'a D, table: &'a Table) -> Self {
        Self {
            dialect,
            table,
            sql: String::new(),
            params: vec![],
        }
    }

    /// Appends raw SQL text.
    pub fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends a quoted identifier.
    pub fn push_identifier(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
    }

    /// Appends the quoted table name.
    pub fn push_table(&mut self) {
        let table = self.table;
        self.push_identifier(table.name());
    }

    /// Appends a comma-separated list of quoted identifiers.
    pub fn push_identifiers<S: AsRef<str>>(&mut self, names: &[S]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_identifier(name.as_ref());
        }
    }

    /// Appends a placeholder bound to `value`.
    pub fn push_param(&mut self, value: SqlValue) {
        self.sql.push_str(SqlValue::placeholder());
        self.params.push(value);
    }

    /// Appends `?, ?, ...` bound to `values`.
    pub fn push_params<I: IntoIterator<Item = SqlValue>>(&mut self, values: I) {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_param(value);
        }
    }

    /// Appends ` WHERE ...` unless the selection matches every row.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when `$id` cannot be resolved to one column.
    pub fn push_where(&mut self, selection: &Selection) -> CompileResult<()> {
        if let Some(node) = selection.node() {
            self.push(" WHERE ");
            self.push_node(node, false)?;
        }
        Ok(())
    }

    /// Appends a selector node; nested logical groups are parenthesized.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when `$id` cannot be resolved to one column.
    pub fn push_node(&mut self, node: &Node, nested: bool) -> CompileResult<()> {
        let (separator, children) = match node {
            Node::Comparison(cmp) => return self.push_comparison(cmp),
            Node::And(children) => (" AND ", children),
            Node::Or(children) => (" OR ", children),
        };
        if children.is_empty() {
            // An empty conjunction is true, an empty disjunction false.
            self.push(if separator == " AND " { "1 = 1" } else { "1 = 0" });
            return Ok(());
        }
        let grouped = nested && children.len() > 1;
        if grouped {
            self.push("(");
        }
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.push_node(child, true)?;
        }
        if grouped {
            self.push(")");
        }
        Ok(())
    }

    fn push_comparison(&mut self, cmp: &Comparison) -> CompileResult<()> {
        let column = self.key_column(&cmp.key)?;
        match &cmp.operand {
            Operand::Value(value) if cmp.op.is_membership() => {
                self.push_set(&column, cmp.op, &[Element::Literal(value.clone())]);
            }
            Operand::Value(value) => self.push_comparison_text(&column, cmp.op, value),
            Operand::Values(elements) => self.push_set(&column, cmp.op, elements),
        }
        Ok(())
    }

    /// `col IN (?, ?)`, extended with ` OR col > ?` for predicate elements
    /// and negated as a whole for `$nin`.
    fn push_set(&mut self, column: &str, op: Operator, elements: &[Element]) {
        let literals: Vec<&SqlValue> = elements
            .iter()
            .filter_map(|e| match e {
                Element::Literal(v) => Some(v),
                Element::Predicate { .. } => None,
            })
            .collect();
        let predicates: Vec<(Operator, &SqlValue)> = elements
            .iter()
            .filter_map(|e| match e {
                Element::Predicate { op, value } => Some((*op, value)),
                Element::Literal(_) => None,
            })
            .collect();
        let negated = op == Operator::Nin;

        if predicates.is_empty() {
            self.push_identifier(column);
            self.push(if negated { " NOT IN (" } else { " IN (" });
            self.push_params(literals.into_iter().cloned());
            self.push(")");
            return;
        }

        let parts = usize::from(!literals.is_empty()) + predicates.len();
        if negated {
            self.push("NOT ");
        }
        if negated || parts > 1 {
            self.push("(");
        }
        let mut first = true;
        if !literals.is_empty() {
            self.push_identifier(column);
            self.push(" IN (");
            self.push_params(literals.into_iter().cloned());
            self.push(")");
            first = false;
        }
        for (inner, value) in predicates {
            if !first {
                self.push(" OR ");
            }
            first = false;
            self.push_comparison_text(column, inner, value);
        }
        if negated || parts > 1 {
            self.push(")");
        }
    }

    /// `col op ?`, or `IS [NOT] NULL` for equality against null.
    fn push_comparison_text(&mut self, column: &str, op: Operator, value: &SqlValue) {
        self.push_identifier(column);
        match (op, value) {
            (Operator::Eq, SqlValue::Null) => self.push(" IS NULL"),
            (Operator::Ne, SqlValue::Null) => self.push(" IS NOT NULL"),
            _ => {
                self.push(" ");
                self.push(op.as_sql());
                self.push(" ");
                self.push_param(value.clone());
            }
        }
    }

    /// Appends ` ORDER BY col ASC, ...` when terms are present.
    ///
    /// `$id` sorts by every primary-key column in turn.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::MissingPrimaryKey`] for `$id` on a table without one.
    pub fn push_order_by(&mut self, order_by: &OrderBy) -> CompileResult<()> {
        let Some(terms) = order_by.0.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        self.push(" ORDER BY ");
        let mut first = true;
        for term in terms {
            for column in self.key_columns(&term.key)? {
                if !first {
                    self.push(", ");
                }
                first = false;
                self.push_identifier(&column);
                self.push(" ");
                self.push(term.direction.as_str());
            }
        }
        Ok(())
    }

    /// Appends the dialect's paging clause, if any.
    pub fn push_limit_offset(&mut self, limit: Limit, offset: Offset) {
        if let Some(clause) = self.dialect.limit_offset(limit, offset) {
            self.push(" ");
            self.push(&clause);
        }
    }

    /// Resolves a key used as a single operand.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for `$id` on a table without a primary key
    /// or with a composite one.
    pub fn key_column(&self, key: &Key) -> CompileResult<String> {
        match key {
            Key::Column(name) => Ok(name.clone()),
            Key::Id => match self.table.primary_key_columns() {
                [column] => Ok(column.clone()),
                [] => Err(CompileError::MissingPrimaryKey {
                    table: String::from(self.table.name()),
                }),
                _ => Err(CompileError::CompositePrimaryKey {
                    table: String::from(self.table.name()),
                }),
            },
        }
    }

    /// Resolves a key to columns, expanding `$id` to every primary-key column.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::MissingPrimaryKey`] for `$id` on a table without one.
    pub fn key_columns(&self, key: &Key) -> CompileResult<Vec<String>> {
        match key {
            Key::Column(name) => Ok(vec![name.clone()]),
            Key::Id if self.table.primary_key_columns().is_empty() => {
                Err(CompileError::MissingPrimaryKey {
                    table: String::from(self.table.name()),
                })
            }
            Key::Id => Ok(self.table.primary_key_columns().to_vec()),
        }
    }

    /// Returns the statement's table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        self.table
    }

    /// Terminates the statement with `;` and returns it.
    #[must_use]
    pub fn finish(mut self) -> CompiledQuery {
        self.sql.push(';');
        CompiledQuery {
            sql: self.sql,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DeleteStatement, UpsertStatement};

    struct Plain;

    impl Dialect for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }

        fn identifier_quote(&self) -> char {
            '"'
        }

        fn insert_default_values(&self, table: &str) -> String {
            format!("INSERT INTO {table} DEFAULT VALUES")
        }

        fn upsert(&self, _: &Table, _: &UpsertStatement) -> CompileResult<CompiledQuery> {
            unreachable!()
        }
    }

    fn eq(column: &str, value: SqlValue) -> Node {
        Node::Comparison(Comparison {
            op: Operator::Eq,
            key: Key::column(column),
            operand: Operand::Value(value),
        })
    }

    #[test]
    fn test_nested_groups_are_parenthesized() {
        let table = Table::new("t");
        let node = Node::And(vec![
            eq("a", SqlValue::Int(1)),
            Node::Or(vec![eq("b", SqlValue::Int(2)), eq("c", SqlValue::Null)]),
        ]);
        let mut w = SqlWriter::new(&Plain, &table);
        w.push_node(&node, false).unwrap();
        let q = w.finish();
        assert_eq!(q.sql, r#""a" = ? AND ("b" = ? OR "c" IS NULL);"#);
        assert_eq!(q.params, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_single_child_group_is_not_parenthesized() {
        let table = Table::new("t");
        let node = Node::Or(vec![Node::And(vec![eq("a", SqlValue::Int(1))])]);
        let mut w = SqlWriter::new(&Plain, &table);
        w.push_node(&node, false).unwrap();
        assert_eq!(w.finish().sql, r#""a" = ?;"#);
    }

    #[test]
    fn test_set_with_predicates() {
        let table = Table::new("t");
        let elements = vec![
            Element::Literal(SqlValue::Int(1)),
            Element::Literal(SqlValue::Int(2)),
            Element::Predicate {
                op: Operator::Gt,
                value: SqlValue::Int(10),
            },
        ];
        let mut w = SqlWriter::new(&Plain, &table);
        w.push_set("a", Operator::In, &elements);
        assert_eq!(w.finish().sql, r#"("a" IN (?, ?) OR "a" > ?);"#);

        let mut w = SqlWriter::new(&Plain, &table);
        w.push_set("a", Operator::Nin, &elements);
        let q = w.finish();
        assert_eq!(q.sql, r#"NOT ("a" IN (?, ?) OR "a" > ?);"#);
        assert_eq!(q.params.len(), 3);
    }

    #[test]
    fn test_id_resolution() {
        let table = Table::new("t").primary_key(&["a", "b"]);
        let w = SqlWriter::new(&Plain, &table);
        assert_eq!(
            w.key_column(&Key::Id),
            Err(CompileError::CompositePrimaryKey {
                table: String::from("t")
            })
        );
        assert_eq!(
            w.key_columns(&Key::Id),
            Ok(vec![String::from("a"), String::from("b")])
        );

        let keyless = Table::new("log").primary_key::<&str>(&[]);
        let w = SqlWriter::new(&Plain, &keyless);
        assert!(matches!(
            w.key_column(&Key::Id),
            Err(CompileError::MissingPrimaryKey { .. })
        ));
    }

    #[test]
    fn test_default_delete() {
        let table = Table::new("t");
        let stmt = DeleteStatement {
            selection: Selection(Some(eq("a", SqlValue::Int(1)))),
            ..Default::default()
        };
        let q = Plain.delete(&table, &stmt).unwrap();
        assert_eq!(q.sql, r#"DELETE FROM "t" WHERE "a" = ?;"#);
    }
}
