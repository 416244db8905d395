//! SQL dialect differences that matter for raw paginated queries.
//!
//! Bounded-window syntax is not portable: PostgreSQL, MySQL and SQLite accept
//! `LIMIT m OFFSET n`, while SQL Server requires an `ORDER BY` followed by
//! `OFFSET n ROWS FETCH NEXT m ROWS ONLY`. Placeholder syntax differs too.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
    SqlServer,
}

impl Dialect {
    /// Detect the dialect from a connection URL scheme.
    ///
    /// Returns `None` for schemes this crate does not know.
    pub fn detect(database_url: &str) -> Option<Self> {
        let scheme = database_url.split_once(':')?.0.to_ascii_lowercase();
        match scheme.as_str() {
            "postgres" | "postgresql" => Some(Dialect::Postgres),
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "sqlite" => Some(Dialect::Sqlite),
            "mssql" | "sqlserver" => Some(Dialect::SqlServer),
            _ => None,
        }
    }

    /// Positional placeholder for the `index`-th bound argument (1-based).
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
            Dialect::SqlServer => format!("@p{index}"),
        }
    }

    /// Whether the dialect uses `OFFSET .. ROWS FETCH NEXT .. ROWS ONLY`.
    pub fn uses_offset_fetch(&self) -> bool {
        matches!(self, Dialect::SqlServer)
    }

    /// Append ordering and the bounded window to a base `SELECT`.
    ///
    /// `order_by` is a bare expression list such as `"c.created_at DESC"`.
    /// `key_column` is appended as a tiebreaker (or used alone) so that rows
    /// with equal sort keys keep a stable position across pages.
    pub fn paginate(
        &self,
        base_sql: &str,
        order_by: Option<&str>,
        key_column: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> String {
        let order = match (order_by, key_column) {
            (Some(order), Some(key)) if order.trim() != key => Some(format!("{order}, {key}")),
            (Some(order), _) => Some(order.to_string()),
            (None, Some(key)) => Some(key.to_string()),
            (None, None) => None,
        };

        let mut sql = base_sql.trim_end().to_string();

        if self.uses_offset_fetch() {
            // SQL Server rejects OFFSET/FETCH without an ORDER BY.
            let order = order.unwrap_or_else(|| "(SELECT NULL)".to_string());
            sql.push_str(&format!(
                " ORDER BY {order} OFFSET {offset} ROWS FETCH NEXT {limit} ROWS ONLY"
            ));
        } else {
            if let Some(order) = order {
                sql.push_str(&format!(" ORDER BY {order}"));
            }
            sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }

        sql
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::SqlServer => "sqlserver",
        };
        f.write_str(name)
    }
}
