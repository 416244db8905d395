//! Catalog listing over `products` joined with `categories`.

use storefront_core::filter::{contains_pattern, FilterValue};

use crate::dialect::Dialect;
use crate::models::product::ProductFilter;
use crate::paginator::PageQuery;

const LIST_COLUMNS: &str = "p.id, p.name, p.description, p.category_id, \
                            c.name AS category_name, p.price, p.stock";

const LIST_FROM: &str = "FROM products p \
                         JOIN categories c ON c.id = p.category_id \
                         WHERE p.deleted_at IS NULL";

pub struct ProductRepo;

impl ProductRepo {
    /// Build the product listing query and its filter arguments.
    ///
    /// Only filters that are present get a placeholder; the returned argument
    /// list still carries the blank ones, which the executor strips before
    /// binding so positions line up.
    pub fn list_query(dialect: Dialect, filter: &ProductFilter) -> (PageQuery, Vec<FilterValue>) {
        let category = contains_pattern(filter.category.as_deref().unwrap_or_default());
        let search = contains_pattern(filter.search.as_deref().unwrap_or_default());

        let mut conditions = String::new();
        let mut next = 1;
        for (column, pattern) in [("c.name", &category), ("p.name", &search)] {
            if pattern.is_empty() {
                continue;
            }
            conditions.push_str(" AND ");
            conditions.push_str(&contains_condition(dialect, column, &dialect.placeholder(next)));
            next += 1;
        }

        let query = PageQuery::new(
            format!("SELECT {LIST_COLUMNS} {LIST_FROM}{conditions}"),
            format!("SELECT COUNT(*) {LIST_FROM}{conditions}"),
        )
        .key_column("p.id");

        (query, vec![category.into(), search.into()])
    }
}

fn contains_condition(dialect: Dialect, column: &str, placeholder: &str) -> String {
    match dialect {
        Dialect::Postgres => format!("{column} ILIKE {placeholder}"),
        _ => format!("LOWER({column}) LIKE LOWER({placeholder})"),
    }
}
