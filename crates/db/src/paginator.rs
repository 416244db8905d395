//! Generic filtered/paginated list queries.
//!
//! A list endpoint supplies a base data query and a matching count query, both
//! written with one positional placeholder per filter that is actually
//! present. [`Paginator::execute`] normalizes the filter arguments, runs the
//! count query, then runs the data query with dialect-specific ordering and
//! window clauses, and assembles a [`PageResult`].

use std::future::Future;

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use storefront_core::context::RequestContext;
use storefront_core::filter::{normalize_filters, FilterValue};
use storefront_core::paging::{PageInfo, PageRequest, PageResult};

use crate::error::StoreError;
use crate::store::QueryPort;

/// The SQL for one paginated listing.
///
/// `data_sql` must not contain `ORDER BY`, `LIMIT` or `OFFSET`; they are
/// appended per dialect. `count_sql` must return a single integer and use the
/// same filters as `data_sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub data_sql: String,
    pub count_sql: String,
    pub order_by: Option<String>,
    pub key_column: Option<String>,
}

impl PageQuery {
    pub fn new(data_sql: impl Into<String>, count_sql: impl Into<String>) -> Self {
        Self {
            data_sql: data_sql.into(),
            count_sql: count_sql.into(),
            order_by: None,
            key_column: None,
        }
    }

    /// Explicit ordering, e.g. `"c.created_at DESC"`. Blank means none.
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        let order_by = order_by.into();
        self.order_by = (!order_by.trim().is_empty()).then_some(order_by);
        self
    }

    /// Primary-key column used as the default order and as a tiebreaker.
    pub fn key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = Some(key_column.into());
        self
    }
}

/// A paginated query failed part-way.
///
/// `info` carries whatever was known when the failure happened: after a
/// count failure only the paging inputs, after a data failure also `total`
/// and `max_page`.
#[derive(Debug, thiserror::Error)]
#[error("Paginated query failed on page {}: {source}", info.current_page)]
pub struct PageFailure {
    pub info: PageInfo,
    #[source]
    pub source: StoreError,
}

/// Runs [`PageQuery`]s against a [`QueryPort`].
pub struct Paginator;

impl Paginator {
    pub async fn execute<P, T>(
        port: &P,
        ctx: &RequestContext,
        request: &PageRequest,
        query: &PageQuery,
        args: Vec<FilterValue>,
    ) -> Result<PageResult<T>, PageFailure>
    where
        P: QueryPort,
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let args = normalize_filters(args);
        let info = PageInfo::pending(request);

        let total = match bounded(ctx, port.fetch_count(&query.count_sql, &args)).await {
            Ok(total) => total,
            Err(source) => return Err(PageFailure { info, source }),
        };
        let info = info.with_total(total);

        let sql = port.dialect().paginate(
            &query.data_sql,
            query.order_by.as_deref(),
            query.key_column.as_deref(),
            request.offset(),
            request.page_size(),
        );

        let records = match bounded(ctx, port.fetch_rows::<T>(&sql, &args)).await {
            Ok(records) => records,
            Err(source) => return Err(PageFailure { info, source }),
        };

        tracing::debug!(
            trace_id = %ctx.trace_id(),
            locale = ctx.locale().as_str(),
            total = info.total,
            page = info.current_page,
            rows = records.len(),
            "Paginated query executed"
        );

        Ok(PageResult::new(info, records))
    }
}

/// Await a store call under the request deadline.
pub async fn bounded<F, T, E>(ctx: &RequestContext, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StoreError>,
{
    ctx.within(fut).await?.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use storefront_core::context::Locale;

    use super::*;
    use crate::dialect::Dialect;

    /// Scripted [`QueryPort`] that records every call.
    struct FakePort {
        dialect: Dialect,
        count: Option<i64>,
        fail_rows: bool,
        delay: Option<Duration>,
        calls: Mutex<Vec<(String, Vec<FilterValue>)>>,
    }

    impl FakePort {
        fn new(count: Option<i64>) -> Self {
            Self {
                dialect: Dialect::Postgres,
                count,
                fail_rows: false,
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Vec<FilterValue>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn boom() -> StoreError {
        StoreError::Storage(sqlx::Error::Protocol("boom".into()))
    }

    #[async_trait]
    impl QueryPort for FakePort {
        fn dialect(&self) -> Dialect {
            self.dialect
        }

        async fn fetch_count(&self, sql: &str, args: &[FilterValue]) -> Result<i64, StoreError> {
            self.calls.lock().unwrap().push((sql.to_string(), args.to_vec()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.count.ok_or_else(boom)
        }

        async fn fetch_rows<T>(&self, sql: &str, args: &[FilterValue]) -> Result<Vec<T>, StoreError>
        where
            T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        {
            self.calls.lock().unwrap().push((sql.to_string(), args.to_vec()));
            if self.fail_rows {
                Err(boom())
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::with_timeout(Duration::from_secs(5), "test", Locale::En)
    }

    fn query() -> PageQuery {
        PageQuery::new(
            "SELECT p.id FROM products p WHERE p.name ILIKE $1",
            "SELECT COUNT(*) FROM products p WHERE p.name ILIKE $1",
        )
        .key_column("p.id")
    }

    #[tokio::test]
    async fn computes_metadata_and_window() {
        let port = FakePort::new(Some(41));
        let request = PageRequest::new(2, 10).unwrap();

        let page: PageResult<(i64,)> = Paginator::execute(
            &port,
            &ctx(),
            &request,
            &query(),
            vec![FilterValue::from("%tv%")],
        )
        .await
        .unwrap();

        assert_eq!(page.total, 41);
        assert_eq!(page.max_page, 5);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.page_size, 10);

        let calls = port.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].0,
            "SELECT p.id FROM products p WHERE p.name ILIKE $1 ORDER BY p.id LIMIT 10 OFFSET 10"
        );
    }

    #[tokio::test]
    async fn normalizes_arguments_for_both_queries() {
        let port = FakePort::new(Some(0));
        let request = PageRequest::default();

        let _: PageResult<(i64,)> = Paginator::execute(
            &port,
            &ctx(),
            &request,
            &query(),
            vec![
                FilterValue::from(""),
                FilterValue::from("%tv%"),
                FilterValue::from(Vec::<String>::new()),
            ],
        )
        .await
        .unwrap();

        for (_, args) in port.calls() {
            assert_eq!(args, vec![FilterValue::from("%tv%")]);
        }
    }

    #[tokio::test]
    async fn count_failure_short_circuits() {
        let port = FakePort::new(None);
        let request = PageRequest::new(3, 20).unwrap();

        let err = Paginator::execute::<_, (i64,)>(&port, &ctx(), &request, &query(), vec![])
            .await
            .unwrap_err();

        assert_eq!(port.calls().len(), 1, "data query must not run");
        assert_matches!(err.source, StoreError::Storage(_));
        assert_eq!(err.info.current_page, 3);
        assert_eq!(err.info.page_size, 20);
        assert_eq!(err.info.total, 0);
    }

    #[tokio::test]
    async fn data_failure_keeps_count_metadata() {
        let mut port = FakePort::new(Some(25));
        port.fail_rows = true;
        let request = PageRequest::new(1, 10).unwrap();

        let err = Paginator::execute::<_, (i64,)>(&port, &ctx(), &request, &query(), vec![])
            .await
            .unwrap_err();

        assert_eq!(err.info.total, 25);
        assert_eq!(err.info.max_page, 3);
    }

    #[tokio::test]
    async fn page_beyond_max_returns_no_records_with_true_totals() {
        let port = FakePort::new(Some(7));
        let request = PageRequest::new(9, 5).unwrap();

        let page: PageResult<(i64,)> =
            Paginator::execute(&port, &ctx(), &request, &query(), vec![])
                .await
                .unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total, 7);
        assert_eq!(page.max_page, 2);
        assert!(port.calls()[1].0.ends_with("LIMIT 5 OFFSET 40"));
    }

    #[tokio::test]
    async fn sqlserver_dialect_emits_offset_fetch() {
        let mut port = FakePort::new(Some(3));
        port.dialect = Dialect::SqlServer;
        let request = PageRequest::new(2, 2).unwrap();
        let query = PageQuery::new("SELECT c.cart_id FROM cart_items c", "SELECT COUNT(*) FROM cart_items c")
            .order_by("c.created_at DESC");

        let _: PageResult<(i64,)> = Paginator::execute(&port, &ctx(), &request, &query, vec![])
            .await
            .unwrap();

        assert_eq!(
            port.calls()[1].0,
            "SELECT c.cart_id FROM cart_items c ORDER BY c.created_at DESC OFFSET 2 ROWS FETCH NEXT 2 ROWS ONLY"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_aborts_with_timeout() {
        let mut port = FakePort::new(Some(1));
        port.delay = Some(Duration::from_secs(60));
        let ctx = RequestContext::with_timeout(Duration::from_millis(100), "slow", Locale::En);

        let err = Paginator::execute::<_, (i64,)>(&port, &ctx, &PageRequest::default(), &query(), vec![])
            .await
            .unwrap_err();

        assert_matches!(err.source, StoreError::Timeout);
    }

    #[test]
    fn blank_order_by_is_ignored() {
        let q = PageQuery::new("a", "b").order_by("  ");
        assert_eq!(q.order_by, None);
    }
}
