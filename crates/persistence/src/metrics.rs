//! Query and pool instrumentation.
//!
//! Repositories wrap each statement in a [`QueryTimer`]; the job
//! scheduler samples pool occupancy through [`sample_pool`].

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times one database statement and reports it as a labelled histogram
/// sample.
///
/// ```ignore
/// let timer = QueryTimer::new("find_camp_by_id");
/// let result = sqlx::query_as::<_, CampEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    // Query names are compile-time literals, so labels never allocate.
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Reports the elapsed time under the query's label.
    pub fn record(self) {
        histogram!(
            "db_query_duration_seconds",
            "query" => self.query_name
        )
        .record(self.start.elapsed().as_secs_f64());
    }
}

/// Samples connection pool occupancy into gauges.
pub fn sample_pool(pool: &PgPool) {
    let total = pool.size() as f64;
    let idle = pool.num_idle() as f64;

    gauge!("db_pool_connections_total").set(total);
    gauge!("db_pool_connections_idle").set(idle);
    gauge!("db_pool_connections_busy").set((total - idle).max(0.0));
}
