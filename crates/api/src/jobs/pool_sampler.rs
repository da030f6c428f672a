//! Periodic connection pool sampling.

use sqlx::PgPool;

use super::scheduler::{Job, JobFrequency};

/// Feeds the database pool gauges (total, idle, busy connections) from
/// the live pool handle.
pub struct PoolSamplerJob {
    pool: PgPool,
}

impl PoolSamplerJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for PoolSamplerJob {
    fn name(&self) -> &'static str {
        "pool_sampler"
    }

    fn frequency(&self) -> JobFrequency {
        // Frequent enough that pool saturation shows up on dashboards
        // while it is happening.
        JobFrequency::Seconds(10)
    }

    async fn execute(&self) -> Result<(), String> {
        persistence::metrics::sample_pool(&self.pool);
        Ok(())
    }
}
