//! Background jobs and the scheduler that drives them.

mod pool_sampler;
mod scheduler;
mod session_cleanup;

pub use pool_sampler::PoolSamplerJob;
pub use scheduler::JobScheduler;
pub use session_cleanup::SessionCleanupJob;
