//! Background job scheduling infrastructure.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How often a job runs.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // Minutes is available for future jobs
pub enum JobFrequency {
    /// Every N seconds.
    Seconds(u64),
    /// Every N minutes.
    Minutes(u64),
    /// Once an hour.
    Hourly,
}

impl JobFrequency {
    pub fn duration(&self) -> Duration {
        let secs = match self {
            JobFrequency::Seconds(secs) => *secs,
            JobFrequency::Minutes(mins) => mins * 60,
            JobFrequency::Hourly => 3600,
        };
        Duration::from_secs(secs)
    }
}

/// A recurring background task.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Job name used in log output.
    fn name(&self) -> &'static str;

    /// How often the job should run.
    fn frequency(&self) -> JobFrequency;

    /// Run the job once. Errors are logged, never fatal.
    async fn execute(&self) -> Result<(), String>;
}

/// Runs registered jobs on their intervals until shutdown is signaled.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    stop_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            stop_tx,
            handles: Vec::new(),
        }
    }

    /// Add a job to the schedule.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawn one task per registered job.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting job scheduler");

        for job in &self.jobs {
            let task = run_job(Arc::clone(job), self.stop_tx.subscribe());
            self.handles.push(tokio::spawn(task));
        }
    }

    /// Signal shutdown to all jobs. Returns immediately.
    pub fn shutdown(&self) {
        info!("Stopping job scheduler");
        let _ = self.stop_tx.send(true);
    }

    /// Wait for all job tasks to finish, up to a timeout.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        match tokio::time::timeout(timeout, drain).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!(?timeout, "Job shutdown timed out"),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-job loop: tick, run, log, until the stop signal flips.
async fn run_job(job: Arc<dyn Job>, mut stop_rx: watch::Receiver<bool>) {
    let name = job.name();
    let mut interval = tokio::time::interval(job.frequency().duration());

    // The first tick fires immediately; skip it so jobs run one full
    // interval after startup.
    interval.tick().await;
    info!(job = name, frequency = ?job.frequency(), "Job scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => run_once(job.as_ref(), name).await,
            _ = stop_rx.changed() => {
                if *stop_rx.borrow() {
                    info!(job = name, "Job shutting down");
                    return;
                }
            }
        }
    }
}

async fn run_once(job: &dyn Job, name: &str) {
    let start = Instant::now();
    match job.execute().await {
        Ok(()) => {
            info!(
                job = name,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Job completed"
            );
        }
        Err(e) => {
            error!(
                job = name,
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "Job failed"
            );
        }
    }
}
