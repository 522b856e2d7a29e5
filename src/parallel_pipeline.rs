// THEORY:
// The parallel pipeline produces the same collage as `CollagePipeline`, but
// runs the six catalog filters concurrently. Filters never mutate their input,
// so all six can read one shared `Arc<Picture>` at the same time without any
// locking.
//
// Layout:
// - A `WorkerPool` owns a dispatcher task and a fixed set of worker tasks. The
//   dispatcher hands incoming `FilterTask`s to workers round-robin.
// - A worker moves the pixel work onto tokio's blocking pool, so long filters
//   never stall the async scheduler, and answers on the task's oneshot channel.
// - `ParallelPipeline::run` submits one task per tile and awaits them all.
//   Results come back in submission order, which is tile order, regardless of
//   which worker finished first.
//
// Edge detection inside a worker additionally splits its rows into bands
// (`convolve_parallel`), using the configured worker count.

use crate::core_modules::collage::assemble_collage;
use crate::core_modules::filters::{COLLAGE_FILTERS, Filter, FilterSettings};
use crate::core_modules::picture::Picture;
use crate::error::{Error, Result};
use crate::pipeline::{CollagePipeline, PipelineConfig};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct FilterTask {
    pub filter: Filter,
    pub source: Arc<Picture>,
    pub result_sender: oneshot::Sender<Picture>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<FilterTask>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `worker_count` workers. Must be called inside a tokio runtime.
    pub fn new(worker_count: usize, settings: FilterSettings) -> Self {
        let worker_count = worker_count.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<FilterTask>();
        let mut workers = Vec::with_capacity(worker_count);

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<FilterTask>())
            .unzip();

        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                if worker_senders[worker_idx].send(task).is_err() {
                    warn!(worker_idx, "worker channel closed, dropping task");
                }
                worker_idx = (worker_idx + 1) % worker_count;
            }
        });

        for (worker_idx, mut worker_receiver) in worker_receivers.into_iter().enumerate() {
            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    Self::process_task(worker_idx, task, settings).await;
                }
            });
            workers.push(worker);
        }

        Self {
            task_sender,
            workers,
        }
    }

    async fn process_task(worker_idx: usize, task: FilterTask, settings: FilterSettings) {
        let FilterTask {
            filter,
            source,
            result_sender,
        } = task;
        debug!(worker_idx, %filter, "applying filter");

        let outcome = tokio::task::spawn_blocking(move || filter.apply_with(&source, &settings)).await;
        match outcome {
            Ok(picture) => {
                // The submitter may have given up waiting; nothing to do then.
                let _ = result_sender.send(picture);
            }
            Err(err) => warn!(worker_idx, %filter, error = %err, "filter task failed"),
        }
    }

    /// Queues `filter` against `source` and waits for the result.
    pub async fn apply(&self, filter: Filter, source: Arc<Picture>) -> Result<Picture> {
        let (result_sender, result_receiver) = oneshot::channel();

        let task = FilterTask {
            filter,
            source,
            result_sender,
        };

        self.task_sender
            .send(task)
            .map_err(|_| Error::Worker("failed to send task to worker pool".into()))?;

        result_receiver
            .await
            .map_err(|_| Error::Worker(format!("no result for filter {filter}")))
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Closes the task queue and waits for every worker to drain.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

/// Collage pipeline that runs the catalog filters on a worker pool.
pub struct ParallelPipeline {
    pipeline: CollagePipeline,
    worker_pool: WorkerPool,
}

impl ParallelPipeline {
    /// Validates `config` and starts the worker pool. Must be called inside a
    /// tokio runtime.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let pipeline = CollagePipeline::new(config)?;
        let worker_pool = WorkerPool::new(
            pipeline.config().workers,
            pipeline.config().filter_settings(),
        );
        Ok(Self {
            pipeline,
            worker_pool,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    /// Runs the whole sequence with the filters spread over the pool.
    pub async fn run(&self, picture: Arc<Picture>) -> Result<Picture> {
        let tile = Arc::new(self.pipeline.prepare(&picture)?);

        let pending = COLLAGE_FILTERS
            .iter()
            .map(|&filter| self.worker_pool.apply(filter, Arc::clone(&tile)));
        let pics: [Picture; 6] = try_join_all(pending)
            .await?
            .try_into()
            .map_err(|pics: Vec<Picture>| {
                Error::Worker(format!("expected 6 tiles, got {}", pics.len()))
            })?;

        let collage = assemble_collage(&pics)?;
        info!(
            width = collage.width(),
            height = collage.height(),
            workers = self.worker_pool.worker_count(),
            "assembled collage"
        );
        Ok(collage)
    }

    pub async fn shutdown(self) {
        self.worker_pool.shutdown().await;
    }
}
