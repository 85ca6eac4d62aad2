use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use crate::{Error, Result, WithDType};

/// Processing elements per partition on the target accelerator.
pub const SPE_COUNT: usize = 32;
/// Partitions available to a single handle.
pub const SPA_COUNT: usize = 1;
/// On-chip scratchpad budget available to double-buffered kernels, in bytes.
pub const DB_MAX_SPM_BYTES: usize = 225_280; // 220K

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Ordered command stream of the accelerator.
///
/// `submit` hands a kernel launch to the stream and returns immediately;
/// completion is observed only through [`Queue::synchronize`]. No dispatch
/// path blocks on kernel completion.
pub struct Queue {
    tx: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl Queue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let worker = std::thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                job();
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    pub(crate) fn submit(&self, job: Job) -> Result<()> {
        match &self.tx {
            Some(tx) => tx
                .send(job)
                .map_err(|_| Error::ExecutionFailed("queue worker is gone".to_string())),
            None => Err(Error::ExecutionFailed(
                "queue is shutting down".to_string(),
            )),
        }
    }

    /// Block until all previously submitted work has run.
    pub fn synchronize(&self) -> Result<()> {
        let (done_tx, done_rx) = mpsc::channel();
        self.submit(Box::new(move || {
            let _ = done_tx.send(());
        }))?;
        done_rx
            .recv()
            .map_err(|_| Error::ExecutionFailed("queue worker exited during synchronize".to_string()))
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Opaque device address of a read-only operand buffer.
///
/// The host never dereferences it; it is forwarded verbatim inside the
/// kernel argument record.
#[derive(Debug, Clone, Copy)]
pub struct DevicePtr(*const ());

// Device addresses are plain words to the host.
unsafe impl Send for DevicePtr {}
unsafe impl Sync for DevicePtr {}

impl DevicePtr {
    pub fn new(ptr: *const ()) -> Self {
        Self(ptr)
    }

    pub fn from_host<T: WithDType>(data: &[T]) -> Self {
        Self(data.as_ptr() as *const ())
    }

    pub fn null() -> Self {
        Self(std::ptr::null())
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_raw(&self) -> *const () {
        self.0
    }
}

/// Opaque device address of a writable operand buffer.
#[derive(Debug, Clone, Copy)]
pub struct DevicePtrMut(*mut ());

unsafe impl Send for DevicePtrMut {}
unsafe impl Sync for DevicePtrMut {}

impl DevicePtrMut {
    pub fn new(ptr: *mut ()) -> Self {
        Self(ptr)
    }

    pub fn from_host_mut<T: WithDType>(data: &mut [T]) -> Self {
        Self(data.as_mut_ptr() as *mut ())
    }

    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_raw(&self) -> *mut () {
        self.0
    }
}

/// Caller handle: owns the execution queue an operation dispatches to, plus
/// the device geometry consumed by argument assembly.
pub struct Handle {
    queue: Queue,
    spe_count: usize,
    spa_count: usize,
}

impl Handle {
    pub fn new() -> Self {
        Self {
            queue: Queue::new(),
            spe_count: SPE_COUNT,
            spa_count: SPA_COUNT,
        }
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Rebind the handle to a different execution queue.
    pub fn set_queue(&mut self, queue: Queue) {
        self.queue = queue;
    }

    /// Block until all work dispatched through this handle has run.
    pub fn synchronize(&self) -> Result<()> {
        self.queue.synchronize()
    }

    pub fn spe_count(&self) -> usize {
        self.spe_count
    }

    pub fn spa_count(&self) -> usize {
        self.spa_count
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::new()
    }
}
