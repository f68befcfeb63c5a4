use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use std::{
  panic::{self, AssertUnwindSafe},
  sync::Arc,
  thread,
};

type BoxFn = Box<dyn FnOnce() + Send>;

/// A pool of threads, fed by a shared queue. Tasks are run in the order they
/// are received by each worker, but there is no ordering between workers. So
/// two tasks submitted back to back may finish in either order.
pub struct ThreadPool {
  tx:      Sender<BoxFn>,
  pending: Arc<Pending>,
}

/// Default to 256 elements in the queue for a bounded thread pool.
pub const DEFAULT_LIMIT: usize = 256;

/// The number of tasks that have been submitted but not finished. Workers
/// notify `done` whenever this drops to zero.
#[derive(Default)]
struct Pending {
  count: Mutex<usize>,
  done:  Condvar,
}

impl Pending {
  fn add(&self) { *self.count.lock() += 1; }
  fn sub(&self) {
    let mut count = self.count.lock();
    *count -= 1;
    if *count == 0 {
      self.done.notify_all();
    }
  }
}

impl ThreadPool {
  /// Creates a thread pool with the given number of worker threads. A
  /// reasonable number should be chosen here. Anything too large will crash the
  /// program and/or host system.
  ///
  /// # Panics
  ///
  /// Panics if the number of workers is 0.
  pub fn new(name: &str, workers: u32) -> Self {
    ThreadPool::new_with_limit(name, workers, DEFAULT_LIMIT)
  }

  /// Creates a thread pool with the given number of worker threads.
  ///
  /// The `limit` is the size of the message queue. This is the amount of
  /// messages that can be sent before `execute` blocks.
  ///
  /// # Panics
  ///
  /// Panics if the number of workers is 0.
  pub fn new_with_limit(name: &str, workers: u32, limit: usize) -> Self {
    let (tx, rx) = crossbeam_channel::bounded(limit);
    ThreadPool::spawn(name, workers, tx, rx)
  }

  /// Creates a thread pool with no limit on the queue. `execute` never blocks,
  /// so this is the pool to use when the caller is a thread that must not
  /// stall, like the host's main thread.
  ///
  /// # Panics
  ///
  /// Panics if the number of workers is 0.
  pub fn new_unbounded(name: &str, workers: u32) -> Self {
    let (tx, rx) = crossbeam_channel::unbounded();
    ThreadPool::spawn(name, workers, tx, rx)
  }

  fn spawn(
    name: &str,
    workers: u32,
    tx: Sender<BoxFn>,
    rx: Receiver<BoxFn>,
  ) -> Self {
    if workers == 0 {
      panic!("cannot create a thread pool with no workers");
    }
    let pending = Arc::new(Pending::default());
    for _ in 0..workers {
      let rx = rx.clone();
      let pending = pending.clone();
      thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
          while let Ok(f) = rx.recv() {
            // A panicking task must not take the worker down with it.
            if panic::catch_unwind(AssertUnwindSafe(f)).is_err() {
              error!("task panicked in thread pool");
            }
            pending.sub();
          }
        })
        .unwrap_or_else(|e| panic!("could not spawn worker thread for pool {name}: {e}"));
    }
    ThreadPool { tx, pending }
  }

  /// Executes the given task on a random worker thread. For a bounded pool,
  /// this blocks if the internal queue is full.
  pub fn execute<F: FnOnce() + Send + 'static>(&self, f: F) {
    self.pending.add();
    if self.tx.send(Box::new(f)).is_err() {
      self.pending.sub();
      error!("thread pool unexpectedly closed");
    }
  }

  /// Returns the number of tasks that have been submitted, but have not
  /// finished yet.
  pub fn pending(&self) -> usize { *self.pending.count.lock() }

  /// Waits for all tasks to be completed. The calling thread sleeps until the
  /// last task finishes.
  pub fn wait(&self) {
    let mut count = self.pending.count.lock();
    while *count != 0 {
      self.pending.done.wait(&mut count);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::{Duration, Instant},
  };

  #[test]
  fn runs_everything() {
    let pool = ThreadPool::new("test", 4);
    let count = Arc::new(AtomicU32::new(0));
    for _ in 0..100 {
      let count = count.clone();
      pool.execute(move || {
        count.fetch_add(1, Ordering::SeqCst);
      });
    }
    pool.wait();
    assert_eq!(count.load(Ordering::SeqCst), 100);
    assert_eq!(pool.pending(), 0);
  }

  #[test]
  fn survives_panic() {
    let pool = ThreadPool::new("test", 1);
    pool.execute(|| panic!("oh no"));
    let count = Arc::new(AtomicU32::new(0));
    let c = count.clone();
    pool.execute(move || {
      c.fetch_add(1, Ordering::SeqCst);
    });
    pool.wait();
    assert_eq!(count.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn unbounded_never_blocks() {
    let pool = ThreadPool::new_unbounded("test", 1);
    let start = Instant::now();
    for _ in 0..20 {
      pool.execute(|| thread::sleep(Duration::from_millis(20)));
    }
    assert!(start.elapsed() < Duration::from_millis(100), "execute blocked for {:?}", start.elapsed());
    pool.wait();
    assert_eq!(pool.pending(), 0);
    assert!(start.elapsed() >= Duration::from_millis(400));
  }

  #[test]
  fn wait_with_nothing_pending() {
    let pool = ThreadPool::new("test", 2);
    pool.wait();
    assert_eq!(pool.pending(), 0);
  }

  #[test]
  #[should_panic]
  fn no_workers() { ThreadPool::new("test", 0); }
}
