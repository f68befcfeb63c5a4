pub mod pool;

pub use pool::ThreadPool;
