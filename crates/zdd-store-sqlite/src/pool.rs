//! Connection pooling via [`deadpool_sqlite`].
//!
//! Connections are created lazily and checked on the way back in; one whose
//! worker panicked mid-call is discarded and replaced rather than handed out
//! again.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use deadpool_sqlite::{Manager, Object, PoolError, Runtime};

use crate::{
  Error, Result,
  schema::{DATABASE_PRAGMAS, SESSION_PRAGMAS},
};

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PoolConfig {
  /// SQLite file, or `:memory:`.
  pub path:            PathBuf,
  pub max_connections: usize,
  pub acquire_timeout: Duration,
  pub busy_timeout:    Duration,
}

impl PoolConfig {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path:            path.into(),
      max_connections: 8,
      acquire_timeout: Duration::from_secs(5),
      busy_timeout:    Duration::from_secs(5),
    }
  }

  pub fn in_memory() -> Self { Self::new(":memory:") }

  pub fn with_max_connections(mut self, n: usize) -> Self {
    self.max_connections = n;
    self
  }

  pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
    self.acquire_timeout = timeout;
    self
  }

  pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
    self.busy_timeout = timeout;
    self
  }

  pub fn is_in_memory(&self) -> bool { self.path == Path::new(":memory:") }

  /// Every in-memory connection is its own database, so an in-memory pool
  /// holds exactly one.
  fn effective_size(&self) -> usize {
    if self.is_in_memory() { 1 } else { self.max_connections.max(1) }
  }
}

// ─── Pool ────────────────────────────────────────────────────────────────────

/// Shared handle to the pool. Cloning is cheap.
#[derive(Clone)]
pub struct Pool {
  inner:           deadpool_sqlite::Pool,
  acquire_timeout: Duration,
  busy_timeout:    Duration,
}

impl Pool {
  /// Build the pool and open one connection up front, so a bad path fails
  /// here rather than on the first request.
  pub async fn open(config: PoolConfig) -> Result<Self> {
    let size = config.effective_size();
    let manager = Manager::from_config(
      &deadpool_sqlite::Config::new(config.path.clone()),
      Runtime::Tokio1,
    );
    let inner = deadpool_sqlite::Pool::builder(manager)
      .max_size(size)
      .wait_timeout(Some(config.acquire_timeout))
      .runtime(Runtime::Tokio1)
      .build()
      .map_err(|e| Error::Pool(e.to_string()))?;

    let pool = Self {
      inner,
      acquire_timeout: config.acquire_timeout,
      busy_timeout: config.busy_timeout,
    };
    pool
      .run(|conn| {
        conn.execute_batch(DATABASE_PRAGMAS)?;
        Ok(())
      })
      .await?;

    tracing::debug!(path = ?config.path, size, "opened connection pool");
    Ok(pool)
  }

  /// Open a single-connection in-memory pool, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    Self::open(PoolConfig::in_memory()).await
  }

  pub fn size(&self) -> usize { self.inner.status().max_size }

  /// Connections that can be checked out without waiting.
  pub fn idle(&self) -> usize {
    let status = self.inner.status();
    let unopened = status.max_size.saturating_sub(status.size);
    usize::try_from(status.available).unwrap_or(0) + unopened
  }

  /// Borrow a connection exclusively, waiting at most `acquire_timeout`.
  /// It goes back to the pool when the returned handle is dropped.
  pub async fn acquire(&self) -> Result<Object> {
    self.inner.get().await.map_err(|e| match e {
      PoolError::Timeout(_) => {
        let timeout = self.acquire_timeout;
        tracing::warn!(?timeout, "timed out acquiring pooled connection");
        Error::AcquireTimeout(timeout)
      }
      PoolError::Backend(e) => Error::Sqlite(e),
      PoolError::Closed => Error::PoolClosed,
      other => Error::Pool(other.to_string()),
    })
  }

  /// Run `f` against one borrowed connection. For single statements; use
  /// [`Pool::with_transaction`] when several writes must commit together.
  pub async fn run<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R> + Send + 'static,
    R: Send + 'static,
  {
    let conn = self.acquire().await?;
    let busy_timeout = self.busy_timeout;
    conn
      .interact(move |conn| {
        // Connection-scoped, and the pool may have opened this one just now.
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(SESSION_PRAGMAS)?;
        f(conn)
      })
      .await
      .map_err(|e| Error::Interact(e.to_string()))?
  }
}
