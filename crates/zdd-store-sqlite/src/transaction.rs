//! The unit-of-work: one pooled connection, one transaction.

use rusqlite::{Transaction, TransactionBehavior};

use crate::{Pool, Result};

impl Pool {
  /// Run `op` inside a transaction on a single borrowed connection.
  ///
  /// Commits if `op` returns `Ok`. Otherwise rolls back and returns `op`'s
  /// error unchanged; a failing rollback is logged, never substituted for
  /// the original error. The connection goes back to the pool on every path.
  /// If `op` panics the transaction is dropped, which rolls it back, and the
  /// pool discards the connection.
  ///
  /// The transaction is `BEGIN IMMEDIATE`: the write lock is taken up front,
  /// so concurrent units of work on other connections queue behind it
  /// (bounded by the busy timeout) rather than racing.
  ///
  /// `op` only ever sees the transaction, never the pool, so units of work
  /// cannot nest.
  pub async fn with_transaction<F, R>(&self, op: F) -> Result<R>
  where
    F: FnOnce(&Transaction<'_>) -> Result<R> + Send + 'static,
    R: Send + 'static,
  {
    self.run(move |conn| run_in_transaction(conn, op)).await
  }
}

fn run_in_transaction<F, R>(conn: &mut rusqlite::Connection, op: F) -> Result<R>
where
  F: FnOnce(&Transaction<'_>) -> Result<R>,
{
  let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
  match op(&tx) {
    Ok(value) => {
      tx.commit()?;
      Ok(value)
    }
    Err(err) => {
      if let Err(rollback_err) = tx.rollback() {
        tracing::warn!(error = %rollback_err, cause = %err, "rollback failed");
      }
      Err(err)
    }
  }
}
