//! Transaction boundary port.
//!
//! Transactional scope is an explicit wrapper around an operation rather than
//! an aspect: services hand the work to a [`TransactionBoundary`], which runs
//! it inside whatever transaction the adapter provides and decides on commit
//! or rollback from the returned result.

use crudhub_domain::error::{CrudError, PreconditionViolation};

/// Kind of transaction an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    /// Reads only; adapters may open a cheaper read-only transaction.
    ReadOnly,
    /// Reads and writes.
    ReadWrite,
}

/// Runs work inside a transaction.
pub trait TransactionBoundary: Send + Sync {
    /// Run `work` in a transaction of the given `mode`.
    ///
    /// Implementations must propagate the error returned by `work` unchanged.
    /// They may run `work` more than once (e.g. on serialization failures).
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or the adapter's own failure to
    /// begin or commit.
    fn execute(
        &self,
        mode: TransactionMode,
        work: &mut dyn FnMut() -> Result<(), CrudError>,
    ) -> Result<(), CrudError>;
}

/// Boundary that runs work directly, for callers already inside a
/// transaction or using stores without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransaction;

impl TransactionBoundary for NoTransaction {
    fn execute(
        &self,
        _mode: TransactionMode,
        work: &mut dyn FnMut() -> Result<(), CrudError>,
    ) -> Result<(), CrudError> {
        work()
    }
}

/// Run `op` through `boundary` and return its value.
///
/// # Errors
///
/// Returns the error of `op` or of the boundary, or
/// [`PreconditionViolation::TransactionNotExecuted`] when the boundary
/// returned successfully without running `op`.
pub fn in_transaction<B, R, F>(boundary: &B, mode: TransactionMode, mut op: F) -> Result<R, CrudError>
where
    B: TransactionBoundary + ?Sized,
    F: FnMut() -> Result<R, CrudError>,
{
    let mut output = None;
    boundary.execute(mode, &mut || {
        output = Some(op()?);
        Ok(())
    })?;
    output.ok_or_else(|| PreconditionViolation::TransactionNotExecuted.into())
}
