use thiserror::Error;

use crate::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{what} index {index} is out of bounds (len {len})")]
  OutOfBounds {
    what: &'static str,
    index: usize,
    len: usize,
  },
  #[error("automaton has not been initialized")]
  Uninitialized,
  #[error("automaton is already initialized")]
  AlreadyInitialized,
  #[error("symbol `{0}` is not declared in the grammar")]
  UndeclaredSymbol(Symbol),
  /// A symbol is declared, but with the other kind.
  #[error("symbol `{0}` is declared with a different kind")]
  KindMismatch(Symbol),
  #[error("table has no column for symbol `{0}`")]
  UnknownColumn(Symbol),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn out_of_bounds(
  what: &'static str,
  index: usize,
  len: usize,
) -> Error {
  Error::OutOfBounds {
    what,
    index,
    len,
  }
}
