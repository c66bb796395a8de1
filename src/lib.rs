pub mod error;
pub mod grammar;
pub mod parser;
pub mod symbol;

pub use error::{Error, Result};
pub use grammar::{Grammar, Rule};
pub use parser::dfa::{Dfa, Transition};
pub use parser::item::{Item, ItemSet};
pub use parser::table::{Action, Conflict, Table};
pub use parser::Lr0;
pub use symbol::{nonterm, term, var, Symbol, SymbolKind, Variable};

/// Structural equality used to deduplicate rules, items and automaton
/// states.
pub trait Similar {
  fn is_similar(&self, other: &Self) -> bool;
}

/// Validates `grammar` and builds its LR(0) automaton.
pub fn build(grammar: Grammar) -> Result<Lr0> {
  let mut lr = Lr0::new(grammar)?;
  lr.init()?;
  Ok(lr)
}
