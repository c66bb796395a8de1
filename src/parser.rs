use log::{debug, warn};

use crate::error::{out_of_bounds, Error, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;

pub mod dfa;
pub mod item;
pub mod table;
mod state;

use dfa::Dfa;
use item::ItemSet;
use table::Table;

/// LR(0) automaton over a grammar whose rule 0 is the augmented start rule.
///
/// The automaton owns its grammar, so rules cannot be removed while items
/// refer to them.
#[derive(Debug)]
pub struct Lr0 {
  grammar: Grammar,
  dfa: Dfa<ItemSet>,
  initialized: bool,
}

impl Lr0 {
  pub fn new(grammar: Grammar) -> Result<Self> {
    grammar.validate()?;
    Ok(Lr0 {
      grammar,
      dfa: Dfa::new(),
      initialized: false,
    })
  }

  /// Builds the canonical collection. Does nothing for a grammar without
  /// rules, which leaves the automaton uninitialized.
  pub fn init(&mut self) -> Result<()> {
    if self.initialized {
      return Err(Error::AlreadyInitialized);
    }
    if self.grammar.rules().is_empty() {
      warn!("grammar has no rules, automaton left empty");
      return Ok(());
    }

    self.dfa = state::gen_states(&self.grammar);
    self.initialized = true;
    debug!("built LR(0) automaton: {} states, {} transitions",
      self.dfa.len(), self.dfa.transitions().len());
    Ok(())
  }

  pub fn is_initialized(&self) -> bool {
    self.initialized
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn dfa(&self) -> &Dfa<ItemSet> {
    &self.dfa
  }

  pub fn into_grammar(self) -> Grammar {
    self.grammar
  }

  pub fn closure(&self, set: &ItemSet) -> Result<ItemSet> {
    self.check(set)?;
    Ok(state::closure(&self.grammar, set))
  }

  pub fn goto(&self, set: &ItemSet, symbol: &Symbol) -> Result<ItemSet> {
    self.check(set)?;
    Ok(state::goto(&self.grammar, set, symbol))
  }

  pub fn table(&self) -> Result<Table> {
    if !self.initialized {
      return Err(Error::Uninitialized);
    }
    table::gen_table(&self.grammar, &self.dfa)
  }

  /// Items must point at existing rules, with the dot inside the rhs.
  fn check(&self, set: &ItemSet) -> Result<()> {
    if !self.initialized {
      return Err(Error::Uninitialized);
    }
    let rules = self.grammar.rules();
    for item in set.iter() {
      let rule = rules.get(item.rule_index)
        .ok_or_else(|| out_of_bounds("rule", item.rule_index, rules.len()))?;
      if item.dot_position > rule.rhs().len() {
        return Err(out_of_bounds("dot", item.dot_position, rule.rhs().len() + 1));
      }
    }
    Ok(())
  }
}
