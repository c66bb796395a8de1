use std::fmt::{self, Display, Formatter};

use indexmap::IndexSet;
use log::debug;

use crate::error::{out_of_bounds, Error, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use super::dfa::Dfa;
use super::item::ItemSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  Shift(usize),
  /// Reduce by the rule with this index.
  Reduce(usize),
  Goto(usize),
}

impl Display for Action {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Action::Shift(target) => write!(f, "S{}", target),
      Action::Reduce(rule) => write!(f, "R{}", rule),
      Action::Goto(target) => write!(f, "G{}", target),
    }
  }
}

/// Zero, one or several actions. More than one is a conflict.
pub type Cell = Vec<Action>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  pub terminals: Vec<Cell>,
  pub vars: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
  pub state: usize,
  pub symbol: Symbol,
  pub actions: Vec<Action>,
}

/// An LR(0) parse table: one row per automaton state, terminal columns
/// followed by non-terminal columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
  terminals: IndexSet<Symbol>,
  vars: IndexSet<Symbol>,
  rows: Vec<Row>,
}

impl Table {
  pub fn new(
    num_states: usize,
    terminals: IndexSet<Symbol>,
    vars: IndexSet<Symbol>,
  ) -> Self {
    let row = Row {
      terminals: vec![vec![]; terminals.len()],
      vars: vec![vec![]; vars.len()],
    };
    Table {
      rows: vec![row; num_states],
      terminals,
      vars,
    }
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn terminals(&self) -> &IndexSet<Symbol> {
    &self.terminals
  }

  pub fn vars(&self) -> &IndexSet<Symbol> {
    &self.vars
  }

  /// Column headers, terminals first.
  pub fn columns(&self) -> impl Iterator<Item = &Symbol> {
    self.terminals.iter().chain(self.vars.iter())
  }

  /// Appends `action` to the cell; an occupied cell becomes a conflict.
  pub fn add_action(
    &mut self,
    state: usize,
    symbol: &Symbol,
    action: Action,
  ) -> Result<()> {
    self.cell_mut(state, symbol)?.push(action);
    Ok(())
  }

  pub fn cell(&self, state: usize, symbol: &Symbol) -> Option<&[Action]> {
    let row = self.rows.get(state)?;
    let (columns, cells) = if symbol.is_terminal() {
      (&self.terminals, &row.terminals)
    } else {
      (&self.vars, &row.vars)
    };
    let (index, _) = columns.get_full(symbol)?;
    Some(cells[index].as_slice())
  }

  fn cell_mut(&mut self, state: usize, symbol: &Symbol) -> Result<&mut Cell> {
    let len = self.rows.len();
    let row = self.rows.get_mut(state)
      .ok_or_else(|| out_of_bounds("state", state, len))?;
    let (columns, cells) = if symbol.is_terminal() {
      (&self.terminals, &mut row.terminals)
    } else {
      (&self.vars, &mut row.vars)
    };
    let (index, _) = columns.get_full(symbol)
      .ok_or_else(|| Error::UnknownColumn(symbol.clone()))?;
    Ok(&mut cells[index])
  }

  pub fn conflicts(&self) -> Vec<Conflict> {
    let mut conflicts = vec![];
    for (state, row) in self.rows.iter().enumerate() {
      let cells = row.terminals.iter().zip(&self.terminals)
        .chain(row.vars.iter().zip(&self.vars));
      for (cell, symbol) in cells {
        if cell.len() > 1 {
          conflicts.push(Conflict {
            state,
            symbol: symbol.clone(),
            actions: cell.clone(),
          });
        }
      }
    }
    conflicts
  }

  pub fn is_conflict_free(&self) -> bool {
    self.rows.iter()
      .flat_map(|row| row.terminals.iter().chain(&row.vars))
      .all(|cell| cell.len() <= 1)
  }
}

impl Display for Table {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut lines = vec![];
    lines.push(
      std::iter::once("state".to_owned())
        .chain(self.columns().map(|sym| sym.to_string()))
        .collect::<Vec<_>>());
    for (state, row) in self.rows.iter().enumerate() {
      let cells = row.terminals.iter().chain(&row.vars).map(|cell| {
        if cell.is_empty() {
          "-".to_owned()
        } else {
          cell.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(" ")
        }
      });
      lines.push(std::iter::once(state.to_string()).chain(cells).collect());
    }

    let mut widths = vec![0; lines[0].len()];
    for line in &lines {
      for (w, s) in widths.iter_mut().zip(line) {
        *w = (*w).max(s.chars().count());
      }
    }
    for line in &lines {
      let mut out = String::new();
      for (w, s) in widths.iter().zip(line) {
        out.push_str(&format!("{:<w$} ", s, w = w));
      }
      writeln!(f, "{}", out.trim_end())?;
    }
    Ok(())
  }
}

/// Shifts and gotos from the transitions, then a reduce on every terminal
/// for each complete item. No lookahead is used.
pub(super) fn gen_table(
  grammar: &Grammar,
  dfa: &Dfa<ItemSet>,
) -> Result<Table> {
  let mut table = Table::new(
    dfa.len(), grammar.terminals().clone(), grammar.vars().clone());

  for t in dfa.transitions() {
    let action = if t.symbol.is_terminal() {
      Action::Shift(t.target)
    } else {
      Action::Goto(t.target)
    };
    table.add_action(t.origin, &t.symbol, action)?;
  }

  for (state, set) in dfa.states().iter().enumerate() {
    for item in set.iter().filter(|item| item.is_complete(grammar)) {
      for terminal in grammar.terminals() {
        table.add_action(state, terminal, Action::Reduce(item.rule_index))?;
      }
    }
  }

  for conflict in table.conflicts() {
    debug!("conflict in state {} on `{}`: {:?}",
      conflict.state, conflict.symbol, conflict.actions);
  }

  Ok(table)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::symbol::{nonterm, term};
  use pretty_assertions::assert_eq;

  fn table() -> Table {
    Table::new(
      2,
      vec![term("a"), term("b")].into_iter().collect(),
      vec![nonterm("A")].into_iter().collect())
  }

  #[test]
  fn add_action_accumulates() {
    let mut t = table();
    t.add_action(0, &term("a"), Action::Shift(1)).unwrap();
    assert_eq!(t.cell(0, &term("a")), Some(&[Action::Shift(1)][..]));
    assert!(t.is_conflict_free());

    t.add_action(0, &term("a"), Action::Reduce(2)).unwrap();
    assert_eq!(t.cell(0, &term("a")), Some(&[Action::Shift(1), Action::Reduce(2)][..]));
    assert!(!t.is_conflict_free());
    assert_eq!(t.conflicts(), vec![Conflict {
      state: 0,
      symbol: term("a"),
      actions: vec![Action::Shift(1), Action::Reduce(2)],
    }]);
  }

  #[test]
  fn add_action_rejects_unknown_cells() {
    let mut t = table();
    assert_eq!(
      t.add_action(2, &term("a"), Action::Shift(0)),
      Err(Error::OutOfBounds { what: "state", index: 2, len: 2 })
    );
    assert_eq!(
      t.add_action(0, &term("A"), Action::Shift(0)),
      Err(Error::UnknownColumn(term("A")))
    );
    assert_eq!(t.cell(0, &nonterm("a")), None);
    assert_eq!(t, table());
  }

  #[test]
  fn display() {
    let mut t = table();
    t.add_action(0, &term("a"), Action::Shift(1)).unwrap();
    t.add_action(0, &nonterm("A"), Action::Goto(1)).unwrap();
    t.add_action(1, &term("a"), Action::Reduce(0)).unwrap();
    t.add_action(1, &term("b"), Action::Reduce(0)).unwrap();
    t.add_action(1, &term("b"), Action::Reduce(1)).unwrap();
    insta::assert_snapshot!(t.to_string().trim_end(), @r###"
    state a  b     A
    0     S1 -     G1
    1     R0 R0 R1 -
    "###);
  }
}
