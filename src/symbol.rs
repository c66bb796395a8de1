use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
  Terminal,
  NonTerminal,
}

/// A grammar symbol. Two symbols are equal iff both kind and name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
  kind: SymbolKind,
  name: String,
}

impl Symbol {
  pub fn terminal(name: impl Into<String>) -> Self {
    Self {
      kind: SymbolKind::Terminal,
      name: name.into(),
    }
  }

  pub fn non_terminal(name: impl Into<String>) -> Self {
    Self {
      kind: SymbolKind::NonTerminal,
      name: name.into(),
    }
  }

  pub fn kind(&self) -> SymbolKind {
    self.kind
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_terminal(&self) -> bool {
    self.kind == SymbolKind::Terminal
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.name)
  }
}

/// A non-terminal in left-hand side position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(Symbol);

impl Variable {
  pub fn new(name: impl Into<String>) -> Self {
    Variable(Symbol::non_terminal(name))
  }

  pub fn symbol(&self) -> &Symbol {
    &self.0
  }

  pub fn name(&self) -> &str {
    self.0.name()
  }
}

impl From<Variable> for Symbol {
  fn from(var: Variable) -> Symbol {
    var.0
  }
}

impl PartialEq<Symbol> for Variable {
  fn eq(&self, other: &Symbol) -> bool {
    &self.0 == other
  }
}

impl Display for Variable {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    self.0.fmt(f)
  }
}

pub fn term(
  name: impl Into<String>,
) -> Symbol {
  Symbol::terminal(name)
}

pub fn nonterm(
  name: impl Into<String>,
) -> Symbol {
  Symbol::non_terminal(name)
}

pub fn var(
  name: impl Into<String>,
) -> Variable {
  Variable::new(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn equality_needs_kind_and_name() {
    assert_eq!(term("x"), term("x"));
    assert_ne!(term("S"), nonterm("S"));
    assert_ne!(nonterm("S"), nonterm("L"));
  }

  #[test]
  fn variable_is_a_non_terminal() {
    let s = var("S");
    assert_eq!(s, nonterm("S"));
    assert_eq!(Symbol::from(s).kind(), SymbolKind::NonTerminal);
  }
}
