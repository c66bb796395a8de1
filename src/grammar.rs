use std::fmt::{self, Display, Formatter};

use indexmap::IndexSet;

use crate::error::{out_of_bounds, Error, Result};
use crate::symbol::{Symbol, SymbolKind, Variable};
use crate::Similar;

/// Rules are kept in insertion order; the position of a rule is the
/// `rule_index` that items refer to. Rule 0 is the augmented start rule.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
  title: Option<String>,
  vars: IndexSet<Symbol>,
  terminals: IndexSet<Symbol>,
  rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  lhs: Variable,
  rhs: Vec<Symbol>,
}

impl Rule {
  pub fn new(
    lhs: Variable,
    rhs: impl IntoIterator<Item = Symbol>,
  ) -> Self {
    Rule {
      lhs,
      rhs: rhs.into_iter().collect(),
    }
  }

  pub fn lhs(&self) -> &Variable {
    &self.lhs
  }

  pub fn rhs(&self) -> &[Symbol] {
    &self.rhs
  }
}

impl Similar for Rule {
  /// Same lhs and the same rhs sequence, symbol for symbol.
  fn is_similar(&self, other: &Rule) -> bool {
    self.lhs == other.lhs && self.rhs == other.rhs
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} ->", self.lhs)?;
    if self.rhs.is_empty() {
      return f.write_str(" ε");
    }
    for sym in &self.rhs {
      write!(f, " {}", sym)?;
    }
    Ok(())
  }
}

impl Grammar {
  pub fn new<V, T>(
    vars: V,
    terminals: T,
  ) -> Self
  where
    V: IntoIterator,
    V::Item: Into<String>,
    T: IntoIterator,
    T::Item: Into<String>,
  {
    Grammar {
      title: None,
      vars: vars.into_iter().map(Symbol::non_terminal).collect(),
      terminals: terminals.into_iter().map(Symbol::terminal).collect(),
      rules: vec![],
    }
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn title(&self) -> Option<&str> {
    self.title.as_deref()
  }

  pub fn vars(&self) -> &IndexSet<Symbol> {
    &self.vars
  }

  pub fn terminals(&self) -> &IndexSet<Symbol> {
    &self.terminals
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }

  pub fn rule(&self, index: usize) -> Option<&Rule> {
    self.rules.get(index)
  }

  /// Appends a rule unless an identical one is already present.
  ///
  /// Returns `false` for a duplicate.
  pub fn add_rule(
    &mut self,
    lhs: Variable,
    rhs: impl IntoIterator<Item = Symbol>,
  ) -> bool {
    let rule = Rule::new(lhs, rhs);
    if self.rules.iter().any(|r| r.is_similar(&rule)) {
      return false;
    }
    self.rules.push(rule);
    true
  }

  /// Removes exactly the rule at `index`. Every later rule shifts down by
  /// one, so items built against the old numbering become invalid.
  pub fn remove_rule(&mut self, index: usize) -> Result<Rule> {
    if index >= self.rules.len() {
      return Err(out_of_bounds("rule", index, self.rules.len()));
    }
    Ok(self.rules.remove(index))
  }

  /// Returns the number of rules actually added.
  pub fn concat_rules(
    &mut self,
    rules: impl IntoIterator<Item = Rule>,
  ) -> usize {
    let mut count = 0;
    for Rule { lhs, rhs } in rules {
      if self.add_rule(lhs, rhs) {
        count += 1;
      }
    }
    count
  }

  /// Checks that every symbol used by a rule is declared with its kind.
  pub fn validate(&self) -> Result<()> {
    for rule in &self.rules {
      self.check_declared(rule.lhs.symbol())?;
      for sym in &rule.rhs {
        self.check_declared(sym)?;
      }
    }
    Ok(())
  }

  fn check_declared(&self, sym: &Symbol) -> Result<()> {
    let (own, other) = match sym.kind() {
      SymbolKind::Terminal => (&self.terminals, &self.vars),
      SymbolKind::NonTerminal => (&self.vars, &self.terminals),
    };
    if own.contains(sym) {
      Ok(())
    } else if other.iter().any(|s| s.name() == sym.name()) {
      Err(Error::KindMismatch(sym.clone()))
    } else {
      Err(Error::UndeclaredSymbol(sym.clone()))
    }
  }
}

impl Display for Grammar {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match &self.title {
      Some(title) => writeln!(f, "Grammar : {}", title)?,
      None => writeln!(f, "Grammar")?,
    }
    for (i, rule) in self.rules.iter().enumerate() {
      writeln!(f, "{} : {}", i, rule)?;
    }
    Ok(())
  }
}
