use std::fmt::{self, Display, Formatter};

use indexmap::IndexSet;

use crate::error::{out_of_bounds, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::Similar;

/// An LR(0) item: a rule with a dot somewhere in its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
  pub rule_index: usize,
  /// `0..=rhs.len()`
  pub dot_position: usize,
}

impl Item {
  pub fn new(rule_index: usize, dot_position: usize) -> Self {
    Item {
      rule_index,
      dot_position,
    }
  }

  /// The symbol right after the dot, `None` for a complete item.
  pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
    grammar.rule(self.rule_index)?.rhs().get(self.dot_position)
  }

  pub fn is_complete(&self, grammar: &Grammar) -> bool {
    grammar.rule(self.rule_index)
      .map_or(false, |rule| self.dot_position >= rule.rhs().len())
  }

  pub(crate) fn advance(self) -> Item {
    Item::new(self.rule_index, self.dot_position + 1)
  }

  pub fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayItem<'a> {
    DisplayItem {
      item: self,
      grammar,
    }
  }
}

impl Similar for Item {
  fn is_similar(&self, other: &Item) -> bool {
    self == other
  }
}

pub struct DisplayItem<'a> {
  item: &'a Item,
  grammar: &'a Grammar,
}

impl Display for DisplayItem<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let rule = match self.grammar.rule(self.item.rule_index) {
      Some(rule) => rule,
      None => return write!(f, "<rule {}>", self.item.rule_index),
    };
    write!(f, "{} ->", rule.lhs())?;
    for (i, sym) in rule.rhs().iter().enumerate() {
      if i == self.item.dot_position {
        f.write_str(" .")?;
      }
      write!(f, " {}", sym)?;
    }
    if self.item.dot_position >= rule.rhs().len() {
      f.write_str(" .")?;
    }
    Ok(())
  }
}

/// A set of distinct items that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
  items: IndexSet<Item>,
}

impl ItemSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns `false` if the item was already present.
  pub fn add_item(&mut self, item: Item) -> bool {
    self.items.insert(item)
  }

  pub fn contains(&self, item: &Item) -> bool {
    self.items.contains(item)
  }

  pub fn union_with(&mut self, other: &ItemSet) {
    for &item in other.iter() {
      self.add_item(item);
    }
  }

  /// Removes the item at `index`, keeping the order of the rest.
  pub fn remove_item(&mut self, index: usize) -> Result<Item> {
    let len = self.items.len();
    self.items.shift_remove_index(index)
      .ok_or_else(|| out_of_bounds("item", index, len))
  }

  pub fn get(&self, index: usize) -> Option<&Item> {
    self.items.get_index(index)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Item> {
    self.items.iter()
  }

  pub fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayItemSet<'a> {
    DisplayItemSet {
      set: self,
      grammar,
    }
  }
}

impl Similar for ItemSet {
  /// Set equality, ignoring insertion order.
  fn is_similar(&self, other: &ItemSet) -> bool {
    self.len() == other.len() && other.iter().all(|item| self.contains(item))
  }
}

impl std::iter::FromIterator<Item> for ItemSet {
  fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
    ItemSet {
      items: iter.into_iter().collect(),
    }
  }
}

pub struct DisplayItemSet<'a> {
  set: &'a ItemSet,
  grammar: &'a Grammar,
}

impl Display for DisplayItemSet<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    for item in self.set.iter() {
      writeln!(f, "{}", item.display(self.grammar))?;
    }
    Ok(())
  }
}
