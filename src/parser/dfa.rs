use crate::error::{out_of_bounds, Result};
use crate::symbol::Symbol;
use crate::Similar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
  pub origin: usize,
  pub target: usize,
  pub symbol: Symbol,
}

/// States deduplicated by [`Similar`], plus labelled transitions between
/// state indices.
#[derive(Debug, Clone)]
pub struct Dfa<T> {
  states: Vec<T>,
  transitions: Vec<Transition>,
}

impl<T> Default for Dfa<T> {
  fn default() -> Self {
    Dfa {
      states: vec![],
      transitions: vec![],
    }
  }
}

impl<T: Similar> Dfa<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn states(&self) -> &[T] {
    &self.states
  }

  pub fn transitions(&self) -> &[Transition] {
    &self.transitions
  }

  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  pub fn index_of(&self, state: &T) -> Option<usize> {
    self.states.iter().position(|s| s.is_similar(state))
  }

  /// Returns the index of a similar state if there is one, otherwise appends
  /// `state` and returns its new index.
  pub fn add_state(&mut self, state: T) -> usize {
    if let Some(index) = self.index_of(&state) {
      return index;
    }
    self.states.push(state);
    self.states.len() - 1
  }

  /// Removes the state at `index` together with every transition touching
  /// it. Transitions to higher states are renumbered.
  pub fn remove_state(&mut self, index: usize) -> Result<T> {
    if index >= self.states.len() {
      return Err(out_of_bounds("state", index, self.states.len()));
    }
    let state = self.states.remove(index);
    self.transitions.retain(|t| t.origin != index && t.target != index);
    for t in &mut self.transitions {
      if t.origin > index {
        t.origin -= 1;
      }
      if t.target > index {
        t.target -= 1;
      }
    }
    Ok(state)
  }

  /// Returns `false` if the transition already exists.
  pub fn connect(&mut self, origin: usize, target: usize, symbol: Symbol) -> bool {
    if self.find(origin, target, &symbol).is_some() {
      return false;
    }
    self.transitions.push(Transition {
      origin,
      target,
      symbol,
    });
    true
  }

  pub fn disconnect(
    &mut self,
    origin: usize,
    target: usize,
    symbol: &Symbol,
  ) -> Option<Transition> {
    let index = self.find(origin, target, symbol)?;
    Some(self.transitions.remove(index))
  }

  pub fn transitions_from(&self, origin: usize) -> impl Iterator<Item = &Transition> {
    self.transitions.iter().filter(move |t| t.origin == origin)
  }

  pub fn target(&self, origin: usize, symbol: &Symbol) -> Option<usize> {
    self.transitions_from(origin)
      .find(|t| &t.symbol == symbol)
      .map(|t| t.target)
  }

  fn find(&self, origin: usize, target: usize, symbol: &Symbol) -> Option<usize> {
    self.transitions.iter().position(|t| {
      t.origin == origin && t.target == target && &t.symbol == symbol
    })
  }
}
