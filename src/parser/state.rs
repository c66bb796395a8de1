use indexmap::IndexSet;
use log::trace;

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use super::dfa::Dfa;
use super::item::{Item, ItemSet};

/// Adds `A -> . γ` for every non-terminal `A` right after a dot, until no
/// more items appear. Items added on the way are scanned too.
pub(super) fn closure(
  grammar: &Grammar,
  set: &ItemSet,
) -> ItemSet {
  let mut result = set.clone();

  let mut i = 0;
  while let Some(&item) = result.get(i) {
    i += 1;
    let next = match item.next_symbol(grammar) {
      Some(sym) if !sym.is_terminal() => sym,
      _ => continue,
    };
    for (rule_index, rule) in grammar.rules().iter().enumerate() {
      if rule.lhs() == next {
        result.add_item(Item::new(rule_index, 0));
      }
    }
  }

  result
}

/// Advances the dot over `symbol` in every item that allows it.
pub(super) fn goto(
  grammar: &Grammar,
  set: &ItemSet,
  symbol: &Symbol,
) -> ItemSet {
  set.iter()
    .filter(|item| item.next_symbol(grammar) == Some(symbol))
    .map(|item| item.advance())
    .collect()
}

/// Builds the canonical LR(0) collection, starting from the closure of
/// `S' -> . ...` (rule 0).
pub(super) fn gen_states(
  grammar: &Grammar,
) -> Dfa<ItemSet> {
  let mut dfa = Dfa::new();
  if grammar.rules().is_empty() {
    return dfa;
  }

  let start = std::iter::once(Item::new(0, 0)).collect::<ItemSet>();
  let start = dfa.add_state(closure(grammar, &start));
  let mut worklist = vec![start];

  let mut current = 0;
  while current < worklist.len() {
    let origin = worklist[current];
    let symbols = dfa.states()[origin].iter()
      .filter_map(|item| item.next_symbol(grammar))
      .collect::<IndexSet<_>>();

    for symbol in symbols {
      let next = closure(grammar, &goto(grammar, &dfa.states()[origin], symbol));
      let known = dfa.len();
      let target = dfa.add_state(next);
      if target == known {
        trace!("state {} discovered from {} on `{}`", target, origin, symbol);
        worklist.push(target);
      }
      trace!("transition {} -> {} on `{}`", origin, target, symbol);
      dfa.connect(origin, target, symbol.clone());
    }

    current += 1;
  }

  dfa
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::symbol::{nonterm, term, var};
  use crate::Similar;
  use pretty_assertions::assert_eq;

  fn parens() -> Grammar {
    let mut g = Grammar::new(["S'", "S", "L"], ["$", "(", ")", "x", ","]);
    g.add_rule(var("S'"), vec![nonterm("S"), term("$")]);
    g.add_rule(var("S"), vec![term("("), nonterm("L"), term(")")]);
    g.add_rule(var("S"), vec![term("x")]);
    g.add_rule(var("L"), vec![nonterm("S")]);
    g.add_rule(var("L"), vec![nonterm("L"), term(","), nonterm("S")]);
    g
  }

  fn set(items: &[(usize, usize)]) -> ItemSet {
    items.iter().map(|&(r, d)| Item::new(r, d)).collect()
  }

  #[test]
  fn closure_of_start() {
    let g = parens();
    let c = closure(&g, &set(&[(0, 0)]));
    insta::assert_snapshot!(c.display(&g).to_string().trim_end(), @r###"
    S' -> . S $
    S -> . ( L )
    S -> . x
    "###);
  }

  #[test]
  fn closure_follows_added_items() {
    let g = parens();
    let c = closure(&g, &set(&[(1, 1)]));
    assert_eq!(
      c.iter().copied().collect::<Vec<_>>(),
      vec![Item::new(1, 1), Item::new(3, 0), Item::new(4, 0), Item::new(1, 0), Item::new(2, 0)]
    );
  }

  #[test]
  fn closure_is_idempotent() {
    let g = parens();
    for seed in &[set(&[(0, 0)]), set(&[(1, 1)]), set(&[(4, 2), (1, 3)])] {
      let once = closure(&g, seed);
      let twice = closure(&g, &once);
      assert!(once.is_similar(&twice));
    }
  }

  #[test]
  fn goto_drops_non_matching_items() {
    let g = parens();
    let i2 = closure(&g, &set(&[(1, 1)]));
    assert!(goto(&g, &i2, &nonterm("L")).is_similar(&set(&[(1, 2), (4, 1)])));
    assert!(goto(&g, &i2, &term("x")).is_similar(&set(&[(2, 1)])));
    assert!(goto(&g, &i2, &term("$")).is_empty());
    // kind matters, not just the name
    assert!(goto(&g, &i2, &term("L")).is_empty());
  }

  #[test]
  fn parens_collection() {
    let g = parens();
    let dfa = gen_states(&g);
    assert_eq!(dfa.len(), 10);
    assert_eq!(dfa.transitions().len(), 13);

    let expected = [
      set(&[(0, 0), (1, 0), (2, 0)]),
      set(&[(0, 1)]),
      set(&[(1, 1), (3, 0), (4, 0), (1, 0), (2, 0)]),
      set(&[(2, 1)]),
      set(&[(0, 2)]),
      set(&[(1, 2), (4, 1)]),
      set(&[(3, 1)]),
      set(&[(1, 3)]),
      set(&[(4, 2), (1, 0), (2, 0)]),
      set(&[(4, 3)]),
    ];
    for (i, state) in expected.iter().enumerate() {
      assert_eq!(dfa.index_of(state), Some(i));
    }
  }

  #[test]
  fn transitions_follow_dots() {
    let g = parens();
    let dfa = gen_states(&g);
    for t in dfa.transitions() {
      let origin = &dfa.states()[t.origin];
      assert!(origin.iter().any(|item| item.next_symbol(&g) == Some(&t.symbol)));
      let expected = closure(&g, &goto(&g, origin, &t.symbol));
      assert!(dfa.states()[t.target].is_similar(&expected));
    }
  }

  #[test]
  fn construction_is_deterministic() {
    let g = parens();
    let a = gen_states(&g);
    let b = gen_states(&g);
    assert_eq!(a.len(), b.len());
    assert_eq!(a.transitions(), b.transitions());
  }

  #[test]
  fn empty_grammar_has_no_states() {
    let g = Grammar::new(["S"], ["x"]);
    assert!(gen_states(&g).is_empty());
  }
}
