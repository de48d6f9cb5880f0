//! Predicate module for `where` clauses
//!
//! A clause is `atom (combinator atom)*` with `and`/`or` combinators.
//! Every atom is evaluated by a full scan of the table, giving one ordered
//! result set per atom. The sets are then folded strictly left to right:
//!
//! ```text
//! a or b and c   ==>   intersect(union(a, b), c)
//! ```
//!
//! There is no precedence between `and` and `or`.

pub mod condition;

pub use condition::{BoundCondition, CompareOp, Condition};

use crate::error::{StoreError, StoreResult};
use crate::table::Table;
use crate::types::RecordId;
use std::collections::HashSet;
use std::fmt;

/// Boolean combinator joining two result sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn parse(token: &str) -> StoreResult<Self> {
        if token.eq_ignore_ascii_case("and") {
            Ok(Combinator::And)
        } else if token.eq_ignore_ascii_case("or") {
            Ok(Combinator::Or)
        } else {
            Err(StoreError::invalid(format!(
                "expected 'and' or 'or', found '{}'",
                token
            )))
        }
    }

    /// `or`: union, first-seen order. `and`: elements of `left` also in
    /// `right`, in `left`'s order.
    fn combine(&self, left: Vec<RecordId>, right: Vec<RecordId>) -> Vec<RecordId> {
        match self {
            Combinator::Or => {
                let mut seen: HashSet<RecordId> = left.iter().copied().collect();
                let mut out = left;
                out.extend(right.into_iter().filter(|id| seen.insert(*id)));
                out
            }
            Combinator::And => {
                let right: HashSet<RecordId> = right.into_iter().collect();
                left.into_iter().filter(|id| right.contains(id)).collect()
            }
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "and"),
            Combinator::Or => write!(f, "or"),
        }
    }
}

/// Parsed `where` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    first: Condition,
    rest: Vec<(Combinator, Condition)>,
}

impl WhereClause {
    /// Parse the tokens following the `where` keyword
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> StoreResult<Self> {
        let mut tokens = tokens.iter().map(|t| t.as_ref());

        let first = tokens
            .next()
            .ok_or_else(|| StoreError::invalid("empty where clause"))
            .and_then(Condition::parse)?;

        let mut rest = Vec::new();
        while let Some(token) = tokens.next() {
            let combinator = Combinator::parse(token)?;
            let atom = tokens.next().ok_or_else(|| {
                StoreError::invalid(format!("missing condition after '{}'", combinator))
            })?;
            rest.push((combinator, Condition::parse(atom)?));
        }

        Ok(Self { first, rest })
    }

    pub fn single(condition: Condition) -> Self {
        Self {
            first: condition,
            rest: Vec::new(),
        }
    }

    pub fn then(mut self, combinator: Combinator, condition: Condition) -> Self {
        self.rest.push((combinator, condition));
        self
    }

    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, c)| c))
    }

    /// Ids of the matching records, in table traversal order.
    ///
    /// All columns are resolved before the first scan, so an unknown
    /// column fails without evaluating anything.
    pub fn evaluate(&self, table: &Table) -> StoreResult<Vec<RecordId>> {
        let first = self.first.bind(table)?;
        let rest = self
            .rest
            .iter()
            .map(|(comb, cond)| cond.bind(table).map(|bound| (*comb, bound)))
            .collect::<StoreResult<Vec<_>>>()?;

        let mut acc = scan(table, &first);
        for (combinator, bound) in rest {
            acc = combinator.combine(acc, scan(table, &bound));
        }
        Ok(acc)
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (combinator, condition) in &self.rest {
            write!(f, " {} {}", combinator, condition)?;
        }
        Ok(())
    }
}

fn scan(table: &Table, condition: &BoundCondition<'_>) -> Vec<RecordId> {
    table
        .records()
        .filter(|r| condition.matches(r))
        .map(|r| r.id())
        .collect()
}

/// Records selected by an optional clause; no clause selects every record
pub fn matching_ids(table: &Table, clause: Option<&WhereClause>) -> StoreResult<Vec<RecordId>> {
    match clause {
        Some(clause) => clause.evaluate(table),
        None => Ok(table.records().map(|r| r.id()).collect()),
    }
}
