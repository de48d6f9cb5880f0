//! Atomic conditions of a `where` clause

use crate::error::{StoreError, StoreResult};
use crate::table::{Record, Table};
use std::fmt;

/// Comparison operators, applied to raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Lt,
    Eq,
    Ge,
    Le,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Eq => "==",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
        }
    }

    fn apply(&self, left: &str, right: &str) -> bool {
        match self {
            CompareOp::Gt => left > right,
            CompareOp::Lt => left < right,
            CompareOp::Eq => left == right,
            CompareOp::Ge => left >= right,
            CompareOp::Le => left <= right,
        }
    }
}

/// A single test against one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `<column><op><value>`
    Compare {
        column: String,
        op: CompareOp,
        value: String,
    },
    /// `<column>_in_(<v1>,...,<vN>)`
    In { column: String, values: Vec<String> },
    /// `<column>_like_<substring>`
    Like { column: String, pattern: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Compare(CompareOp),
    In,
    Like,
}

const OPERATORS: [(&str, OpKind); 7] = [
    ("==", OpKind::Compare(CompareOp::Eq)),
    (">=", OpKind::Compare(CompareOp::Ge)),
    ("<=", OpKind::Compare(CompareOp::Le)),
    (">", OpKind::Compare(CompareOp::Gt)),
    ("<", OpKind::Compare(CompareOp::Lt)),
    ("_like_", OpKind::Like),
    ("_in_", OpKind::In),
];

fn is_list(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('(') && text.ends_with(')')
}

/// Locate the operator of an atom: earliest occurrence wins, the longer
/// symbol wins at equal position. `_in_` only counts before a `(...)` list.
fn find_operator(atom: &str) -> Option<(usize, &'static str, OpKind)> {
    let mut best: Option<(usize, &'static str, OpKind)> = None;

    for (symbol, kind) in OPERATORS {
        let found = atom.match_indices(symbol).map(|(pos, _)| pos).find(|&pos| {
            kind != OpKind::In || is_list(&atom[pos + symbol.len()..])
        });

        if let Some(pos) = found {
            let better = match best {
                None => true,
                Some((best_pos, best_symbol, _)) => {
                    pos < best_pos || (pos == best_pos && symbol.len() > best_symbol.len())
                }
            };
            if better {
                best = Some((pos, symbol, kind));
            }
        }
    }

    best
}

impl Condition {
    /// Parse one atom such as `age>=30`, `name_like_ann` or `id_in_(1,2)`
    pub fn parse(atom: &str) -> StoreResult<Self> {
        let (pos, symbol, kind) =
            find_operator(atom).ok_or_else(|| StoreError::NoOperatorFound(atom.to_string()))?;

        let column = atom[..pos].to_string();
        let operand = &atom[pos + symbol.len()..];
        if column.is_empty() {
            return Err(StoreError::invalid(format!("missing column in condition {}", atom)));
        }

        Ok(match kind {
            OpKind::Compare(op) => Condition::Compare {
                column,
                op,
                value: operand.to_string(),
            },
            OpKind::In => Condition::In {
                column,
                values: operand[1..operand.len() - 1]
                    .split(',')
                    .map(str::to_string)
                    .collect(),
            },
            OpKind::Like => Condition::Like {
                column,
                pattern: operand.to_string(),
            },
        })
    }

    pub fn column(&self) -> &str {
        match self {
            Condition::Compare { column, .. }
            | Condition::In { column, .. }
            | Condition::Like { column, .. } => column,
        }
    }

    /// Resolve the column against a table's schema
    pub fn bind<'a>(&'a self, table: &Table) -> StoreResult<BoundCondition<'a>> {
        Ok(BoundCondition {
            position: table.column_position(self.column())?,
            condition: self,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { column, op, value } => {
                write!(f, "{}{}{}", column, op.symbol(), value)
            }
            Condition::In { column, values } => write!(f, "{}_in_({})", column, values.join(",")),
            Condition::Like { column, pattern } => write!(f, "{}_like_{}", column, pattern),
        }
    }
}

/// A condition whose column has been resolved to a position
#[derive(Debug, Clone, Copy)]
pub struct BoundCondition<'a> {
    position: usize,
    condition: &'a Condition,
}

impl BoundCondition<'_> {
    pub fn position(&self) -> usize {
        self.position
    }

    /// A record without a value at the column never matches
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.value(self.position) else {
            return false;
        };

        match self.condition {
            Condition::Compare { op, value, .. } => op.apply(actual, value),
            Condition::In { values, .. } => values.iter().any(|v| v == actual),
            Condition::Like { pattern, .. } => actual.contains(pattern.as_str()),
        }
    }
}
