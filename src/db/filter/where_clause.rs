use sea_orm::{ColumnTrait, Condition};

use super::scalar::{ScalarFilter, never};

/// A predicate tree over the columns `C` of one entity.
///
/// `And(vec![])` matches every row and `Or(vec![])` matches none.
#[derive(Debug, Clone)]
pub enum Where<C> {
    Predicate { column: C, condition: Condition },
    And(Vec<Where<C>>),
    Or(Vec<Where<C>>),
    Not(Box<Where<C>>),
}

impl<C: ColumnTrait> Where<C> {
    pub fn field<F: ScalarFilter>(column: C, filter: F) -> Self {
        Where::Predicate {
            column,
            condition: filter.into_condition(column),
        }
    }

    pub fn all(items: impl IntoIterator<Item = Where<C>>) -> Self {
        Where::And(items.into_iter().collect())
    }

    pub fn any(items: impl IntoIterator<Item = Where<C>>) -> Self {
        Where::Or(items.into_iter().collect())
    }

    pub fn and(self, other: Where<C>) -> Self {
        match self {
            Where::And(mut items) => {
                items.push(other);
                Where::And(items)
            }
            this => Where::And(vec![this, other]),
        }
    }

    pub fn or(self, other: Where<C>) -> Self {
        match self {
            Where::Or(mut items) => {
                items.push(other);
                Where::Or(items)
            }
            this => Where::Or(vec![this, other]),
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Where::Not(inner) => *inner,
            this => Where::Not(Box::new(this)),
        }
    }

    /// Columns referenced anywhere in the tree, in first-seen order.
    pub fn columns(&self) -> Vec<C> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns(&self, out: &mut Vec<C>) {
        match self {
            Where::Predicate { column, .. } => {
                if !out.iter().any(|seen| seen.as_str() == column.as_str()) {
                    out.push(*column);
                }
            }
            Where::And(items) | Where::Or(items) => {
                for item in items {
                    item.collect_columns(out);
                }
            }
            Where::Not(inner) => inner.collect_columns(out),
        }
    }

    pub fn into_condition(self) -> Condition {
        match self {
            Where::Predicate { condition, .. } => condition,
            Where::And(items) => items
                .into_iter()
                .fold(Condition::all(), |cond, item| cond.add(item.into_condition())),
            Where::Or(items) => {
                if items.is_empty() {
                    return never();
                }
                items
                    .into_iter()
                    .fold(Condition::any(), |cond, item| cond.add(item.into_condition()))
            }
            Where::Not(inner) => Condition::all().add(inner.into_condition()).not(),
        }
    }
}
