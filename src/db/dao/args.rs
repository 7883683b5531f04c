use sea_orm::{ColumnTrait, Order};
use uuid::Uuid;

use crate::db::filter::Where;

/// Arguments of `find_first` / `find_many`.
///
/// A negative `take` walks backwards from the cursor (or from the end when no
/// cursor is set); rows still come back in the requested order.
#[derive(Debug, Clone)]
pub struct FindArgs<C> {
    pub filter: Option<Where<C>>,
    pub order_by: Vec<(C, Order)>,
    pub cursor: Option<Uuid>,
    pub skip: u64,
    pub take: Option<i64>,
    pub distinct: Vec<C>,
}

impl<C> Default for FindArgs<C> {
    fn default() -> Self {
        Self {
            filter: None,
            order_by: Vec::new(),
            cursor: None,
            skip: 0,
            take: None,
            distinct: Vec::new(),
        }
    }
}

impl<C: ColumnTrait> FindArgs<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter; repeated calls are combined with `And`.
    pub fn filter(mut self, filter: Where<C>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
        self
    }

    pub fn order_by(mut self, column: C, order: Order) -> Self {
        self.order_by.push((column, order));
        self
    }

    pub fn cursor(mut self, id: Uuid) -> Self {
        self.cursor = Some(id);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: i64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn distinct(mut self, column: C) -> Self {
        self.distinct.push(column);
        self
    }
}
