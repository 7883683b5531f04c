use std::collections::BTreeMap;

use sea_orm::sea_query::{Alias, Expr, ExprTrait, Func};
use sea_orm::{ColumnTrait, Condition, EntityTrait, Select, QuerySelect, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::error::{DaoLayerError, DaoResult};
use crate::db::filter::{Where, never};

const COUNT_ALIAS: &str = "_count";

/// Aggregate selectors. Column lists may be empty; at least one selector
/// must be requested.
#[derive(Debug, Clone)]
pub struct Aggregates<C> {
    pub count: bool,
    pub min: Vec<C>,
    pub max: Vec<C>,
    pub sum: Vec<C>,
    pub avg: Vec<C>,
}

impl<C> Default for Aggregates<C> {
    fn default() -> Self {
        Self {
            count: false,
            min: Vec::new(),
            max: Vec::new(),
            sum: Vec::new(),
            avg: Vec::new(),
        }
    }
}

impl<C: ColumnTrait> Aggregates<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self) -> Self {
        self.count = true;
        self
    }

    pub fn min(mut self, column: C) -> Self {
        self.min.push(column);
        self
    }

    pub fn max(mut self, column: C) -> Self {
        self.max.push(column);
        self
    }

    pub fn sum(mut self, column: C) -> Self {
        self.sum.push(column);
        self
    }

    pub fn avg(mut self, column: C) -> Self {
        self.avg.push(column);
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.count
            && self.min.is_empty()
            && self.max.is_empty()
            && self.sum.is_empty()
            && self.avg.is_empty()
    }
}

/// Aggregate values keyed by column name. `min`/`max`/`sum`/`avg` over zero
/// rows come back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub count: Option<u64>,
    pub min: BTreeMap<String, JsonValue>,
    pub max: BTreeMap<String, JsonValue>,
    pub sum: BTreeMap<String, JsonValue>,
    pub avg: BTreeMap<String, JsonValue>,
}

impl AggregateResult {
    pub fn min_of<C: ColumnTrait>(&self, column: C) -> Option<&JsonValue> {
        self.min.get(column.as_str())
    }

    pub fn max_of<C: ColumnTrait>(&self, column: C) -> Option<&JsonValue> {
        self.max.get(column.as_str())
    }

    pub fn sum_of<C: ColumnTrait>(&self, column: C) -> Option<f64> {
        self.sum.get(column.as_str()).and_then(JsonValue::as_f64)
    }

    pub fn avg_of<C: ColumnTrait>(&self, column: C) -> Option<f64> {
        self.avg.get(column.as_str()).and_then(JsonValue::as_f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    fn apply(self, left: Expr, right: Expr) -> Expr {
        match self {
            CompareOp::Eq => left.eq(right),
            CompareOp::Ne => left.ne(right),
            CompareOp::Lt => left.lt(right),
            CompareOp::Lte => left.lte(right),
            CompareOp::Gt => left.gt(right),
            CompareOp::Gte => left.gte(right),
        }
    }
}

/// Post-grouping predicate over aggregate values.
#[derive(Debug, Clone)]
pub enum Having<C> {
    Count(CompareOp, i64),
    Min(C, CompareOp, Value),
    Max(C, CompareOp, Value),
    Sum(C, CompareOp, Value),
    Avg(C, CompareOp, f64),
    And(Vec<Having<C>>),
    Or(Vec<Having<C>>),
    Not(Box<Having<C>>),
}

impl<C: ColumnTrait> Having<C> {
    pub(crate) fn into_condition(self, count_column: C) -> Condition {
        let compare = |function, column, op: CompareOp, value: Expr| {
            Condition::all().add(op.apply(aggregate_expr(function, column), value))
        };
        match self {
            Having::Count(op, value) => {
                compare(Function::Count, count_column, op, Expr::val(value))
            }
            Having::Min(column, op, value) => compare(Function::Min, column, op, Expr::val(value)),
            Having::Max(column, op, value) => compare(Function::Max, column, op, Expr::val(value)),
            Having::Sum(column, op, value) => compare(Function::Sum, column, op, Expr::val(value)),
            Having::Avg(column, op, value) => compare(Function::Avg, column, op, Expr::val(value)),
            Having::And(items) => items.into_iter().fold(Condition::all(), |cond, item| {
                cond.add(item.into_condition(count_column))
            }),
            Having::Or(items) => {
                if items.is_empty() {
                    return never();
                }
                items.into_iter().fold(Condition::any(), |cond, item| {
                    cond.add(item.into_condition(count_column))
                })
            }
            Having::Not(inner) => Condition::all()
                .add(inner.into_condition(count_column))
                .not(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupByArgs<C> {
    pub by: Vec<C>,
    pub filter: Option<Where<C>>,
    pub having: Option<Having<C>>,
    pub aggregates: Aggregates<C>,
    pub order_by: Vec<(C, sea_orm::Order)>,
    pub skip: u64,
    pub take: Option<u64>,
}

impl<C: ColumnTrait> GroupByArgs<C> {
    pub fn by(columns: impl IntoIterator<Item = C>) -> Self {
        Self {
            by: columns.into_iter().collect(),
            filter: None,
            having: None,
            aggregates: Aggregates::default(),
            order_by: Vec::new(),
            skip: 0,
            take: None,
        }
    }

    pub fn filter(mut self, filter: Where<C>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn having(mut self, having: Having<C>) -> Self {
        self.having = Some(having);
        self
    }

    pub fn aggregates(mut self, aggregates: Aggregates<C>) -> Self {
        self.aggregates = aggregates;
        self
    }

    pub fn order_by(mut self, column: C, order: sea_orm::Order) -> Self {
        self.order_by.push((column, order));
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    pub(crate) fn validate(&self) -> DaoResult<()> {
        if self.by.is_empty() {
            return Err(DaoLayerError::invalid(
                "group_by needs at least one `by` column",
            ));
        }
        for (column, _) in &self.order_by {
            if !self.by.iter().any(|by| by.as_str() == column.as_str()) {
                return Err(DaoLayerError::invalid(format!(
                    "cannot order groups by `{}`: column is not in `by`",
                    column.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// One group: its key columns and the aggregates computed over it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub keys: BTreeMap<String, JsonValue>,
    pub aggregates: AggregateResult,
}

impl GroupRow {
    pub fn key<C: ColumnTrait>(&self, column: C) -> Option<&JsonValue> {
        self.keys.get(column.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum Function {
    Count,
    Min,
    Max,
    Sum,
    Avg,
}

impl Function {
    fn prefix(self) -> &'static str {
        match self {
            Function::Count => "_count",
            Function::Min => "_min_",
            Function::Max => "_max_",
            Function::Sum => "_sum_",
            Function::Avg => "_avg_",
        }
    }

    fn alias<C: ColumnTrait>(self, column: C) -> String {
        format!("{}{}", self.prefix(), column.as_str())
    }
}

fn aggregate_expr<C: ColumnTrait>(function: Function, column: C) -> Expr {
    let col = Expr::col(column);
    match function {
        Function::Count => Func::count(col).into(),
        Function::Min => Func::min(col).into(),
        Function::Max => Func::max(col).into(),
        Function::Sum => Func::sum(col).into(),
        // integer averages would otherwise truncate on some backends
        Function::Avg => Func::cast_as(Func::avg(col), Alias::new("double precision")).into(),
    }
}

pub(crate) fn select_aggregates<E: EntityTrait>(
    mut select: Select<E>,
    aggregates: &Aggregates<E::Column>,
    count_column: E::Column,
) -> Select<E> {
    if aggregates.count {
        select = select.column_as(
            aggregate_expr(Function::Count, count_column),
            COUNT_ALIAS,
        );
    }
    let groups = [
        (Function::Min, &aggregates.min),
        (Function::Max, &aggregates.max),
        (Function::Sum, &aggregates.sum),
        (Function::Avg, &aggregates.avg),
    ];
    for (function, columns) in groups {
        for column in columns {
            select = select.column_as(
                aggregate_expr(function, *column),
                function.alias(*column),
            );
        }
    }
    select
}

pub(crate) fn read_aggregates<C: ColumnTrait>(
    row: &JsonValue,
    aggregates: &Aggregates<C>,
) -> AggregateResult {
    let value = |alias: &str| row.get(alias).cloned().unwrap_or(JsonValue::Null);
    let collect = |function: Function, columns: &[C]| -> BTreeMap<String, JsonValue> {
        columns
            .iter()
            .map(|column| (column.as_str().to_string(), value(&function.alias(*column))))
            .collect()
    };

    AggregateResult {
        count: aggregates
            .count
            .then(|| value(COUNT_ALIAS).as_u64().unwrap_or(0)),
        min: collect(Function::Min, &aggregates.min),
        max: collect(Function::Max, &aggregates.max),
        sum: collect(Function::Sum, &aggregates.sum),
        avg: collect(Function::Avg, &aggregates.avg),
    }
}
