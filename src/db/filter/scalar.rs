//! Predicate variants per scalar kind.
//!
//! Each filter lowers to a sea-orm [`Condition`] against one column. Which
//! filter a column accepts is fixed by the typed [`Field`](super::Field)
//! handles each entity exposes.

use sea_orm::sea_query::{Alias, Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, Value};
use serde::Serialize;

const LIKE_ESCAPE: char = '\\';

/// Case sensitivity of the substring variants of [`StringFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Default,
    Insensitive,
}

pub trait ScalarFilter: Clone + std::fmt::Debug + Send + Sync {
    fn into_condition<C: ColumnTrait>(self, column: C) -> Condition;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringFilter {
    Equals(String),
    Not(String),
    In(Vec<String>),
    NotIn(Vec<String>),
    Lt(String),
    Lte(String),
    Gt(String),
    Gte(String),
    Contains { value: String, mode: Mode },
    StartsWith { value: String, mode: Mode },
    EndsWith { value: String, mode: Mode },
}

impl ScalarFilter for StringFilter {
    fn into_condition<C: ColumnTrait>(self, column: C) -> Condition {
        let expr = match self {
            StringFilter::Equals(value) => column.eq(value),
            StringFilter::Not(value) => column.ne(value),
            StringFilter::In(values) => column.is_in(values),
            StringFilter::NotIn(values) => column.is_not_in(values),
            StringFilter::Lt(value) => column.lt(value),
            StringFilter::Lte(value) => column.lte(value),
            StringFilter::Gt(value) => column.gt(value),
            StringFilter::Gte(value) => column.gte(value),
            StringFilter::Contains { value, mode } => {
                like(column, format!("%{}%", escape_like(&value)), mode)
            }
            StringFilter::StartsWith { value, mode } => {
                like(column, format!("{}%", escape_like(&value)), mode)
            }
            StringFilter::EndsWith { value, mode } => {
                like(column, format!("%{}", escape_like(&value)), mode)
            }
        };
        Condition::all().add(expr)
    }
}

/// Filters for columns with a total order: integers, floats and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderedFilter<T> {
    Equals(T),
    Not(T),
    In(Vec<T>),
    NotIn(Vec<T>),
    Lt(T),
    Lte(T),
    Gt(T),
    Gte(T),
    Between(T, T),
}

impl<T> ScalarFilter for OrderedFilter<T>
where
    T: Into<Value> + Clone + std::fmt::Debug + Send + Sync,
{
    fn into_condition<C: ColumnTrait>(self, column: C) -> Condition {
        let expr = match self {
            OrderedFilter::Equals(value) => column.eq(value),
            OrderedFilter::Not(value) => column.ne(value),
            OrderedFilter::In(values) => column.is_in(values),
            OrderedFilter::NotIn(values) => column.is_not_in(values),
            OrderedFilter::Lt(value) => column.lt(value),
            OrderedFilter::Lte(value) => column.lte(value),
            OrderedFilter::Gt(value) => column.gt(value),
            OrderedFilter::Gte(value) => column.gte(value),
            OrderedFilter::Between(min, max) => column.between(min, max),
        };
        Condition::all().add(expr)
    }
}

/// Filters for columns that only support equality: ids, booleans and enums.
#[derive(Debug, Clone, PartialEq)]
pub enum EqualityFilter<T> {
    Equals(T),
    Not(T),
    In(Vec<T>),
    NotIn(Vec<T>),
}

pub type IntFilter = OrderedFilter<i32>;
pub type FloatFilter = OrderedFilter<f64>;
pub type DateTimeFilter = OrderedFilter<sea_orm::entity::prelude::DateTimeWithTimeZone>;

pub type BoolFilter = EqualityFilter<bool>;
pub type UuidFilter = EqualityFilter<uuid::Uuid>;
pub type EnumFilter<E> = EqualityFilter<E>;

impl<T> ScalarFilter for EqualityFilter<T>
where
    T: Into<Value> + Clone + std::fmt::Debug + Send + Sync,
{
    fn into_condition<C: ColumnTrait>(self, column: C) -> Condition {
        let expr = match self {
            EqualityFilter::Equals(value) => column.eq(value),
            EqualityFilter::Not(value) => column.ne(value),
            EqualityFilter::In(values) => column.is_in(values),
            EqualityFilter::NotIn(values) => column.is_not_in(values),
        };
        Condition::all().add(expr)
    }
}

/// Filters for list columns stored as JSON arrays.
///
/// Elements are matched on their JSON encoding inside the array text, which
/// keeps the predicates portable between Postgres and SQLite.
#[derive(Debug, Clone, PartialEq)]
pub enum ListFilter<T> {
    Has(T),
    HasEvery(Vec<T>),
    HasSome(Vec<T>),
    IsEmpty(bool),
}

impl<T> ScalarFilter for ListFilter<T>
where
    T: Serialize + Clone + std::fmt::Debug + Send + Sync,
{
    fn into_condition<C: ColumnTrait>(self, column: C) -> Condition {
        match self {
            ListFilter::Has(item) => Condition::all().add(list_has(column, &item)),
            ListFilter::HasEvery(items) => items
                .iter()
                .fold(Condition::all(), |cond, item| cond.add(list_has(column, item))),
            ListFilter::HasSome(items) => {
                if items.is_empty() {
                    return never();
                }
                items
                    .iter()
                    .fold(Condition::any(), |cond, item| cond.add(list_has(column, item)))
            }
            ListFilter::IsEmpty(true) => {
                Condition::all().add(json_text(column).eq(Expr::val("[]")))
            }
            ListFilter::IsEmpty(false) => {
                Condition::all().add(json_text(column).ne(Expr::val("[]")))
            }
        }
    }
}

/// Wraps a filter for a nullable column.
#[derive(Debug, Clone, PartialEq)]
pub enum Nullable<F> {
    IsNull,
    IsNotNull,
    Value(F),
}

impl<F: ScalarFilter> ScalarFilter for Nullable<F> {
    fn into_condition<C: ColumnTrait>(self, column: C) -> Condition {
        match self {
            Nullable::IsNull => Condition::all().add(column.is_null()),
            Nullable::IsNotNull => Condition::all().add(column.is_not_null()),
            Nullable::Value(filter) => filter.into_condition(column),
        }
    }
}

/// A condition no row satisfies.
pub(crate) fn never() -> Condition {
    Condition::all().add(Expr::val(1).eq(Expr::val(2)))
}

pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn qualified<C: ColumnTrait>(column: C) -> Expr {
    Expr::col((column.entity_name(), column))
}

fn like<C: ColumnTrait>(column: C, pattern: String, mode: Mode) -> Expr {
    match mode {
        Mode::Default => qualified(column).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
        Mode::Insensitive => Expr::from(Func::lower(qualified(column)))
            .like(LikeExpr::new(pattern.to_lowercase()).escape(LIKE_ESCAPE)),
    }
}

fn json_text<C: ColumnTrait>(column: C) -> Expr {
    Expr::from(Func::cast_as(qualified(column), Alias::new("text")))
}

fn list_has<C: ColumnTrait, T: Serialize>(column: C, item: &T) -> Expr {
    match serde_json::to_string(item) {
        Ok(encoded) => json_text(column).like(
            LikeExpr::new(format!("%{}%", escape_like(&encoded))).escape(LIKE_ESCAPE),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "list filter element could not be encoded");
            Expr::val(1).eq(Expr::val(2))
        }
    }
}
