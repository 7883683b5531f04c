use std::marker::PhantomData;

use sea_orm::{ColumnTrait, Value};
use serde::Serialize;

use super::{
    Where,
    scalar::{
        EqualityFilter, ListFilter, Mode, Nullable, OrderedFilter, ScalarFilter, StringFilter,
    },
};

/// A column of one entity bound to the filter kind its values support.
///
/// Entities expose these through their `fields` module, so a string column can
/// only be matched with a [`StringFilter`], a timestamp only with an
/// [`OrderedFilter`], and so on.
pub struct Field<C, F> {
    column: C,
    _filter: PhantomData<fn() -> F>,
}

impl<C: Copy, F> Clone for Field<C, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Copy, F> Copy for Field<C, F> {}

impl<C, F> Field<C, F> {
    pub const fn new(column: C) -> Self {
        Self {
            column,
            _filter: PhantomData,
        }
    }
}

impl<C: ColumnTrait, F: ScalarFilter> Field<C, F> {
    pub fn column(&self) -> C {
        self.column
    }

    pub fn matches(self, filter: F) -> Where<C> {
        Where::field(self.column, filter)
    }
}

impl<C: ColumnTrait> Field<C, StringFilter> {
    pub fn equals(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Equals(value.into()))
    }

    pub fn not(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Not(value.into()))
    }

    pub fn is_in<I, S>(self, values: I) -> Where<C>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matches(StringFilter::In(values.into_iter().map(Into::into).collect()))
    }

    pub fn not_in<I, S>(self, values: I) -> Where<C>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matches(StringFilter::NotIn(values.into_iter().map(Into::into).collect()))
    }

    pub fn lt(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Lt(value.into()))
    }

    pub fn lte(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Lte(value.into()))
    }

    pub fn gt(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Gt(value.into()))
    }

    pub fn gte(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Gte(value.into()))
    }

    pub fn contains(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Contains {
            value: value.into(),
            mode: Mode::Default,
        })
    }

    pub fn contains_insensitive(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::Contains {
            value: value.into(),
            mode: Mode::Insensitive,
        })
    }

    pub fn starts_with(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::StartsWith {
            value: value.into(),
            mode: Mode::Default,
        })
    }

    pub fn ends_with(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::EndsWith {
            value: value.into(),
            mode: Mode::Default,
        })
    }

    pub fn starts_with_insensitive(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::StartsWith {
            value: value.into(),
            mode: Mode::Insensitive,
        })
    }

    pub fn ends_with_insensitive(self, value: impl Into<String>) -> Where<C> {
        self.matches(StringFilter::EndsWith {
            value: value.into(),
            mode: Mode::Insensitive,
        })
    }
}

impl<C, T> Field<C, OrderedFilter<T>>
where
    C: ColumnTrait,
    T: Into<Value> + Clone + std::fmt::Debug + Send + Sync,
{
    pub fn equals(self, value: T) -> Where<C> {
        self.matches(OrderedFilter::Equals(value))
    }

    pub fn not(self, value: T) -> Where<C> {
        self.matches(OrderedFilter::Not(value))
    }

    pub fn is_in(self, values: impl IntoIterator<Item = T>) -> Where<C> {
        self.matches(OrderedFilter::In(values.into_iter().collect()))
    }

    pub fn lt(self, value: T) -> Where<C> {
        self.matches(OrderedFilter::Lt(value))
    }

    pub fn lte(self, value: T) -> Where<C> {
        self.matches(OrderedFilter::Lte(value))
    }

    pub fn gt(self, value: T) -> Where<C> {
        self.matches(OrderedFilter::Gt(value))
    }

    pub fn gte(self, value: T) -> Where<C> {
        self.matches(OrderedFilter::Gte(value))
    }

    pub fn between(self, min: T, max: T) -> Where<C> {
        self.matches(OrderedFilter::Between(min, max))
    }
}

impl<C, T> Field<C, EqualityFilter<T>>
where
    C: ColumnTrait,
    T: Into<Value> + Clone + std::fmt::Debug + Send + Sync,
{
    pub fn equals(self, value: T) -> Where<C> {
        self.matches(EqualityFilter::Equals(value))
    }

    pub fn not(self, value: T) -> Where<C> {
        self.matches(EqualityFilter::Not(value))
    }

    pub fn is_in(self, values: impl IntoIterator<Item = T>) -> Where<C> {
        self.matches(EqualityFilter::In(values.into_iter().collect()))
    }

    pub fn not_in(self, values: impl IntoIterator<Item = T>) -> Where<C> {
        self.matches(EqualityFilter::NotIn(values.into_iter().collect()))
    }
}

impl<C, T> Field<C, ListFilter<T>>
where
    C: ColumnTrait,
    T: Serialize + Clone + std::fmt::Debug + Send + Sync,
{
    pub fn has(self, item: T) -> Where<C> {
        self.matches(ListFilter::Has(item))
    }

    pub fn has_every(self, items: impl IntoIterator<Item = T>) -> Where<C> {
        self.matches(ListFilter::HasEvery(items.into_iter().collect()))
    }

    pub fn has_some(self, items: impl IntoIterator<Item = T>) -> Where<C> {
        self.matches(ListFilter::HasSome(items.into_iter().collect()))
    }

    pub fn is_empty(self, empty: bool) -> Where<C> {
        self.matches(ListFilter::IsEmpty(empty))
    }
}

impl<C: ColumnTrait, F: ScalarFilter> Field<C, Nullable<F>> {
    pub fn is_null(self) -> Where<C> {
        self.matches(Nullable::IsNull)
    }

    pub fn is_not_null(self) -> Where<C> {
        self.matches(Nullable::IsNotNull)
    }

    pub fn value(self, filter: F) -> Where<C> {
        self.matches(Nullable::Value(filter))
    }
}
