mod field;
mod scalar;
mod where_clause;

pub use field::Field;
pub use scalar::{
    BoolFilter, DateTimeFilter, EnumFilter, EqualityFilter, FloatFilter, IntFilter, ListFilter,
    Mode, Nullable, OrderedFilter, ScalarFilter, StringFilter, UuidFilter,
};
pub use where_clause::Where;

pub(crate) use scalar::never;
