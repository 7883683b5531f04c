use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, IdenStatic, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, Value, sea_query::NullOrdering,
};
use serde_json::Value as JsonValue;
use tracing::debug;
use uuid::Uuid;

use super::aggregate::{self, AggregateResult, Aggregates, GroupByArgs, GroupRow};
use super::args::FindArgs;
use super::base_traits::{HasIdActiveModel, RecordEntity, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};
use super::unique::UniqueKey;
use crate::db::filter::{Where, never};

pub type ModelOf<E> = <E as EntityTrait>::Model;
pub type ActiveModelOf<E> = <E as EntityTrait>::ActiveModel;
pub type ColumnOf<E> = <E as EntityTrait>::Column;

// SQLite rejects OFFSET without LIMIT.
const UNBOUNDED_LIMIT: u64 = i64::MAX as u64;

#[derive(Debug, serde::Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub total: Option<u64>,
}

pub struct DaoPager<D, F>
where
    D: DaoBase,
    F: Fn(Select<D::Entity>) -> Select<D::Entity> + Clone + Send,
{
    dao: D,
    page: u64,
    page_size: u64,
    order: Option<(ColumnOf<D::Entity>, Order)>,
    apply: F,
    done: bool,
}

impl<D, F> DaoPager<D, F>
where
    D: DaoBase,
    F: Fn(Select<D::Entity>) -> Select<D::Entity> + Clone + Send,
{
    pub async fn next_page(&mut self) -> DaoResult<Option<PaginatedResponse<ModelOf<D::Entity>>>> {
        if self.done {
            return Ok(None);
        }

        let response = self
            .dao
            .find(
                self.page,
                self.page_size,
                self.order.clone(),
                self.apply.clone(),
            )
            .await?;

        if !response.has_next {
            self.done = true;
        }
        self.page = self.page.saturating_add(1);

        Ok(Some(response))
    }
}

fn db_err<E: RecordEntity>(err: DbErr) -> DaoLayerError {
    DaoLayerError::db(E::NAME, err)
}

fn same_column<C: ColumnTrait>(a: &C, b: &C) -> bool {
    a.as_str() == b.as_str()
}

fn reversed(order: &Order) -> Order {
    match order {
        Order::Desc => Order::Asc,
        _ => Order::Desc,
    }
}

// NULL sorts above every value: last when ascending, first when descending.
fn nulls_for(order: &Order) -> NullOrdering {
    match order {
        Order::Desc => NullOrdering::First,
        _ => NullOrdering::Last,
    }
}

fn is_null(value: &Value) -> bool {
    *value == value.as_null()
}

enum Bound {
    Never,
    Always,
    When(Condition),
}

/// Rows that sort after `value` on `column`, or at it when `inclusive`,
/// following [`nulls_for`].
fn bound<C: ColumnTrait>(column: C, order: &Order, value: Value, inclusive: bool) -> Bound {
    match (order, is_null(&value), inclusive) {
        (Order::Desc, true, true) => Bound::Always,
        (Order::Desc, true, false) => Bound::When(Condition::all().add(column.is_not_null())),
        (Order::Desc, false, true) => Bound::When(Condition::all().add(column.lte(value))),
        (Order::Desc, false, false) => Bound::When(Condition::all().add(column.lt(value))),
        (_, true, true) => Bound::When(Condition::all().add(column.is_null())),
        (_, true, false) => Bound::Never,
        (_, false, inclusive) => {
            let past = if inclusive { column.gte(value) } else { column.gt(value) };
            let mut step = Condition::any().add(past);
            if column.def().is_null() {
                step = step.add(column.is_null());
            }
            Bound::When(step)
        }
    }
}

/// Rows that sort at or after `anchor` under `keys`, compared
/// lexicographically.
fn cursor_condition<M: ModelTrait>(
    keys: &[(ColumnOf<M::Entity>, Order)],
    anchor: &M,
) -> Condition {
    let last = keys.len().saturating_sub(1);
    let mut any = Condition::any();
    let mut branches = 0;
    for (index, (column, order)) in keys.iter().enumerate() {
        let prefix = keys[..index]
            .iter()
            .fold(Condition::all(), |all, (prefix, _)| {
                all.add(prefix.eq(anchor.get(*prefix)))
            });
        let branch = match bound(*column, order, anchor.get(*column), index == last) {
            Bound::Never => continue,
            Bound::Always if index == 0 => return Condition::all(),
            Bound::Always => prefix,
            Bound::When(step) => prefix.add(step),
        };
        any = any.add(branch);
        branches += 1;
    }
    if branches == 0 { never() } else { any }
}

/// Keeps the first row for every distinct combination of `columns`.
fn distinct_rows<M: ModelTrait>(rows: Vec<M>, columns: &[ColumnOf<M::Entity>]) -> Vec<M> {
    let mut seen: Vec<Vec<Value>> = Vec::new();
    rows.into_iter()
        .filter(|row| {
            let key: Vec<Value> = columns.iter().map(|column| row.get(*column)).collect();
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        })
        .collect()
}

pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: RecordEntity;
    const MAX_PAGE_SIZE: u64 = 100;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    async fn create(
        &self,
        data: impl IntoActiveModel<ActiveModelOf<Self::Entity>> + Send,
    ) -> DaoResult<ModelOf<Self::Entity>> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        active
            .insert(self.db())
            .await
            .map_err(db_err::<Self::Entity>)
    }

    async fn create_many<T>(&self, data: Vec<T>) -> DaoResult<u64>
    where
        T: IntoActiveModel<ActiveModelOf<Self::Entity>> + Send,
    {
        if data.is_empty() {
            return Ok(0);
        }

        let now = Utc::now().fixed_offset();
        let rows: Vec<ActiveModelOf<Self::Entity>> = data
            .into_iter()
            .map(|item| {
                let mut active = item.into_active_model();
                active.set_id(Uuid::new_v4());
                active.set_created_at(now);
                active.set_updated_at(now);
                active
            })
            .collect();
        let expected = rows.len() as u64;

        let inserted = Self::Entity::insert_many(rows)
            .exec_without_returning(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?;
        debug!(
            entity = Self::Entity::NAME,
            expected, inserted, "bulk insert finished"
        );
        Ok(inserted)
    }

    async fn find_unique<K>(&self, key: K) -> DaoResult<Option<ModelOf<Self::Entity>>>
    where
        K: UniqueKey<Self::Entity>,
    {
        Self::Entity::find()
            .filter(key.condition())
            .one(self.db())
            .await
            .map_err(db_err::<Self::Entity>)
    }

    async fn find_unique_or_fail<K>(&self, key: K) -> DaoResult<ModelOf<Self::Entity>>
    where
        K: UniqueKey<Self::Entity>,
    {
        let describe = key.describe();
        self.find_unique(key)
            .await?
            .ok_or_else(|| DaoLayerError::not_found(Self::Entity::NAME, describe))
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<ModelOf<Self::Entity>> {
        self.find_unique_or_fail(id).await
    }

    async fn find_first(
        &self,
        args: FindArgs<ColumnOf<Self::Entity>>,
    ) -> DaoResult<Option<ModelOf<Self::Entity>>> {
        let take = if args.take.is_some_and(|take| take < 0) { -1 } else { 1 };
        Ok(self.find_many(args.take(take)).await?.into_iter().next())
    }

    async fn find_first_or_fail(
        &self,
        args: FindArgs<ColumnOf<Self::Entity>>,
    ) -> DaoResult<ModelOf<Self::Entity>> {
        self.find_first(args)
            .await?
            .ok_or_else(|| DaoLayerError::not_found(Self::Entity::NAME, "first matching row"))
    }

    async fn find_many(
        &self,
        args: FindArgs<ColumnOf<Self::Entity>>,
    ) -> DaoResult<Vec<ModelOf<Self::Entity>>> {
        let FindArgs {
            filter,
            mut order_by,
            cursor,
            skip,
            take,
            distinct,
        } = args;
        let backwards = take.is_some_and(|take| take < 0);
        let limit = take.map(i64::unsigned_abs);

        let id_column = Self::Entity::id_column();
        if cursor.is_some() && !order_by.iter().any(|(column, _)| same_column(column, &id_column))
        {
            order_by.push((id_column, Order::Asc));
        }
        let effective: Vec<(ColumnOf<Self::Entity>, Order)> = order_by
            .into_iter()
            .map(|(column, order)| {
                let order = if backwards { reversed(&order) } else { order };
                (column, order)
            })
            .collect();

        let mut select = Self::Entity::find();
        if let Some(filter) = filter {
            select = select.filter(filter.into_condition());
        }
        if let Some(cursor) = cursor {
            let anchor = Self::Entity::find()
                .filter(id_column.eq(cursor))
                .one(self.db())
                .await
                .map_err(db_err::<Self::Entity>)?;
            let Some(anchor) = anchor else {
                return Ok(Vec::new());
            };
            select = select.filter(cursor_condition(&effective, &anchor));
        }
        for (column, order) in &effective {
            select = select.order_by_with_nulls(*column, order.clone(), nulls_for(order));
        }

        let mut rows = if distinct.is_empty() {
            if let Some(limit) = limit {
                select = select.limit(limit);
            }
            if skip > 0 {
                select = select.offset(skip);
                if limit.is_none() {
                    select = select.limit(UNBOUNDED_LIMIT);
                }
            }
            select.all(self.db()).await.map_err(db_err::<Self::Entity>)?
        } else {
            let rows = select.all(self.db()).await.map_err(db_err::<Self::Entity>)?;
            let limit = limit.map_or(usize::MAX, |limit| limit as usize);
            distinct_rows(rows, &distinct)
                .into_iter()
                .skip(skip as usize)
                .take(limit)
                .collect()
        };

        if backwards {
            rows.reverse();
        }
        Ok(rows)
    }

    async fn find(
        &self,
        page: u64,
        page_size: u64,
        order: Option<(ColumnOf<Self::Entity>, Order)>,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<PaginatedResponse<ModelOf<Self::Entity>>> {
        if page == 0 || page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(DaoLayerError::InvalidPagination { page, page_size });
        }

        let base = Self::Entity::find();
        let filtered = apply(base);
        let id_column = Self::Entity::id_column();
        let ordered = match order {
            Some((column, order)) if same_column(&column, &id_column) => {
                filtered.order_by(column, order)
            }
            Some((column, order)) => filtered.order_by(column, order).order_by_asc(id_column),
            None => filtered
                .order_by_desc(Self::Entity::created_at_column())
                .order_by_asc(id_column),
        };
        let fetch_size = page_size.saturating_add(1);
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let mut data = ordered
            .limit(fetch_size)
            .offset(offset)
            .all(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?;

        let has_next = data.len() > page_size as usize;
        if has_next {
            data.truncate(page_size as usize);
        }

        Ok(PaginatedResponse {
            data,
            page,
            page_size,
            has_next,
            total: None,
        })
    }

    fn find_iter<F>(
        &self,
        page_size: Option<u64>,
        order: Option<(ColumnOf<Self::Entity>, Order)>,
        apply: F,
    ) -> DaoPager<Self, F>
    where
        F: Fn(Select<Self::Entity>) -> Select<Self::Entity> + Clone + Send,
    {
        DaoPager {
            dao: self.clone(),
            page: 1,
            page_size: page_size.unwrap_or(Self::MAX_PAGE_SIZE),
            order,
            apply,
            done: false,
        }
    }

    async fn count(&self, filter: Option<Where<ColumnOf<Self::Entity>>>) -> DaoResult<u64> {
        let mut select = Self::Entity::find();
        if let Some(filter) = filter {
            select = select.filter(filter.into_condition());
        }
        select.count(self.db()).await.map_err(db_err::<Self::Entity>)
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<ModelOf<Self::Entity>>
    where
        F: for<'a> FnOnce(&'a mut ActiveModelOf<Self::Entity>) + Send,
    {
        self.update_unique(id, apply).await
    }

    async fn update_unique<K, F>(&self, key: K, apply: F) -> DaoResult<ModelOf<Self::Entity>>
    where
        K: UniqueKey<Self::Entity>,
        F: for<'a> FnOnce(&'a mut ActiveModelOf<Self::Entity>) + Send,
    {
        let model = self.find_unique_or_fail(key).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        active
            .update(self.db())
            .await
            .map_err(db_err::<Self::Entity>)
    }

    /// Applies the same column assignments to every matching row and returns
    /// the number of rows changed.
    async fn update_many<F>(
        &self,
        filter: Option<Where<ColumnOf<Self::Entity>>>,
        apply: F,
    ) -> DaoResult<u64>
    where
        F: for<'a> FnOnce(&'a mut ActiveModelOf<Self::Entity>) + Send,
    {
        let mut active = <ActiveModelOf<Self::Entity> as Default>::default();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        let mut update = Self::Entity::update_many().set(active);
        if let Some(filter) = filter {
            update = update.filter(filter.into_condition());
        }
        let result = update
            .exec(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?;
        debug!(
            entity = Self::Entity::NAME,
            rows = result.rows_affected,
            "bulk update finished"
        );
        Ok(result.rows_affected)
    }

    /// Updates the row matching `key`, or inserts `create` when none does.
    /// Not atomic: a concurrent insert of the same key surfaces as a unique
    /// constraint violation.
    async fn upsert<K, T, F>(&self, key: K, create: T, apply: F) -> DaoResult<ModelOf<Self::Entity>>
    where
        K: UniqueKey<Self::Entity>,
        T: IntoActiveModel<ActiveModelOf<Self::Entity>> + Send,
        F: for<'a> FnOnce(&'a mut ActiveModelOf<Self::Entity>) + Send,
    {
        match self.find_unique(key).await? {
            Some(model) => {
                let mut active = model.into_active_model();
                apply(&mut active);
                active.set_updated_at(Utc::now().fixed_offset());
                active
                    .update(self.db())
                    .await
                    .map_err(db_err::<Self::Entity>)
            }
            None => self.create(create).await,
        }
    }

    /// Deletes the row with `id` and returns it as it was.
    async fn delete(&self, id: Uuid) -> DaoResult<ModelOf<Self::Entity>> {
        self.delete_unique(id).await
    }

    /// Deletes the row matching `key` and returns it as it was.
    async fn delete_unique<K>(&self, key: K) -> DaoResult<ModelOf<Self::Entity>>
    where
        K: UniqueKey<Self::Entity>,
    {
        let condition = key.condition();
        let model = self.find_unique_or_fail(key).await?;
        Self::Entity::delete_many()
            .filter(condition)
            .exec(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?;
        Ok(model)
    }

    async fn delete_many(&self, filter: Option<Where<ColumnOf<Self::Entity>>>) -> DaoResult<u64> {
        let mut delete = Self::Entity::delete_many();
        if let Some(filter) = filter {
            delete = delete.filter(filter.into_condition());
        }
        let result = delete
            .exec(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?;
        debug!(
            entity = Self::Entity::NAME,
            rows = result.rows_affected,
            "bulk delete finished"
        );
        Ok(result.rows_affected)
    }

    async fn aggregate(
        &self,
        filter: Option<Where<ColumnOf<Self::Entity>>>,
        aggregates: Aggregates<ColumnOf<Self::Entity>>,
    ) -> DaoResult<AggregateResult> {
        if aggregates.is_empty() {
            return Err(DaoLayerError::invalid(
                "aggregate needs at least one selector",
            ));
        }

        let mut select = Self::Entity::find().select_only();
        if let Some(filter) = filter {
            select = select.filter(filter.into_condition());
        }
        let row = aggregate::select_aggregates(select, &aggregates, Self::Entity::id_column())
            .into_json()
            .one(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?
            .unwrap_or(JsonValue::Null);

        Ok(aggregate::read_aggregates(&row, &aggregates))
    }

    async fn group_by(
        &self,
        args: GroupByArgs<ColumnOf<Self::Entity>>,
    ) -> DaoResult<Vec<GroupRow>> {
        args.validate()?;
        let GroupByArgs {
            by,
            filter,
            having,
            aggregates,
            order_by,
            skip,
            take,
        } = args;
        let count_column = Self::Entity::id_column();

        let mut select = Self::Entity::find().select_only();
        for column in &by {
            select = select.column(*column).group_by(*column);
        }
        if let Some(filter) = filter {
            select = select.filter(filter.into_condition());
        }
        select = aggregate::select_aggregates(select, &aggregates, count_column);
        if let Some(having) = having {
            select = select.having(having.into_condition(count_column));
        }
        if order_by.is_empty() {
            for column in &by {
                select = select.order_by(*column, Order::Asc);
            }
        } else {
            for (column, order) in order_by {
                select = select.order_by(column, order);
            }
        }
        if let Some(take) = take {
            select = select.limit(take);
        }
        if skip > 0 {
            select = select.offset(skip);
            if take.is_none() {
                select = select.limit(UNBOUNDED_LIMIT);
            }
        }

        let rows = select
            .into_json()
            .all(self.db())
            .await
            .map_err(db_err::<Self::Entity>)?;

        Ok(rows
            .iter()
            .map(|row| GroupRow {
                keys: by
                    .iter()
                    .map(|column| {
                        let value = row.get(column.as_str()).cloned().unwrap_or(JsonValue::Null);
                        (column.as_str().to_string(), value)
                    })
                    .collect(),
                aggregates: aggregate::read_aggregates(row, &aggregates),
            })
            .collect())
    }
}
