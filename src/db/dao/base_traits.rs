use sea_orm::EntityTrait;

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: uuid::Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
}

/// An entity managed through [`DaoBase`](super::DaoBase): UUID keyed and
/// timestamped. Implemented by `#[record]`.
pub trait RecordEntity:
    EntityTrait<
        Model: Send + Sync + sea_orm::IntoActiveModel<<Self as EntityTrait>::ActiveModel>,
        ActiveModel: HasIdActiveModel + TimestampedActiveModel + Default + Send + Sync,
    > + Send
    + Sync
{
    /// Name used in errors and logs.
    const NAME: &'static str;

    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
}
