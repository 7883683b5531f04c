use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{location, prelude::Location, property};

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Clone)]
pub struct LocationDao {
    db: DatabaseConnection,
}

impl DaoBase for LocationDao {
    type Entity = Location;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl LocationDao {
    pub async fn create_location(&self, new: NewLocation) -> DaoResult<location::Model> {
        let model = location::ActiveModel {
            address: Set(new.address),
            city: Set(new.city),
            state: Set(new.state),
            country: Set(new.country),
            postal_code: Set(new.postal_code),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn properties(&self, location: &location::Model) -> DaoResult<Vec<property::Model>> {
        property::Entity::find()
            .filter(property::Column::LocationId.eq(location.id))
            .order_by_asc(property::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Property", err))
    }

    /// Case-insensitive match on the city name.
    pub async fn find_in_city(&self, city: &str) -> DaoResult<Vec<location::Model>> {
        location::Entity::find()
            .filter(city_equals(city))
            .order_by_asc(location::Column::Address)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Location", err))
    }
}

fn city_equals(city: &str) -> Condition {
    use sea_orm::sea_query::{Expr, ExprTrait, Func};

    let column = Expr::col((location::Entity, location::Column::City));
    Condition::all().add(Expr::expr(Func::lower(column)).eq(city.to_lowercase()))
}
