use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func, Query};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult, LocationDao, UserDao};
use crate::db::entities::enums::{PropertyType, Role};
use crate::db::entities::lists::{Amenities, Highlights, PhotoUrls};
use crate::db::entities::{
    application, lease, location, prelude::Property, property, property_favorite,
    property_tenant, user,
};

const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct NewProperty {
    pub name: String,
    pub description: String,
    pub price_per_month: f64,
    pub security_deposit: f64,
    pub application_fee: f64,
    pub photo_urls: PhotoUrls,
    pub amenities: Amenities,
    pub highlights: Highlights,
    pub is_pets_allowed: bool,
    pub is_parking_included: bool,
    pub beds: i32,
    pub baths: f64,
    pub square_feet: i32,
    pub property_type: PropertyType,
    pub location_id: Uuid,
    pub manager_id: Uuid,
}

#[derive(Clone)]
pub struct PropertyDao {
    db: DatabaseConnection,
}

impl DaoBase for PropertyDao {
    type Entity = Property;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl PropertyDao {
    fn users(&self) -> UserDao {
        UserDao::new(&self.db)
    }

    /// Lists a property under a manager. Fails with `InvalidArgument` when the
    /// manager does not have the `MANAGER` role.
    pub async fn create_listing(&self, new: NewProperty) -> DaoResult<property::Model> {
        self.users().require_role(new.manager_id, Role::Manager).await?;

        let model = property::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            price_per_month: Set(new.price_per_month),
            security_deposit: Set(new.security_deposit),
            application_fee: Set(new.application_fee),
            photo_urls: Set(new.photo_urls),
            amenities: Set(new.amenities),
            highlights: Set(new.highlights),
            is_pets_allowed: Set(new.is_pets_allowed),
            is_parking_included: Set(new.is_parking_included),
            beds: Set(new.beds),
            baths: Set(new.baths),
            square_feet: Set(new.square_feet),
            property_type: Set(new.property_type),
            posted_date: Set(Utc::now().fixed_offset()),
            average_rating: Set(None),
            number_of_reviews: Set(None),
            location_id: Set(new.location_id),
            manager_id: Set(new.manager_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn location(&self, property: &property::Model) -> DaoResult<location::Model> {
        LocationDao::new(&self.db)
            .find_by_id(property.location_id)
            .await
    }

    pub async fn manager(&self, property: &property::Model) -> DaoResult<user::Model> {
        self.users().find_by_id(property.manager_id).await
    }

    pub async fn leases(&self, property: &property::Model) -> DaoResult<Vec<lease::Model>> {
        lease::Entity::find()
            .filter(lease::Column::PropertyId.eq(property.id))
            .order_by_desc(lease::Column::StartDate)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Lease", err))
    }

    pub async fn applications(
        &self,
        property: &property::Model,
    ) -> DaoResult<Vec<application::Model>> {
        application::Entity::find()
            .filter(application::Column::PropertyId.eq(property.id))
            .order_by_desc(application::Column::ApplicationDate)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Application", err))
    }

    pub async fn favorited_by(&self, property: &property::Model) -> DaoResult<Vec<user::Model>> {
        let fans = Query::select()
            .column(property_favorite::Column::UserId)
            .from(property_favorite::Entity)
            .and_where(property_favorite::Column::PropertyId.eq(property.id))
            .to_owned();
        user::Entity::find()
            .filter(user::Column::Id.in_subquery(fans))
            .order_by_asc(user::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("User", err))
    }

    pub async fn tenants(&self, property: &property::Model) -> DaoResult<Vec<user::Model>> {
        let residents = Query::select()
            .column(property_tenant::Column::UserId)
            .from(property_tenant::Entity)
            .and_where(property_tenant::Column::PropertyId.eq(property.id))
            .to_owned();
        user::Entity::find()
            .filter(user::Column::Id.in_subquery(residents))
            .order_by_asc(user::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("User", err))
    }

    pub async fn add_tenant(&self, property_id: Uuid, user_id: Uuid) -> DaoResult<()> {
        let link = property_tenant::ActiveModel {
            user_id: Set(user_id),
            property_id: Set(property_id),
            created_at: Set(Utc::now().fixed_offset()),
        };
        property_tenant::Entity::insert(link)
            .exec_without_returning(self.db())
            .await
            .map_err(|err| DaoLayerError::db("PropertyTenant", err))?;
        Ok(())
    }

    /// Returns whether the tenant was linked to the property.
    pub async fn remove_tenant(&self, property_id: Uuid, user_id: Uuid) -> DaoResult<bool> {
        let result = property_tenant::Entity::delete_many()
            .filter(property_tenant::Column::PropertyId.eq(property_id))
            .filter(property_tenant::Column::UserId.eq(user_id))
            .exec(self.db())
            .await
            .map_err(|err| DaoLayerError::db("PropertyTenant", err))?;
        Ok(result.rows_affected > 0)
    }

    /// Folds one rating (0 to 5) into the running average.
    pub async fn record_review(&self, id: Uuid, rating: f64) -> DaoResult<property::Model> {
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(DaoLayerError::invalid(format!(
                "rating must be between 0 and {MAX_RATING}, got {rating}"
            )));
        }

        // Both columns derive from the row's current values in a single UPDATE.
        let reviews = Expr::from(Func::coalesce([
            Expr::col(property::Column::NumberOfReviews),
            Expr::val(0),
        ]));
        let average = Expr::from(Func::coalesce([
            Expr::col(property::Column::AverageRating),
            Expr::val(0.0),
        ]));
        let result = Property::update_many()
            .col_expr(
                property::Column::AverageRating,
                average
                    .mul(reviews.clone())
                    .add(rating)
                    .div(reviews.clone().add(1)),
            )
            .col_expr(property::Column::NumberOfReviews, reviews.add(1))
            .col_expr(
                property::Column::UpdatedAt,
                Expr::val(Utc::now().fixed_offset()),
            )
            .filter(property::Column::Id.eq(id))
            .exec(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Property", err))?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::not_found("Property", format!("id={id}")));
        }
        self.find_by_id(id).await
    }
}
