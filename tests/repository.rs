use chrono::{Duration, Utc};
use sea_orm::{Order, Set};
use uuid::Uuid;

use rental_data::db::dao::{
    Aggregates, CompareOp, DaoBase, DaoContext, DaoLayerError, FindArgs, GroupByArgs, Having,
    NewLease,
};
use rental_data::db::entities::enums::{Amenity, LeaseStatus, Role};
use rental_data::db::entities::{location, property};
use rental_data::db::filter::Where;
use rental_data::test_helpers::{
    listing, memory_context, seed_lease, seed_location, seed_property, seed_user,
};

const CITIES: [&str; 5] = ["Boston", "Chicago", "Denver", "El Paso", "Fresno"];

async fn seed_cities(daos: &DaoContext) -> Vec<location::Model> {
    let mut seeded = Vec::new();
    for city in CITIES {
        seeded.push(seed_location(daos, city).await);
    }
    seeded
}

fn cities(rows: &[location::Model]) -> Vec<&str> {
    rows.iter().map(|row| row.city.as_str()).collect()
}

fn by_city() -> FindArgs<location::Column> {
    FindArgs::new().order_by(location::Column::City, Order::Asc)
}

#[tokio::test]
async fn cursor_starts_at_the_cursor_row() {
    let daos = memory_context().await;
    let seeded = seed_cities(&daos).await;
    let denver = seeded[2].id;

    let forward = daos
        .location()
        .find_many(by_city().cursor(denver).take(2))
        .await
        .unwrap();
    assert_eq!(cities(&forward), vec!["Denver", "El Paso"]);

    let skipped = daos
        .location()
        .find_many(by_city().cursor(denver).skip(1))
        .await
        .unwrap();
    assert_eq!(cities(&skipped), vec!["El Paso", "Fresno"]);
}

#[tokio::test]
async fn cursor_over_a_nullable_column_keeps_every_following_row() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    seed_property(&daos, "A", location.id, manager.id).await;
    seed_property(&daos, "B", location.id, manager.id).await;
    let rated = seed_property(&daos, "C", location.id, manager.id).await;
    daos.property().record_review(rated.id, 4.0).await.unwrap();

    for order in [Order::Asc, Order::Desc] {
        let by_rating = || {
            FindArgs::new()
                .order_by(property::Column::AverageRating, order.clone())
                .order_by(property::Column::Id, Order::Asc)
        };
        let all = daos.property().find_many(by_rating()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|row| row.name.as_str()).collect();
        match &order {
            Order::Desc => assert_eq!(names[2], "C", "{names:?}"),
            _ => assert_eq!(names[0], "C", "{names:?}"),
        }

        for (index, anchor) in all.iter().enumerate() {
            let after = daos
                .property()
                .find_many(by_rating().cursor(anchor.id))
                .await
                .unwrap();
            assert_eq!(after, all[index..].to_vec(), "after {}", anchor.name);

            let before = daos
                .property()
                .find_many(by_rating().cursor(anchor.id).take(-3))
                .await
                .unwrap();
            assert_eq!(before, all[..=index].to_vec(), "before {}", anchor.name);
        }
    }
}

#[tokio::test]
async fn negative_take_returns_preceding_rows_in_requested_order() {
    let daos = memory_context().await;
    let seeded = seed_cities(&daos).await;

    let before = daos
        .location()
        .find_many(by_city().cursor(seeded[2].id).take(-2))
        .await
        .unwrap();
    assert_eq!(cities(&before), vec!["Chicago", "Denver"]);

    let tail = daos.location().find_many(by_city().take(-2)).await.unwrap();
    assert_eq!(cities(&tail), vec!["El Paso", "Fresno"]);

    let last = daos
        .location()
        .find_first(by_city().take(-1))
        .await
        .unwrap()
        .map(|row| row.city);
    assert_eq!(last.as_deref(), Some("Fresno"));
}

#[tokio::test]
async fn unknown_cursor_yields_no_rows() {
    let daos = memory_context().await;
    seed_cities(&daos).await;

    let rows = daos
        .location()
        .find_many(by_city().cursor(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn empty_or_matches_nothing_and_empty_and_matches_everything() {
    let daos = memory_context().await;
    seed_cities(&daos).await;

    let none = daos.location().count(Some(Where::Or(vec![]))).await.unwrap();
    let all = daos.location().count(Some(Where::And(vec![]))).await.unwrap();

    assert_eq!(none, 0);
    assert_eq!(all, CITIES.len() as u64);
}

#[tokio::test]
async fn string_filters_compose() {
    let daos = memory_context().await;
    seed_cities(&daos).await;
    let city = location::fields::city();

    let rows = daos
        .location()
        .find_many(
            by_city().filter(
                city.starts_with("B")
                    .or(city.ends_with("no"))
                    .or(city.contains_insensitive("PAS")),
            ),
        )
        .await
        .unwrap();
    assert_eq!(cities(&rows), vec!["Boston", "El Paso", "Fresno"]);

    let rows = daos
        .location()
        .find_many(by_city().filter(city.is_in(["Denver", "Chicago"]).negate()))
        .await
        .unwrap();
    assert_eq!(cities(&rows), vec!["Boston", "El Paso", "Fresno"]);

    let rows = daos
        .location()
        .find_many(by_city().filter(city.gte("Denver")).filter(city.not("Fresno")))
        .await
        .unwrap();
    assert_eq!(cities(&rows), vec!["Denver", "El Paso"]);
}

#[tokio::test]
async fn city_lookup_ignores_case() {
    let daos = memory_context().await;
    seed_cities(&daos).await;

    let found = daos.location().find_in_city("DENVER").await.unwrap();
    assert_eq!(cities(&found), vec!["Denver"]);
}

#[tokio::test]
async fn distinct_keeps_first_row_per_value() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    for (name, beds) in [("a", 1), ("b", 2), ("c", 1), ("d", 3)] {
        let mut new = listing(name, location.id, manager.id);
        new.beds = beds;
        daos.property().create_listing(new).await.unwrap();
    }

    let rows = daos
        .property()
        .find_many(
            FindArgs::new()
                .order_by(property::Column::Name, Order::Asc)
                .distinct(property::Column::Beds)
                .skip(1),
        )
        .await
        .unwrap();

    let names: Vec<_> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["b", "d"]);
}

#[tokio::test]
async fn list_filters_match_json_arrays() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    let mut pool = listing("pool", location.id, manager.id);
    pool.amenities = [Amenity::Pool, Amenity::Gym].into_iter().collect();
    let mut gym = listing("gym", location.id, manager.id);
    gym.amenities = [Amenity::Gym].into_iter().collect();
    let bare = listing("bare", location.id, manager.id);
    for new in [pool, gym, bare] {
        daos.property().create_listing(new).await.unwrap();
    }
    let amenities = property::fields::amenities();
    let names = |rows: Vec<property::Model>| {
        let mut names: Vec<_> = rows.into_iter().map(|row| row.name).collect();
        names.sort();
        names
    };

    let with_pool = daos
        .property()
        .find_many(FindArgs::new().filter(amenities.has(Amenity::Pool)))
        .await
        .unwrap();
    assert_eq!(names(with_pool), vec!["pool"]);

    let with_both = daos
        .property()
        .find_many(FindArgs::new().filter(amenities.has_every([Amenity::Pool, Amenity::Gym])))
        .await
        .unwrap();
    assert_eq!(names(with_both), vec!["pool"]);

    let with_either = daos
        .property()
        .find_many(FindArgs::new().filter(amenities.has_some([Amenity::Pool, Amenity::Gym])))
        .await
        .unwrap();
    assert_eq!(names(with_either), vec!["gym", "pool"]);

    let empty = daos
        .property()
        .find_many(FindArgs::new().filter(amenities.is_empty(true)))
        .await
        .unwrap();
    assert_eq!(names(empty), vec!["bare"]);
}

#[tokio::test]
async fn aggregate_reports_every_selector() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    for (name, price) in [("a", 1000.0), ("b", 2000.0), ("c", 3000.0)] {
        let mut new = listing(name, location.id, manager.id);
        new.price_per_month = price;
        daos.property().create_listing(new).await.unwrap();
    }
    let price = property::Column::PricePerMonth;

    let result = daos
        .property()
        .aggregate(
            None,
            Aggregates::new()
                .count()
                .min(price)
                .max(price)
                .sum(price)
                .avg(price),
        )
        .await
        .unwrap();

    assert_eq!(result.count, Some(3));
    assert_eq!(result.min_of(price).and_then(|v| v.as_f64()), Some(1000.0));
    assert_eq!(result.max_of(price).and_then(|v| v.as_f64()), Some(3000.0));
    assert_eq!(result.sum_of(price), Some(6000.0));
    assert_eq!(result.avg_of(price), Some(2000.0));

    let filtered = daos
        .property()
        .aggregate(
            Some(property::fields::price_per_month().gt(1500.0)),
            Aggregates::new().count(),
        )
        .await
        .unwrap();
    assert_eq!(filtered.count, Some(2));

    let err = daos
        .property()
        .aggregate(None, Aggregates::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DaoLayerError::InvalidArgument(_)), "{err}");
}

#[tokio::test]
async fn group_by_filters_groups_with_having() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    for (name, beds) in [("a", 1), ("b", 2), ("c", 1), ("d", 3), ("e", 1), ("f", 2)] {
        let mut new = listing(name, location.id, manager.id);
        new.beds = beds;
        daos.property().create_listing(new).await.unwrap();
    }

    let rows = daos
        .property()
        .group_by(
            GroupByArgs::by([property::Column::Beds])
                .aggregates(Aggregates::new().count())
                .having(Having::Count(CompareOp::Gt, 1))
                .order_by(property::Column::Beds, Order::Desc),
        )
        .await
        .unwrap();

    let groups: Vec<_> = rows
        .iter()
        .map(|row| {
            (
                row.key(property::Column::Beds).and_then(|v| v.as_i64()),
                row.aggregates.count,
            )
        })
        .collect();
    assert_eq!(groups, vec![(Some(2), Some(2)), (Some(1), Some(3))]);

    let err = daos
        .property()
        .group_by(
            GroupByArgs::by([property::Column::Beds]).order_by(property::Column::Name, Order::Asc),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DaoLayerError::InvalidArgument(_)), "{err}");
}

#[tokio::test]
async fn bulk_writes_report_affected_rows() {
    let daos = memory_context().await;
    let rows: Vec<location::ActiveModel> = ["Reno", "Boise"]
        .into_iter()
        .map(|city| location::ActiveModel {
            address: Set("2 Side St".to_string()),
            city: Set(city.to_string()),
            state: Set("NV".to_string()),
            country: Set("US".to_string()),
            postal_code: Set("89501".to_string()),
            ..Default::default()
        })
        .collect();
    assert_eq!(daos.location().create_many(rows).await.unwrap(), 2);
    let seattle = seed_location(&daos, "Seattle").await;

    let renamed = daos
        .location()
        .update_many(Some(location::fields::state().equals("NV")), |active| {
            active.country = Set("USA".to_string());
        })
        .await
        .unwrap();
    assert_eq!(renamed, 2);
    assert_eq!(
        daos.location()
            .count(Some(location::fields::country().equals("USA")))
            .await
            .unwrap(),
        2
    );

    let deleted = daos
        .location()
        .delete_many(Some(location::fields::city().equals("Reno")))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(daos.location().count(None).await.unwrap(), 2);

    let removed = daos.location().delete(seattle.id).await.unwrap();
    assert_eq!((removed.id, removed.city.as_str()), (seattle.id, "Seattle"));
    assert_eq!(daos.location().count(None).await.unwrap(), 1);

    let err = daos.location().delete(seattle.id).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
    let err = daos.location().delete(Uuid::new_v4()).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

#[tokio::test]
async fn upsert_creates_then_updates() {
    let daos = memory_context().await;
    let draft = || location::ActiveModel {
        address: Set("3 Elm St".to_string()),
        city: Set("Tulsa".to_string()),
        state: Set("OK".to_string()),
        country: Set("US".to_string()),
        postal_code: Set("74103".to_string()),
        ..Default::default()
    };

    let created = daos
        .location()
        .upsert(Uuid::new_v4(), draft(), |_| {})
        .await
        .unwrap();
    let updated = daos
        .location()
        .upsert(created.id, draft(), |active| {
            active.city = Set("Norman".to_string());
        })
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.city, "Norman");
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(daos.location().count(None).await.unwrap(), 1);

    let removed = daos.location().delete_unique(created.id).await.unwrap();
    assert_eq!(removed.city, "Norman");
    assert_eq!(daos.location().count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn pages_walk_every_row() {
    let daos = memory_context().await;
    seed_cities(&daos).await;
    let order = Some((location::Column::City, Order::Asc));

    let first = daos.location().find(1, 2, order.clone(), |q| q).await.unwrap();
    assert!(first.has_next);
    assert_eq!(cities(&first.data), vec!["Boston", "Chicago"]);

    let mut pager = daos.location().find_iter(Some(2), order, |q| q);
    let mut seen = Vec::new();
    while let Some(page) = pager.next_page().await.unwrap() {
        seen.extend(page.data.into_iter().map(|row| row.city));
    }
    assert_eq!(seen, CITIES);

    let err = daos.location().find(0, 2, None, |q| q).await.unwrap_err();
    assert!(
        matches!(err, DaoLayerError::InvalidPagination { page: 0, .. }),
        "{err}"
    );
}

#[tokio::test]
async fn reviews_fold_into_the_running_average() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    let property = seed_property(&daos, "Loft", location.id, manager.id).await;

    daos.property().record_review(property.id, 4.0).await.unwrap();
    let rated = daos.property().record_review(property.id, 5.0).await.unwrap();
    assert_eq!(rated.average_rating, Some(4.5));
    assert_eq!(rated.number_of_reviews, Some(2));

    let err = daos
        .property()
        .record_review(property.id, 6.0)
        .await
        .unwrap_err();
    assert!(matches!(err, DaoLayerError::InvalidArgument(_)), "{err}");
}

#[tokio::test]
async fn concurrent_reviews_are_both_counted() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let location = seed_location(&daos, "Austin").await;
    let property = seed_property(&daos, "Loft", location.id, manager.id).await;

    let (left, right) = (daos.property(), daos.property());
    let (first, second) = tokio::join!(
        left.record_review(property.id, 4.0),
        right.record_review(property.id, 2.0),
    );
    first.unwrap();
    second.unwrap();

    let stored = daos.property().find_by_id(property.id).await.unwrap();
    assert_eq!(stored.number_of_reviews, Some(2));
    assert_eq!(stored.average_rating, Some(3.0));
}

#[tokio::test]
async fn pages_over_one_batch_see_each_row_once() {
    let daos = memory_context().await;
    let rows: Vec<location::ActiveModel> = CITIES
        .into_iter()
        .map(|city| location::ActiveModel {
            address: Set("9 Batch Rd".to_string()),
            city: Set(city.to_string()),
            state: Set("CO".to_string()),
            country: Set("US".to_string()),
            postal_code: Set("80202".to_string()),
            ..Default::default()
        })
        .collect();
    assert_eq!(daos.location().create_many(rows).await.unwrap(), 5);

    let mut pager = daos.location().find_iter(Some(2), None, |q| q);
    let mut seen = Vec::new();
    while let Some(page) = pager.next_page().await.unwrap() {
        seen.extend(page.data.into_iter().map(|row| row.id));
    }

    let mut expected: Vec<Uuid> = daos
        .location()
        .find_many(FindArgs::new())
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.id)
        .collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn junction_relations_link_and_unlink() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let tenant = seed_user(&daos, "t@example.com", Role::Tenant).await;
    let location = seed_location(&daos, "Austin").await;
    let property = seed_property(&daos, "Loft", location.id, manager.id).await;

    daos.user().add_favorite(tenant.id, property.id).await.unwrap();
    daos.property().add_tenant(property.id, tenant.id).await.unwrap();

    let favorites = daos.user().favorites(&tenant).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, property.id);
    let residents = daos.property().tenants(&property).await.unwrap();
    assert_eq!(residents.into_iter().map(|u| u.id).collect::<Vec<_>>(), vec![tenant.id]);
    let homes = daos.user().tenant_properties(&tenant).await.unwrap();
    assert_eq!(homes.len(), 1);
    let managed = daos.user().managed_properties(&manager).await.unwrap();
    assert_eq!(managed.len(), 1);
    assert_eq!(daos.location().properties(&location).await.unwrap().len(), 1);

    assert!(daos.user().remove_favorite(tenant.id, property.id).await.unwrap());
    assert!(!daos.user().remove_favorite(tenant.id, property.id).await.unwrap());
    assert!(daos.property().remove_tenant(property.id, tenant.id).await.unwrap());
    assert!(daos.user().favorites(&tenant).await.unwrap().is_empty());
}

#[tokio::test]
async fn roles_gate_listings_and_leases() {
    let daos = memory_context().await;
    let manager = seed_user(&daos, "m@example.com", Role::Manager).await;
    let tenant = seed_user(&daos, "t@example.com", Role::Tenant).await;
    let location = seed_location(&daos, "Austin").await;

    let err = daos
        .property()
        .create_listing(listing("Loft", location.id, tenant.id))
        .await
        .unwrap_err();
    assert!(matches!(err, DaoLayerError::InvalidArgument(_)), "{err}");

    let property = seed_property(&daos, "Loft", location.id, manager.id).await;
    let start = Utc::now().fixed_offset();
    let err = daos
        .lease()
        .create_lease(NewLease {
            property_id: property.id,
            tenant_id: manager.id,
            start_date: start,
            end_date: start + Duration::days(30),
            rent: 900.0,
            deposit: 900.0,
            status: LeaseStatus::Pending,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DaoLayerError::InvalidArgument(_)), "{err}");

    let err = daos
        .lease()
        .create_lease(NewLease {
            property_id: property.id,
            tenant_id: tenant.id,
            start_date: start,
            end_date: start - Duration::days(1),
            rent: 900.0,
            deposit: 900.0,
            status: LeaseStatus::Pending,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DaoLayerError::InvalidArgument(_)), "{err}");

    seed_lease(&daos, property.id, tenant.id).await;
    assert_eq!(daos.user().leases(&tenant).await.unwrap().len(), 1);
    assert_eq!(daos.property().leases(&property).await.unwrap().len(), 1);
}

#[tokio::test]
async fn refresh_tokens_rotate_and_revoke() {
    let daos = memory_context().await;
    let user = seed_user(&daos, "t@example.com", Role::Tenant).await;
    let sessions = daos.session();

    let opened = sessions.open(user.id, Duration::days(1)).await.unwrap();
    assert_eq!(opened.refresh_token.len(), 64);
    let rotated = sessions
        .rotate(&opened.refresh_token, Duration::days(7))
        .await
        .unwrap();
    assert_eq!(rotated.id, opened.id);
    assert_ne!(rotated.refresh_token, opened.refresh_token);

    let now = Utc::now().fixed_offset();
    assert!(
        sessions
            .find_active_by_token(&opened.refresh_token, now)
            .await
            .unwrap()
            .is_none()
    );
    let err = sessions
        .rotate(&opened.refresh_token, Duration::days(7))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "{err}");

    assert!(sessions.revoke(&rotated.refresh_token).await.unwrap());
    sessions.open(user.id, Duration::days(1)).await.unwrap();
    sessions.open(user.id, Duration::days(1)).await.unwrap();
    assert_eq!(sessions.revoke_all_for_user(user.id).await.unwrap(), 2);
    assert_eq!(sessions.user(&opened).await.unwrap().id, user.id);
}

#[tokio::test]
async fn password_reset_tokens_expire() {
    let daos = memory_context().await;
    let user = seed_user(&daos, "t@example.com", Role::Tenant).await;
    let users = daos.user();

    let later = Utc::now().fixed_offset() + Duration::hours(1);
    users.set_password_reset(user.id, "reset-1", later).await.unwrap();
    let found = users.find_by_reset_token("reset-1").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let earlier = Utc::now().fixed_offset() - Duration::hours(1);
    users.set_password_reset(user.id, "reset-2", earlier).await.unwrap();
    assert!(users.find_by_reset_token("reset-2").await.unwrap().is_none());

    let cleared = users.clear_password_reset(user.id).await.unwrap();
    assert_eq!(cleared.reset_password_token, None);
    assert!(users.mark_email_verified(user.id).await.unwrap().email_verified);
}
