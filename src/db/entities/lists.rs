//! List-valued columns, stored as JSON arrays.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use super::enums::{Amenity, Highlight};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PhotoUrls(pub Vec<String>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Amenities(pub Vec<Amenity>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Highlights(pub Vec<Highlight>);

impl<S: Into<String>> FromIterator<S> for PhotoUrls {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Amenity> for Amenities {
    fn from_iter<I: IntoIterator<Item = Amenity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Highlight> for Highlights {
    fn from_iter<I: IntoIterator<Item = Highlight>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
