use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::StoreError;

/// A restaurant as returned to clients and stored in the JSON document.
/// Timestamps are only filled by the table-backed store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<models::restaurant::Model> for Restaurant {
    fn from(m: models::restaurant::Model) -> Self {
        Self {
            name: m.name,
            address: m.address,
            phone: m.phone,
            rating: m.rating,
            created_at: Some(m.created_at.with_timezone(&Utc)),
            updated_at: Some(m.updated_at.with_timezone(&Utc)),
        }
    }
}

/// On-disk document shape and list response envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantList {
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

/// Insert payload. Only a JSON object is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: Option<f64>,
}

#[derive(Deserialize)]
struct NewRestaurantFields {
    name: String,
    address: String,
    phone: String,
    #[serde(default)]
    rating: Option<f64>,
}

impl TryFrom<Map<String, Value>> for NewRestaurant {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let f: NewRestaurantFields = serde_json::from_value(Value::Object(map))?;
        Ok(Self { name: f.name, address: f.address, phone: f.phone, rating: f.rating })
    }
}

impl NewRestaurant {
    pub fn validate(&self) -> Result<(), StoreError> {
        models::restaurant::validate_name(&self.name).map_err(StoreError::from)
    }

    pub fn into_restaurant(self) -> Restaurant {
        Restaurant {
            name: self.name,
            address: self.address,
            phone: self.phone,
            rating: self.rating,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial update payload.
///
/// Only fields that are present get written. `rating` is tri-state:
/// absent leaves it alone, `null` clears it, a number replaces it.
/// `address` and `phone` are not nullable, so `null` there counts as absent.
/// A `name` key in the body is ignored; names never change through a patch.
/// Only a JSON object is accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RestaurantPatch {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<Option<f64>>,
}

#[derive(Deserialize)]
struct RestaurantPatchFields {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default, deserialize_with = "present")]
    rating: Option<Option<f64>>,
}

impl TryFrom<Map<String, Value>> for RestaurantPatch {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let f: RestaurantPatchFields = serde_json::from_value(Value::Object(map))?;
        Ok(Self { address: f.address, phone: f.phone, rating: f.rating })
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl RestaurantPatch {
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.phone.is_none() && self.rating.is_none()
    }

    /// Overwrite the supplied fields on `target`.
    pub fn apply(self, target: &mut Restaurant) {
        if let Some(address) = self.address {
            target.address = address;
        }
        if let Some(phone) = self.phone {
            target.phone = phone;
        }
        if let Some(rating) = self.rating {
            target.rating = rating;
        }
    }
}
