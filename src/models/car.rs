use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::{coerce_features, IntLike};
use crate::error::ValidationError;

/// A stored car.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub year: i64,
    pub engine: String,
    pub hp: i64,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A validated car ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCar {
    pub name: String,
    pub year: i64,
    pub engine: String,
    pub hp: i64,
    pub features: Vec<String>,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub engine: Option<String>,
    pub hp: Option<i64>,
    pub features: Option<Vec<String>>,
}

impl CarPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.year.is_none()
            && self.engine.is_none()
            && self.hp.is_none()
            && self.features.is_none()
    }

    /// Apply the patch to a stored car.
    pub fn apply_to(&self, car: &mut Car) {
        if let Some(name) = &self.name {
            car.name = name.clone();
        }
        if let Some(year) = self.year {
            car.year = year;
        }
        if let Some(engine) = &self.engine {
            car.engine = engine.clone();
        }
        if let Some(hp) = self.hp {
            car.hp = hp;
        }
        if let Some(features) = &self.features {
            car.features = features.clone();
        }
    }
}

/// Request body for `POST /api/cars` and `PUT /api/cars/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<IntLike>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub hp: Option<IntLike>,
    #[serde(default)]
    pub features: Option<Value>,
}

impl CarInput {
    /// Validate a creation request.
    ///
    /// Name, year, engine and hp must all be present; name and engine must
    /// also be non-empty. Missing fields are checked before numeric coercion
    /// so the caller sees the "required" message first.
    pub fn into_new_car(self) -> Result<NewCar, ValidationError> {
        let mut missing = Vec::new();
        if self.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }
        if self.year.is_none() {
            missing.push("year");
        }
        if self.engine.as_deref().map_or(true, str::is_empty) {
            missing.push("engine");
        }
        if self.hp.is_none() {
            missing.push("hp");
        }

        match (self.name, self.year, self.engine, self.hp) {
            (Some(name), Some(year), Some(engine), Some(hp)) if missing.is_empty() => {
                Ok(NewCar {
                    name,
                    year: year.resolve("year")?,
                    engine,
                    hp: hp.resolve("hp")?,
                    features: coerce_features(self.features.as_ref()).unwrap_or_default(),
                })
            }
            _ => Err(ValidationError::MissingCarFields { missing }),
        }
    }

    /// Validate an update request. Every field is optional.
    pub fn into_patch(self) -> Result<CarPatch, ValidationError> {
        Ok(CarPatch {
            name: self.name,
            year: self.year.map(|year| year.resolve("year")).transpose()?,
            engine: self.engine,
            hp: self.hp.map(|hp| hp.resolve("hp")).transpose()?,
            features: coerce_features(self.features.as_ref()),
        })
    }
}
