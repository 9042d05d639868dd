mod car;
mod folder;
mod input;

pub use car::{Car, CarInput, CarPatch, NewCar};
pub use folder::{Folder, FolderInput, NewFolder};
pub use input::{coerce_features, coerce_flag, parse_id, IntLike};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two record kinds the catalog stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Folder,
    Car,
}

impl Entity {
    /// Lowercase name, as used in messages like "Invalid car ID".
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Folder => "folder",
            Entity::Car => "car",
        }
    }

    /// Capitalized name, as used in messages like "Car not found".
    pub fn title(&self) -> &'static str {
        match self {
            Entity::Folder => "Folder",
            Entity::Car => "Car",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
