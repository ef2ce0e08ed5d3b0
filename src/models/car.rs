//! The car entity, in its stored and its incoming shape.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A car as persisted in the `cars` table.
///
/// `id` is assigned by the store on insert and never changes afterwards.
/// Text columns are nullable, so they are carried as `Option<String>` and
/// serialize as JSON `null` when absent.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Car {
    /// Store-assigned identifier (`BIGSERIAL` primary key).
    #[sqlx(try_from = "i64")]
    pub id: u64,

    /// Manufacturer, e.g. "Toyota".
    pub company: Option<String>,

    /// Model name, e.g. "Corolla".
    pub model: Option<String>,

    pub color: Option<String>,
}

/// Request body accepted by `POST /api/create_cars`.
///
/// Every field is optional and unknown fields are ignored.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NewCar {
    pub company: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
}

impl NewCar {
    /// Attach a store-assigned identifier, producing the stored record.
    pub fn with_id(self, id: u64) -> Car {
        Car {
            id,
            company: self.company,
            model: self.model,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_car_ignores_unknown_and_missing_fields() {
        let car: NewCar = serde_json::from_value(json!({
            "company": "Toyota",
            "wheels": 4
        }))
        .unwrap();

        assert_eq!(car.company.as_deref(), Some("Toyota"));
        assert_eq!(car.model, None);
        assert_eq!(car.color, None);
    }

    #[test]
    fn stored_car_serializes_missing_text_as_null() {
        let car = NewCar {
            company: Some("Fiat".into()),
            ..Default::default()
        }
        .with_id(7);

        assert_eq!(
            serde_json::to_value(&car).unwrap(),
            json!({ "id": 7, "company": "Fiat", "model": null, "color": null })
        );
    }
}
