use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: u64,
    pub destination: String,
    pub days: i64,
    pub price: f64,
    pub hotel: String,
    pub rating: f64,
}

impl Trip {
    pub fn new(id: u64, fields: TripFields) -> Self {
        Self {
            id,
            destination: fields.destination,
            days: fields.days,
            price: fields.price,
            hotel: fields.hotel,
            rating: fields.rating,
        }
    }
}

/// Validated, coerced values for a trip that has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFields {
    pub destination: String,
    pub days: i64,
    pub price: f64,
    pub hotel: String,
    pub rating: f64,
}

/// A numeric value as clients send it: integer, float or numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Floats truncate toward zero.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Numeric::Int(value) => Some(*value),
            Numeric::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Numeric::Float(_) => None,
            Numeric::Text(raw) => raw.trim().parse().ok(),
        }
    }

    pub fn to_float(&self) -> Option<f64> {
        let value = match self {
            Numeric::Int(value) => *value as f64,
            Numeric::Float(value) => *value,
            Numeric::Text(raw) => raw.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Body of a create request. Every field is checked for presence before coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTrip {
    pub destination: Option<String>,
    pub days: Option<Numeric>,
    pub price: Option<Numeric>,
    pub hotel: Option<String>,
    pub rating: Option<Numeric>,
}

impl NewTrip {
    pub fn is_empty(&self) -> bool {
        self.destination.is_none()
            && self.days.is_none()
            && self.price.is_none()
            && self.hotel.is_none()
            && self.rating.is_none()
    }

    pub fn validate(self) -> Result<TripFields, AppError> {
        if self.is_empty() {
            return Err(AppError::MalformedRequest("empty JSON body".into()));
        }

        let destination = self.destination.ok_or(AppError::MissingField("destination"))?;
        let days = self.days.ok_or(AppError::MissingField("days"))?;
        let price = self.price.ok_or(AppError::MissingField("price"))?;
        let hotel = self.hotel.ok_or(AppError::MissingField("hotel"))?;
        let rating = self.rating.ok_or(AppError::MissingField("rating"))?;

        Ok(TripFields {
            destination,
            days: days.to_int().ok_or(AppError::InvalidField("days"))?,
            price: price.to_float().ok_or(AppError::InvalidField("price"))?,
            hotel,
            rating: rating.to_float().ok_or(AppError::InvalidField("rating"))?,
        })
    }
}

/// Body of an update request. Present fields replace stored values as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripPatch {
    pub destination: Option<String>,
    pub days: Option<i64>,
    pub price: Option<f64>,
    pub hotel: Option<String>,
    pub rating: Option<f64>,
}

impl TripPatch {
    pub fn apply(self, trip: &mut Trip) {
        if let Some(destination) = self.destination {
            trip.destination = destination;
        }
        if let Some(days) = self.days {
            trip.days = days;
        }
        if let Some(price) = self.price {
            trip.price = price;
        }
        if let Some(hotel) = self.hotel {
            trip.hotel = hotel;
        }
        if let Some(rating) = self.rating {
            trip.rating = rating;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Destination,
    Days,
    Price,
    Hotel,
    Rating,
}

impl SortField {
    /// Unknown names yield `None`; callers leave the order untouched.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortField::Id),
            "destination" => Some(SortField::Destination),
            "days" => Some(SortField::Days),
            "price" => Some(SortField::Price),
            "hotel" => Some(SortField::Hotel),
            "rating" => Some(SortField::Rating),
            _ => None,
        }
    }

    pub fn compare(self, a: &Trip, b: &Trip) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Destination => a.destination.cmp(&b.destination),
            SortField::Days => a.days.cmp(&b.days),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Hotel => a.hotel.cmp(&b.hotel),
            SortField::Rating => a.rating.total_cmp(&b.rating),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` (any case) sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStats<T> {
    pub min: T,
    pub max: T,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStats {
    pub days: FieldStats<i64>,
    pub price: FieldStats<f64>,
    pub rating: FieldStats<f64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn new_trip(value: serde_json::Value) -> NewTrip {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numeric_fields_are_coerced() {
        let fields = new_trip(json!({
            "destination": "Oslo",
            "days": "4",
            "price": 120,
            "hotel": "Thon",
            "rating": "3.5"
        }))
        .validate()
        .unwrap();

        assert_eq!(fields.days, 4);
        assert_eq!(fields.price, 120.0);
        assert_eq!(fields.rating, 3.5);
    }

    #[test]
    fn float_days_truncate() {
        assert_eq!(Numeric::Float(6.9).to_int(), Some(6));
        assert_eq!(Numeric::Float(-2.5).to_int(), Some(-2));
        assert_eq!(Numeric::Text("2.5".into()).to_int(), None);
    }

    #[test]
    fn first_missing_field_is_reported() {
        let err = new_trip(json!({ "destination": "Rome", "price": 1.0 }))
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField("days")));

        let err = new_trip(json!({
            "destination": "Rome",
            "days": 2,
            "price": 1.0,
            "rating": 4.0
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::MissingField("hotel")));
        assert_eq!(err.to_string(), "missing field: hotel");
    }

    #[test]
    fn null_counts_as_missing() {
        let err = new_trip(json!({
            "destination": "Rome",
            "days": 2,
            "price": null,
            "hotel": "Hilton",
            "rating": 4.0
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::MissingField("price")));
    }

    #[test]
    fn empty_body_is_malformed() {
        let err = new_trip(json!({})).validate().unwrap_err();
        assert!(matches!(err, AppError::MalformedRequest(_)));
    }

    #[test]
    fn unparseable_numbers_are_invalid() {
        let err = new_trip(json!({
            "destination": "Rome",
            "days": 2,
            "price": "cheap",
            "hotel": "Hilton",
            "rating": 4.0
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidField("price")));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut trip = Trip {
            id: 7,
            destination: "Paris".into(),
            days: 3,
            price: 500.0,
            hotel: "Ritz".into(),
            rating: 4.5,
        };
        let patch: TripPatch = serde_json::from_value(json!({ "price": 450 })).unwrap();
        patch.apply(&mut trip);

        assert_eq!(trip.id, 7);
        assert_eq!(trip.price, 450.0);
        assert_eq!(trip.hotel, "Ritz");
    }

    #[test]
    fn sort_parsing() {
        assert_eq!(SortField::parse("rating"), Some(SortField::Rating));
        assert_eq!(SortField::parse("colour"), None);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);
    }
}
