use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PoolingError;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        RequestId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        RequestId::new(value)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        CustomerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved coordinate with the address label it was geocoded from.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Place {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
}

impl Place {
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Place {
            lat,
            lng,
            address: address.into(),
        }
    }

    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.lng, self.lat)
    }
}

/// A single point-to-point delivery ask. Read-only once created.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Request {
    id: RequestId,
    customer_id: CustomerId,
    pickup: Place,
    dropoff: Place,
    #[serde(default)]
    weight_kg: f64,
    max_wait: SignedDuration,
    created_at: Timestamp,
}

impl Request {
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn pickup(&self) -> &Place {
        &self.pickup
    }

    pub fn dropoff(&self) -> &Place {
        &self.dropoff
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn max_wait(&self) -> SignedDuration {
        self.max_wait
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[derive(Default)]
pub struct RequestBuilder {
    id: Option<RequestId>,
    customer_id: Option<CustomerId>,
    pickup: Option<Place>,
    dropoff: Option<Place>,
    weight_kg: Option<f64>,
    max_wait: Option<SignedDuration>,
    created_at: Option<Timestamp>,
}

impl RequestBuilder {
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut RequestBuilder {
        self.id = Some(RequestId::new(id));
        self
    }

    pub fn set_customer_id(&mut self, customer_id: impl Into<String>) -> &mut RequestBuilder {
        self.customer_id = Some(CustomerId::new(customer_id));
        self
    }

    pub fn set_pickup(&mut self, pickup: Place) -> &mut RequestBuilder {
        self.pickup = Some(pickup);
        self
    }

    pub fn set_dropoff(&mut self, dropoff: Place) -> &mut RequestBuilder {
        self.dropoff = Some(dropoff);
        self
    }

    pub fn set_weight_kg(&mut self, weight_kg: f64) -> &mut RequestBuilder {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn set_max_wait(&mut self, max_wait: SignedDuration) -> &mut RequestBuilder {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn set_created_at(&mut self, created_at: Timestamp) -> &mut RequestBuilder {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the request. The customer id defaults to the request id, the
    /// maximum wait to 30 minutes and the creation time to now.
    pub fn build(self) -> Result<Request, PoolingError> {
        let id = self.id.ok_or(PoolingError::MissingField("id"))?;
        Ok(Request {
            customer_id: self
                .customer_id
                .unwrap_or_else(|| CustomerId::new(id.as_str())),
            id,
            pickup: self.pickup.ok_or(PoolingError::MissingField("pickup"))?,
            dropoff: self.dropoff.ok_or(PoolingError::MissingField("dropoff"))?,
            weight_kg: self.weight_kg.unwrap_or(0.0),
            max_wait: self.max_wait.unwrap_or(SignedDuration::from_mins(30)),
            created_at: self.created_at.unwrap_or_else(Timestamp::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let mut builder = RequestBuilder::default();
        builder
            .set_id("r1")
            .set_pickup(Place::new(19.0760, 72.8777, "Bandra"))
            .set_dropoff(Place::new(19.0896, 72.8656, "Khar"))
            .set_weight_kg(2.5)
            .set_created_at("2025-06-10T08:00:00Z".parse().unwrap());

        let request = builder.build().unwrap();

        assert_eq!(request.id(), &RequestId::new("r1"));
        assert_eq!(request.customer_id().as_str(), "r1");
        assert_eq!(request.weight_kg(), 2.5);
        assert_eq!(request.max_wait(), SignedDuration::from_mins(30));
        assert_eq!(request.pickup().point(), geo::Point::new(72.8777, 19.0760));
    }

    #[test]
    fn test_builder_missing_pickup() {
        let mut builder = RequestBuilder::default();
        builder
            .set_id("r1")
            .set_dropoff(Place::new(19.0896, 72.8656, "Khar"));

        assert!(matches!(
            builder.build(),
            Err(PoolingError::MissingField("pickup"))
        ));
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "id": "r1",
            "customer_id": "c1",
            "pickup": { "lat": 19.0760, "lng": 72.8777, "address": "Bandra" },
            "dropoff": { "lat": 19.0896, "lng": 72.8656 },
            "weight_kg": 1.0,
            "max_wait": "PT20M",
            "created_at": "2025-06-10T08:00:00Z"
        }"#;

        let request: Request = serde_json::from_str(json).unwrap();

        assert_eq!(request.customer_id().as_str(), "c1");
        assert_eq!(request.dropoff().address, "");
        assert_eq!(request.max_wait(), SignedDuration::from_mins(20));
    }
}
