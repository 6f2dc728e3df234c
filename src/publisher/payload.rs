//! JSON body accepted by the dashboard ingestion endpoint:
//! `{"TotalElements":<int>,"Warnings":<int>,"Families":{"<name>":<int>}}`.
//! All three fields are always present.

use crate::collector::HealthMetrics;
use crate::publisher::error::{PayloadError, PayloadResult};

pub const CONTENT_TYPE: &str = "application/json";

fn validate(metrics: &HealthMetrics) -> PayloadResult<()> {
    if metrics.family_instance_counts().keys().any(|name| name.is_empty()) {
        return Err(PayloadError::EmptyFamilyName);
    }
    Ok(())
}

pub fn encode(metrics: &HealthMetrics) -> PayloadResult<Vec<u8>> {
    validate(metrics)?;
    Ok(serde_json::to_vec(metrics)?)
}

pub fn encode_to_string(metrics: &HealthMetrics) -> PayloadResult<String> {
    validate(metrics)?;
    Ok(serde_json::to_string(metrics)?)
}

pub fn decode(bytes: &[u8]) -> PayloadResult<HealthMetrics> {
    Ok(serde_json::from_slice(bytes)?)
}
