//! Required-field coverage of adapter mappings
//!
//! Coverage is exact on required fields only: optional provider fields need
//! not be mapped and extra mappings are always allowed. A result is only valid
//! for the schema and mapping list it was computed from; [`certify`] records
//! fingerprints of both so later edits are detectable.

use chrono::Utc;

use super::required::extract_required;
use crate::error::AdapterError;
use crate::types::{AdapterMappingModel, CoverageStamp, FieldPath, StructuredParameterSchema};

/// Return every required path no mapping entry writes to
pub fn validate_coverage(
    required: &[FieldPath],
    mapping: &AdapterMappingModel,
) -> Result<(), Vec<FieldPath>> {
    let missing: Vec<FieldPath> = required
        .iter()
        .filter(|path| !mapping.mappings.iter().any(|entry| entry.covers(path)))
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::debug!(
            adapter = %mapping.id,
            missing = missing.len(),
            "adapter leaves required fields unmapped"
        );
        Err(missing)
    }
}

/// Required fields of `schema` must all be covered by `mapping`
pub fn check_schema_coverage(
    schema: &StructuredParameterSchema,
    mapping: &AdapterMappingModel,
) -> Result<(), AdapterError> {
    validate_coverage(&extract_required(schema), mapping).map_err(AdapterError::CoverageGap)
}

/// Validate coverage and stamp the mapping model as usable for `schema`.
///
/// On failure any previous stamp is removed.
pub fn certify(
    mapping: &mut AdapterMappingModel,
    schema: &StructuredParameterSchema,
) -> Result<CoverageStamp, AdapterError> {
    if let Err(err) = check_schema_coverage(schema, mapping) {
        mapping.coverage = None;
        return Err(err);
    }

    let stamp = CoverageStamp {
        schema_fingerprint: schema.fingerprint(),
        mappings_fingerprint: mapping.mappings_fingerprint(),
        validated_at: Utc::now(),
    };
    mapping.coverage = Some(stamp.clone());
    tracing::debug!(adapter = %mapping.id, "adapter coverage certified");
    Ok(stamp)
}

impl AdapterMappingModel {
    /// See [`certify`]
    pub fn certify(
        &mut self,
        schema: &StructuredParameterSchema,
    ) -> Result<CoverageStamp, AdapterError> {
        certify(self, schema)
    }
}
