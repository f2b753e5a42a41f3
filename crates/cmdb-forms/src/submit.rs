//! Submission validation and payload building
//!
//! Only the top-level fields are validated client-side; schema-declared
//! `required` attributes are left to the backend, which is the final
//! authority either way.

use cmdb_types::{CreateCiAssetRequest, UpdateCiAssetRequest};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Asset name is required")]
    NameRequired,
    #[error("CI Type is required")]
    CiTypeRequired,
}

/// Pre-submit validation. `editing` skips the CI type check because the
/// type selector is disabled once an asset exists.
pub fn validate_submission(name: &str, ci_type_id: &str, editing: bool) -> Result<(), FormError> {
    if name.trim().is_empty() {
        return Err(FormError::NameRequired);
    }
    if !editing && ci_type_id.is_empty() {
        return Err(FormError::CiTypeRequired);
    }
    Ok(())
}

pub fn build_create(
    name: &str,
    ci_type_id: &str,
    attributes: &Map<String, Value>,
) -> Result<CreateCiAssetRequest, FormError> {
    validate_submission(name, ci_type_id, false)?;
    Ok(CreateCiAssetRequest {
        ci_type_id: ci_type_id.to_string(),
        name: name.to_string(),
        attributes: attributes.clone(),
    })
}

pub fn build_update(
    name: &str,
    attributes: &Map<String, Value>,
) -> Result<UpdateCiAssetRequest, FormError> {
    validate_submission(name, "", true)?;
    Ok(UpdateCiAssetRequest {
        name: name.to_string(),
        attributes: attributes.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_name_blocks_submission() {
        let bag = Map::new();
        assert_eq!(build_create("", "t1", &bag), Err(FormError::NameRequired));
        assert_eq!(build_create("   ", "t1", &bag), Err(FormError::NameRequired));
        assert_eq!(build_update("", &bag), Err(FormError::NameRequired));
    }

    #[test]
    fn empty_ci_type_blocks_create_only() {
        let bag = Map::new();
        assert_eq!(build_create("web-01", "", &bag), Err(FormError::CiTypeRequired));
        assert!(build_update("web-01", &bag).is_ok());
    }

    #[test]
    fn create_payload_shape() {
        let mut bag = Map::new();
        bag.insert("env".into(), json!("prod"));
        let req = build_create("web-01", "t1", &bag).unwrap();
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(
            wire,
            json!({"ci_type_id": "t1", "name": "web-01", "attributes": {"env": "prod"}})
        );
    }

    #[test]
    fn update_payload_omits_type() {
        let bag = Map::new();
        let req = build_update("web-01", &bag).unwrap();
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(wire, json!({"name": "web-01", "attributes": {}}));
    }

    #[test]
    fn schema_required_attributes_are_not_enforced_client_side() {
        // A type may declare required attributes; submission is still only
        // gated on name and type. The backend enforces the schema.
        let bag = Map::new();
        assert!(build_create("web-01", "t1", &bag).is_ok());
    }
}
