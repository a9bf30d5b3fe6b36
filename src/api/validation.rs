use crate::api::error::ApiError;
use crate::store::validate_document_id;

pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::bad_request(format!("{} cannot be empty", field_name)));
    }
    Ok(())
}

/// Budget categories double as document ids
pub fn validate_budget_category(category: &str) -> Result<(), ApiError> {
    validate_not_empty(category, "category")?;
    validate_document_id(category).map_err(|e| ApiError::bad_request(e.to_string()))
}
