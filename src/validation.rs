use crate::error::ApiError;

pub const MAX_PAGE: u32 = 50;

pub fn validate_page(value: u32) -> Result<u32, ApiError> {
    if (1..=MAX_PAGE).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "page must be between 1 and {MAX_PAGE}"
        )))
    }
}
