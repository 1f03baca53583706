//! Pure mapping from store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `Connection` -> 503
/// - `Validation` -> 400
/// - `ConditionalCheckFailed` -> 409
/// - `ResourceNotFound` -> 404
/// - `ResourceInUse` -> 409
/// - `Throttled` -> 429
/// - `Service` -> 500
///
/// # Examples
///
/// ```
/// use movies_core::store::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::conditional_check_failed();
/// assert_eq!(store_error_to_status_code(&error), 409);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::Connection(_) => 503,
        StoreError::Validation(_) => 400,
        StoreError::ConditionalCheckFailed(_) => 409,
        StoreError::ResourceNotFound(_) => 404,
        StoreError::ResourceInUse(_) => 409,
        StoreError::Throttled(_) => 429,
        StoreError::Service(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_maps_to_503() {
        let error = StoreError::Connection("dispatch failure".to_string());
        assert_eq!(store_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let error = StoreError::Validation("bad key".to_string());
        assert_eq!(store_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_resource_not_found_maps_to_404() {
        assert_eq!(store_error_to_status_code(&StoreError::table_not_found()), 404);
    }

    #[test]
    fn test_resource_in_use_maps_to_409() {
        let error = StoreError::ResourceInUse("Cannot create preexisting table".to_string());
        assert_eq!(store_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_throttled_maps_to_429() {
        let error = StoreError::Throttled("slow down".to_string());
        assert_eq!(store_error_to_status_code(&error), 429);
    }

    #[test]
    fn test_service_maps_to_500() {
        let error = StoreError::Service("internal".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }
}
