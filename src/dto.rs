use serde::{Deserialize, Serialize};

/// Data transfer object for sign-in requests
///
/// This struct is used to deserialize JSON requests for logging in.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    /// The login name
    pub user_name: String,

    /// The clear-text password
    pub password: String,
}

/// Data transfer object for sign-up requests
///
/// This struct is used to deserialize JSON requests for registering a new
/// account. Missing or malformed fields are rejected by the extractor, never
/// read dynamically.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    /// The login name to register
    pub user_name: String,

    /// The clear-text password
    pub password: String,

    /// The user's first name
    pub first_name: String,

    /// The user's last name
    pub last_name: String,

    /// The user's email address
    pub email: String,
}

/// Response body for login and logout
///
/// The `status` field is only present on successful authentication; its
/// absence is the failure signal the frontend expects.
#[derive(Serialize, Debug)]
pub struct LoginResponse {
    /// The login name echoed back (empty after logout)
    #[serde(rename = "userName")]
    pub user_name: String,

    /// "Authenticated" on success, omitted otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Response body for registration
///
/// Note the lower-case `username` key: login and registration historically
/// disagree on the casing and clients rely on both shapes.
#[derive(Serialize, Debug)]
pub struct RegistrationResponse {
    /// The login name echoed back
    pub username: String,

    /// "Authenticated" on success, omitted otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// "Already Registered" when the username is taken, omitted otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One entry of the car catalog listing
#[derive(Serialize, Debug)]
pub struct CarEntry {
    /// The car model name
    #[serde(rename = "CarModel")]
    pub car_model: String,

    /// The name of the make the model belongs to
    #[serde(rename = "CarMake")]
    pub car_make: String,
}

/// Response body for the car catalog listing
#[derive(Serialize, Debug)]
pub struct CarsResponse {
    /// All models joined with their makes
    #[serde(rename = "CarModels")]
    pub car_models: Vec<CarEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_omits_status_on_failure() {
        let response = LoginResponse {
            user_name: "alice".to_string(),
            status: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"userName": "alice"}));
    }

    #[test]
    fn test_login_response_includes_status_on_success() {
        let response = LoginResponse {
            user_name: "alice".to_string(),
            status: Some("Authenticated".to_string()),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"userName": "alice", "status": "Authenticated"}));
    }

    #[test]
    fn test_registration_response_uses_lowercase_key() {
        let response = RegistrationResponse {
            username: "bob".to_string(),
            status: None,
            error: Some("Already Registered".to_string()),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"username": "bob", "error": "Already Registered"}));
    }

    #[test]
    fn test_registration_dto_rejects_missing_fields() {
        let result: Result<RegistrationDto, _> =
            serde_json::from_value(json!({"userName": "bob", "password": "pw"}));
        assert!(result.is_err());
    }
}
