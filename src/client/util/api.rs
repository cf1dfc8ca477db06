//! Browser-side requests to the barangay API.

#[cfg(feature = "web")]
use serde::de::DeserializeOwned;

#[cfg(feature = "web")]
use crate::{model::user::UserDto, store::RecordSource};

/// Retrieve JSON from an API route
///
/// Error responses are turned into a message carrying the status and the `ErrorDto` message
/// when the body holds one.
#[cfg(feature = "web")]
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    use reqwasm::http::Request;

    let response = Request::get(url)
        .credentials(reqwasm::http::RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() == 200 {
        return response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response from {}: {}", url, e));
    }

    Err(error_message(response).await)
}

/// Retrieve the signed-in user, `None` when nobody is signed in
#[cfg(feature = "web")]
pub async fn get_user() -> Result<Option<UserDto>, String> {
    use reqwasm::http::Request;

    let response = Request::get("/api/auth/user")
        .credentials(reqwasm::http::RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => response
            .json::<UserDto>()
            .await
            .map(Some)
            .map_err(|e| format!("Failed to parse user data: {}", e)),
        404 => Ok(None),
        _ => Err(error_message(response).await),
    }
}

#[cfg(feature = "web")]
async fn error_message(response: reqwasm::http::Response) -> String {
    use crate::model::api::ErrorDto;

    if let Ok(error_dto) = response.json::<ErrorDto>().await {
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_dto.error
        )
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_text
        )
    }
}

/// Loads a whole collection from one list endpoint.
#[cfg(feature = "web")]
pub struct ApiSource {
    url: &'static str,
}

#[cfg(feature = "web")]
impl ApiSource {
    pub fn new(url: &'static str) -> Self {
        Self { url }
    }
}

#[cfg(feature = "web")]
impl<T: DeserializeOwned> RecordSource<T> for ApiSource {
    async fn fetch_all(&self) -> Result<Vec<T>, String> {
        get_json::<Vec<T>>(self.url).await
    }
}
