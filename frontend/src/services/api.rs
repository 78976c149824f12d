use gloo::net::http::Request;
use shared::{AvailabilityRecord, AvailabilityStatus, SaveAvailabilityRequest};

/// API client for the availability endpoints, bound to one person.
///
/// The person identifier is explicit configuration handed to the widget
/// at construction; nothing here reads page-global state.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    person_id: String,
}

impl ApiClient {
    /// Create a new API client for a person with the default base URL
    pub fn new(person_id: impl Into<String>) -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            person_id: person_id.into(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(person_id: impl Into<String>, base_url: String) -> Self {
        Self {
            base_url,
            person_id: person_id.into(),
        }
    }

    /// Fetch every stored availability record for this person.
    pub async fn fetch_availability(&self) -> Result<Vec<AvailabilityRecord>, String> {
        let url = format!("{}/api/availability/{}", self.base_url, self.person_id);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<Vec<AvailabilityRecord>>().await {
                Ok(records) => Ok(records),
                Err(e) => Err(format!("Failed to parse availability records: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch availability: {}", e)),
        }
    }

    /// Create-or-update the status stored for one date. Only success or
    /// failure of the call is inspected, not the response body.
    pub async fn save_availability(
        &self,
        date: &str,
        status: AvailabilityStatus,
    ) -> Result<(), String> {
        let url = format!("{}/api/availability/{}", self.base_url, self.person_id);
        let request = SaveAvailabilityRequest {
            date: date.to_string(),
            status,
        };

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}
