use serde::Deserialize;

use crate::errors::RelayError;

/// Inbound JSON body of `POST /`, as sent by the mobile backend.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationRequest {
    pub titulo: Option<String>,
    pub body: Option<String>,
    pub som: Option<String>,
    pub canal: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// A request that passed validation, ready to be turned into a provider payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub sound: String,
    pub channel: String,
    pub image_url: Option<String>,
    /// already trimmed
    pub device_token: String,
}

impl NotificationRequest {
    /// Decodes the raw body. Anything that is not a JSON object with string
    /// fields fails the same way an incomplete object does.
    pub fn decode(raw: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(raw).map_err(|_| RelayError::Validation)
    }

    /// Checks required fields first, then the device token.
    pub fn validate(self, device_token: Option<&str>) -> Result<Notification, RelayError> {
        let (title, body, sound, channel) = match (
            non_empty(self.titulo),
            non_empty(self.body),
            non_empty(self.som),
            non_empty(self.canal),
        ) {
            (Some(title), Some(body), Some(sound), Some(channel)) => (title, body, sound, channel),
            _ => return Err(RelayError::Validation),
        };

        let device_token = device_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(RelayError::MissingDeviceToken)?;

        Ok(Notification {
            title,
            body,
            sound,
            channel,
            image_url: non_empty(self.image_url),
            device_token: device_token.to_owned(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
