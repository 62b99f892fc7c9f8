use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::provider::PayloadConfig;
use crate::notify::request::Notification;
use crate::utils::constants::APNS_SOUND_EXTENSION;

/// FCM HTTP v1 send request body.
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub message: FcmMessageContent,
}

#[derive(Debug, Serialize)]
pub struct FcmMessageContent {
    pub token: String,
    pub notification: FcmNotification,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AndroidConfig {
    pub notification: AndroidNotification,
}

#[derive(Debug, Serialize)]
pub struct AndroidNotification {
    pub sound: String,
    pub channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub icon: String,
}

#[derive(Debug, Serialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
    pub fcm_options: ApnsFcmOptions,
}

#[derive(Debug, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Serialize)]
pub struct Aps {
    pub sound: String,
    #[serde(rename = "mutable-content")]
    pub mutable_content: u8,
}

#[derive(Debug, Serialize)]
pub struct ApnsFcmOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FcmMessage {
    pub fn build(notification: &Notification, payload: &PayloadConfig) -> Self {
        let image = notification.image_url.clone();
        Self {
            message: FcmMessageContent {
                token: notification.device_token.clone(),
                notification: FcmNotification {
                    title: notification.title.clone(),
                    body: notification.body.clone(),
                    image: image.clone(),
                },
                android: AndroidConfig {
                    notification: AndroidNotification {
                        sound: notification.sound.clone(),
                        channel_id: notification.channel.clone(),
                        image: image.clone(),
                        icon: payload.android_icon.clone(),
                    },
                },
                apns: ApnsConfig {
                    payload: ApnsPayload {
                        aps: Aps {
                            sound: format!("{}.{}", notification.sound, APNS_SOUND_EXTENSION),
                            mutable_content: 1,
                        },
                    },
                    fcm_options: ApnsFcmOptions { image },
                },
                data: payload.data.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(image_url: Option<&str>) -> Notification {
        Notification {
            title: "Hi".into(),
            body: "there".into(),
            sound: "ping".into(),
            channel: "general".into(),
            image_url: image_url.map(str::to_owned),
            device_token: "abc123".into(),
        }
    }

    #[test]
    fn payload_without_image_omits_every_image_key() {
        let message = FcmMessage::build(&notification(None), &PayloadConfig::default());
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "message": {
                    "token": "abc123",
                    "notification": {"title": "Hi", "body": "there"},
                    "android": {"notification": {
                        "sound": "ping",
                        "channel_id": "general",
                        "icon": "ic_shortcut_icone"
                    }},
                    "apns": {
                        "payload": {"aps": {"sound": "ping.caf", "mutable-content": 1}},
                        "fcm_options": {}
                    },
                    "data": {"key1": "valor1", "key2": "valor2"}
                }
            })
        );
    }

    #[test]
    fn image_is_propagated_to_all_platforms() {
        let message = FcmMessage::build(
            &notification(Some("https://cdn/img.png")),
            &PayloadConfig::default(),
        );
        let value = serde_json::to_value(&message).unwrap();
        let msg = &value["message"];
        assert_eq!(msg["notification"]["image"], "https://cdn/img.png");
        assert_eq!(msg["android"]["notification"]["image"], "https://cdn/img.png");
        assert_eq!(msg["apns"]["fcm_options"]["image"], "https://cdn/img.png");
    }

    #[test]
    fn static_parts_come_from_config() {
        let payload = PayloadConfig {
            android_icon: "ic_custom".into(),
            data: BTreeMap::from([("origin".to_owned(), "relay".to_owned())]),
        };
        let value = serde_json::to_value(FcmMessage::build(&notification(None), &payload)).unwrap();
        assert_eq!(value["message"]["android"]["notification"]["icon"], "ic_custom");
        assert_eq!(value["message"]["data"], json!({"origin": "relay"}));
    }
}
