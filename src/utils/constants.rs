//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_CONFIG_PATH: &str = "fcm-relay.yaml";
pub const DEFAULT_TOKEN_FILE: &str = "token.json";

// OAuth2 service account flow
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// used when the token endpoint omits `expires_in`
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;
/// upper bound on a provider supplied `expires_in`
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 24 * 3600;

// FCM HTTP v1
pub const FCM_BASE_URL: &str = "https://fcm.googleapis.com";
pub const DEFAULT_ANDROID_ICON: &str = "ic_shortcut_icone";
pub const APNS_SOUND_EXTENSION: &str = "caf";

// Client facing messages. Existing mobile clients match on these texts.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Os campos \"titulo\", \"body\", \"som\" e \"canal\" são obrigatórios e \"imageUrl\" caso queira colocar uma imagem.";
pub const MISSING_AUTHORIZATION_MESSAGE: &str = "Token de autorização ausente.";
pub const SEND_SUCCESS_MESSAGE: &str = "Notificação enviada com sucesso.";
pub const SEND_FAILURE_MESSAGE: &str = "Falha ao enviar notificação.";
pub const TOKEN_FAILURE_PREFIX: &str = "Erro ao obter token";
pub const EMPTY_PROVIDER_RESPONSE_MESSAGE: &str = "Token Fornecido incorreto";
