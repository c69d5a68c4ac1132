use serde::{Deserialize, Serialize};

use super::app::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,
    pub timeout: u64,
    pub retries: u32,
    pub retry_delay: u64,
}

impl ServerConfig {
    pub fn base_url(&self) -> String {
        let scheme = match self.protocol {
            Protocol::Http => "http",
            Protocol::Https => "https",
        };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub base: String,
    pub machine: String,
    pub files: String,
    pub plugins: String,
    pub config: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    None,
    Basic,
    Bearer,
    Oauth,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: AuthType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_minute: u32,
    pub burst_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLogging {
    pub enabled: bool,
    pub level: LogLevel,
    pub requests: bool,
    pub responses: bool,
}

/// Contents of `api.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub endpoints: EndpointsConfig,
    pub authentication: AuthenticationConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub logging: ApiLogging,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 3000,
            protocol: Protocol::Http,
            timeout: 5000,
            retries: 3,
            retry_delay: 1000,
        };
        assert_eq!(server.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_auth_type_wire_name() {
        let auth: AuthenticationConfig =
            serde_json::from_str(r#"{"enabled": false, "type": "none"}"#).unwrap();
        assert_eq!(auth.kind, AuthType::None);
        assert!(auth.credentials.is_none());
    }
}
