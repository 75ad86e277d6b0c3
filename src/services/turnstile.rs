// src/services/turnstile.rs
// DOCUMENTATION: Bot challenge verification client
// PURPOSE: Check submission tokens against the challenge provider

use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct TurnstileClient {
    client: Client,
    secret_key: Option<String>,
    verify_url: String,
}

impl TurnstileClient {
    pub fn new(secret_key: Option<String>, verify_url: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            verify_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Whether the provider accepts `token`
    /// DOCUMENTATION: Without a secret key verification is skipped and the
    /// token accepted. Transport and parse failures count as rejection.
    pub async fn verify(&self, token: &str, remote_ip: Option<&str>) -> bool {
        let secret = match &self.secret_key {
            Some(secret) => secret,
            None => {
                log::warn!("Bot verification skipped: no secret key configured");
                return true;
            }
        };

        let mut form = vec![("secret", secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let response = match self.client.post(&self.verify_url).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Bot verification request failed: {}", e);
                return false;
            }
        };

        match response.json::<VerifyResponse>().await {
            Ok(result) => {
                if !result.success {
                    log::warn!("Bot verification rejected token: {:?}", result.error_codes);
                }
                result.success
            }
            Err(e) => {
                log::error!("Failed to parse bot verification response: {}", e);
                false
            }
        }
    }
}
