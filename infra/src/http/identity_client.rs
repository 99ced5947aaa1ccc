//! Identity API client
//!
//! Calls the remote identity service over HTTPS and maps every response into
//! a tagged [`ApiOutcome`]: 2xx becomes `Success`, any other status becomes
//! `Rejected` carrying the upstream body verbatim, and transport failures
//! become [`IdentityError::Unavailable`].

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use hrms_core::clients::identity::{
    ApiOutcome, AuthResponse, IdentityClient, IdentityError, LoginAck, Profile, RegisterRequest,
};
use shared::config::IdentityApiConfig;

use crate::InfrastructureError;

/// reqwest-based implementation of [`IdentityClient`]
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: Client,
    config: IdentityApiConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpRequest<'a> {
    email: &'a str,
    otp: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginOtpRequest<'a> {
    email: &'a str,
    otp: &'a str,
    remember_me: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    email: &'a str,
    new_password: &'a str,
}

impl HttpIdentityClient {
    pub fn new(config: IdentityApiConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.config.endpoint(path))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, IdentityError> {
        request
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))
    }

    /// Fold a response into an outcome, discarding any success payload
    async fn unit_outcome(response: Response) -> Result<ApiOutcome<()>, IdentityError> {
        if response.status().is_success() {
            return Ok(ApiOutcome::Success(()));
        }
        Ok(ApiOutcome::Rejected {
            message: Self::rejection_body(response).await,
        })
    }

    /// Fold a response into an outcome, parsing the success payload as JSON
    async fn json_outcome<T: DeserializeOwned>(
        response: Response,
    ) -> Result<ApiOutcome<T>, IdentityError> {
        if !response.status().is_success() {
            return Ok(ApiOutcome::Rejected {
                message: Self::rejection_body(response).await,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        match serde_json::from_str(&body) {
            Ok(value) => Ok(ApiOutcome::Success(value)),
            Err(e) => {
                warn!("Identity API returned an unparseable success payload: {}", e);
                Ok(ApiOutcome::Rejected {
                    message: "The identity service returned an unexpected response.".to_string(),
                })
            }
        }
    }

    /// Extract the rejection message from a non-2xx response
    ///
    /// The upstream writes its error message as the response body, which is
    /// relayed verbatim to the caller.
    async fn rejection_body(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = body.trim();

        debug!("Identity API rejected request with status {}", status);

        if message.is_empty() {
            default_rejection_message(status)
        } else {
            message.to_string()
        }
    }
}

fn default_rejection_message(status: StatusCode) -> String {
    format!("The identity service rejected the request ({}).", status)
}

#[async_trait::async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiOutcome<()>, IdentityError> {
        let response = self.send(self.post("register").json(request)).await?;
        Self::unit_outcome(response).await
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiOutcome<LoginAck>, IdentityError> {
        let response = self
            .send(self.post("login").json(&LoginRequest { email, password }))
            .await?;

        if !response.status().is_success() {
            return Ok(ApiOutcome::Rejected {
                message: Self::rejection_body(response).await,
            });
        }

        // A login acknowledgement may carry a full auth payload when the
        // upstream has OTP disabled; otherwise the body is empty or an ack
        // without a token.
        let body = response
            .text()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let auth = serde_json::from_str::<AuthResponse>(&body)
            .ok()
            .filter(|auth| !auth.token.is_empty());

        Ok(ApiOutcome::Success(LoginAck { auth }))
    }

    async fn verify_register_otp(
        &self,
        email: &str,
        otp: &str,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        let response = self
            .send(self.post("verify-register-otp").json(&OtpRequest { email, otp }))
            .await?;
        Self::unit_outcome(response).await
    }

    async fn verify_login_otp(
        &self,
        email: &str,
        otp: &str,
        remember_me: bool,
    ) -> Result<ApiOutcome<AuthResponse>, IdentityError> {
        let response = self
            .send(self.post("verify-login-otp").json(&LoginOtpRequest {
                email,
                otp,
                remember_me,
            }))
            .await?;
        Self::json_outcome(response).await
    }

    async fn change_password(
        &self,
        bearer: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        let response = self
            .send(
                self.post("change-password")
                    .bearer_auth(bearer)
                    .json(&ChangePasswordRequest {
                        old_password,
                        new_password,
                    }),
            )
            .await?;
        Self::unit_outcome(response).await
    }

    async fn forgot_password(&self, email: &str) -> Result<ApiOutcome<()>, IdentityError> {
        let response = self
            .send(
                self.post("forgot-password")
                    .json(&ForgotPasswordRequest { email }),
            )
            .await?;
        Self::unit_outcome(response).await
    }

    async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        let response = self
            .send(self.post("reset-password").json(&ResetPasswordRequest {
                token,
                email,
                new_password,
            }))
            .await?;
        Self::unit_outcome(response).await
    }

    async fn fetch_profile(&self, bearer: &str) -> Result<ApiOutcome<Profile>, IdentityError> {
        let response = self
            .send(
                self.client
                    .get(self.config.endpoint("profile"))
                    .bearer_auth(bearer),
            )
            .await?;
        Self::json_outcome(response).await
    }

    async fn update_profile(
        &self,
        bearer: &str,
        profile: &Profile,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        let response = self
            .send(
                self.client
                    .put(self.config.endpoint("profile"))
                    .bearer_auth(bearer)
                    .json(profile),
            )
            .await?;
        Self::unit_outcome(response).await
    }
}
