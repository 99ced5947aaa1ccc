//! Main authentication flow service implementation

use std::sync::Arc;
use tracing::{debug, info};

use shared::utils::validation::mask_email;

use crate::clients::identity::{ApiOutcome, IdentityClient, Profile, RegisterRequest};
use crate::domain::{AuthenticatedSession, Credentials, FlowKind, PendingAuthFlow};
use crate::errors::{FlowError, FlowResult, SessionError, ValidationError};
use crate::services::bot_check::{BotCheckService, BotVerifier};
use crate::services::cookie::IdentityCookieCodec;
use crate::services::session::{SessionContext, SessionStore};

use super::config::AuthFlowConfig;

/// How a flow step moved the state machine forward
#[derive(Debug)]
pub enum FlowAdvance {
    /// Credentials accepted, OTP dispatched; navigate to the OTP entry
    /// endpoint of the given flow
    OtpPending(FlowKind),
    /// Registration complete; navigate to the login entry with a notice
    Verified,
    /// Login complete. `identity_cookie` carries the signed cookie value
    /// to set when "remember me" was chosen and cookie persistence is on.
    Authenticated {
        session: AuthenticatedSession,
        identity_cookie: Option<String>,
    },
}

/// Orchestrates the registration and login state machines.
///
/// Generic over the identity API client and bot verifier; the session
/// store arrives per request inside a [`SessionContext`]. All durable
/// state lives upstream, so the service itself is stateless and every
/// method is a single request-scoped transition.
pub struct AuthFlowService<I, B>
where
    I: IdentityClient,
    B: BotVerifier,
{
    /// Client for the external identity API
    identity: Arc<I>,
    /// Bot-verification gate applied to credential submissions
    bot_check: BotCheckService<B>,
    /// Codec for the persistent "remember me" cookie
    cookie_codec: IdentityCookieCodec,
    /// Flow options
    config: AuthFlowConfig,
}

impl<I, B> AuthFlowService<I, B>
where
    I: IdentityClient,
    B: BotVerifier,
{
    pub fn new(
        identity: Arc<I>,
        bot_check: BotCheckService<B>,
        cookie_codec: IdentityCookieCodec,
        config: AuthFlowConfig,
    ) -> Self {
        Self {
            identity,
            bot_check,
            cookie_codec,
            config,
        }
    }

    /// Submit registration credentials.
    ///
    /// Validation order: structural validation, bot verification, then the
    /// identity API. An upstream rejection surfaces its message verbatim
    /// and leaves the flow at its start; on success a pending flow is
    /// parked and the browser is sent to the OTP entry endpoint.
    pub async fn register<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        credentials: &Credentials,
        remember_me: bool,
        bot_token: Option<&str>,
    ) -> FlowResult<FlowAdvance> {
        credentials.validate()?;
        let full_name = credentials
            .full_name
            .clone()
            .ok_or(ValidationError::RequiredField {
                field: "full_name".to_string(),
            })?;
        let confirm_password =
            credentials
                .confirm_password
                .clone()
                .ok_or(ValidationError::RequiredField {
                    field: "confirm_password".to_string(),
                })?;

        self.gate_bots(bot_token).await?;

        let request = RegisterRequest {
            full_name,
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            confirm_password,
        };

        match self.identity.register(&request).await? {
            ApiOutcome::Success(()) => {
                if !self.config.otp_required {
                    info!("Registration accepted without OTP for {}", mask_email(&credentials.email));
                    return Ok(FlowAdvance::Verified);
                }
                ctx.set_pending_flow(&PendingAuthFlow::register(&credentials.email, remember_me))
                    .await?;
                info!("Registration OTP dispatched for {}", mask_email(&credentials.email));
                Ok(FlowAdvance::OtpPending(FlowKind::Register))
            }
            ApiOutcome::Rejected { message } => {
                debug!("Registration rejected for {}: {}", mask_email(&credentials.email), message);
                Err(FlowError::RegistrationRejected { message })
            }
        }
    }

    /// Submit login credentials.
    ///
    /// The remember-me choice is persisted locally with the pending flow
    /// and never forwarded to the credential check itself.
    pub async fn login<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        email: &str,
        password: &str,
        remember_me: bool,
        bot_token: Option<&str>,
    ) -> FlowResult<FlowAdvance> {
        self.gate_bots(bot_token).await?;

        match self.identity.login(email, password).await? {
            ApiOutcome::Success(ack) => {
                if !self.config.otp_required {
                    // OTP bypass: only a complete payload authenticates.
                    let session = ack
                        .auth
                        .and_then(AuthenticatedSession::from_auth_response)
                        .ok_or(FlowError::InvalidCredentials)?;
                    return self.establish(ctx, session, remember_me).await;
                }
                ctx.set_pending_flow(&PendingAuthFlow::login(email, remember_me))
                    .await?;
                info!("Login OTP dispatched for {}", mask_email(email));
                Ok(FlowAdvance::OtpPending(FlowKind::Login))
            }
            ApiOutcome::Rejected { .. } => {
                debug!("Login rejected for {}", mask_email(email));
                Err(FlowError::InvalidCredentials)
            }
        }
    }

    /// Guard for the OTP entry screens: a pending flow of the right kind
    /// must exist, otherwise the handler redirects to the flow's start.
    pub async fn otp_entry_allowed<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        kind: FlowKind,
    ) -> FlowResult<()> {
        self.require_pending(ctx, kind).await.map(|_| ())
    }

    /// Verify the registration OTP.
    ///
    /// Success destroys the pending flow; failure keeps it so the user can
    /// resubmit.
    pub async fn verify_register_otp<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        otp: &str,
    ) -> FlowResult<FlowAdvance> {
        let pending = self.require_pending(ctx, FlowKind::Register).await?;

        match self
            .identity
            .verify_register_otp(&pending.email, otp)
            .await?
        {
            ApiOutcome::Success(()) => {
                ctx.clear_pending_flow().await?;
                info!("Registration verified for {}", mask_email(&pending.email));
                Ok(FlowAdvance::Verified)
            }
            ApiOutcome::Rejected { .. } => {
                debug!("Register OTP rejected for {}", mask_email(&pending.email));
                Err(FlowError::InvalidOtp)
            }
        }
    }

    /// Verify the login OTP and establish the authenticated session.
    ///
    /// Only a tagged success carrying a complete auth payload
    /// authenticates; an absent or partial payload is `InvalidOtp` and the
    /// pending flow stays intact.
    pub async fn verify_login_otp<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        otp: &str,
    ) -> FlowResult<FlowAdvance> {
        let pending = self.require_pending(ctx, FlowKind::Login).await?;

        match self
            .identity
            .verify_login_otp(&pending.email, otp, pending.remember_me)
            .await?
        {
            ApiOutcome::Success(auth) => {
                let session = AuthenticatedSession::from_auth_response(auth)
                    .ok_or(FlowError::InvalidOtp)?;
                ctx.clear_pending_flow().await?;
                self.establish(ctx, session, pending.remember_me).await
            }
            ApiOutcome::Rejected { .. } => {
                debug!("Login OTP rejected for {}", mask_email(&pending.email));
                Err(FlowError::InvalidOtp)
            }
        }
    }

    /// Rehydrate the session from a persistent identity cookie.
    ///
    /// Read-through refill: does nothing when the session already holds a
    /// token, or when the cookie is invalid or expired. Returns whether a
    /// rehydration happened.
    pub async fn resume_from_cookie<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        cookie_value: &str,
    ) -> FlowResult<bool> {
        if ctx.token().await?.is_some() {
            return Ok(false);
        }
        let claims = match self.cookie_codec.decode(cookie_value) {
            Some(claims) => claims,
            None => return Ok(false),
        };
        let session = AuthenticatedSession::new(claims.token, claims.name, claims.email);
        ctx.set_auth_session(&session).await?;
        info!("Session rehydrated from identity cookie for {}", mask_email(&session.email));
        Ok(true)
    }

    /// Whether this session is authenticated
    pub async fn is_authenticated<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
    ) -> FlowResult<bool> {
        Ok(ctx.token().await?.is_some())
    }

    /// Drop every session entry. Idempotent: logging out twice is not an
    /// error. Cookie deletion is the transport layer's half of logout.
    pub async fn logout<S: SessionStore>(&self, ctx: &SessionContext<S>) -> FlowResult<()> {
        ctx.clear().await?;
        Ok(())
    }

    /// Change the password of the authenticated user
    pub async fn change_password<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        old_password: &str,
        new_password: &str,
    ) -> FlowResult<()> {
        let bearer = self.require_bearer(ctx).await?;
        match self
            .identity
            .change_password(&bearer, old_password, new_password)
            .await?
        {
            ApiOutcome::Success(()) => Ok(()),
            ApiOutcome::Rejected { .. } => Err(FlowError::InvalidCredentials),
        }
    }

    /// Start a password reset for an email address
    pub async fn forgot_password(&self, email: &str) -> FlowResult<()> {
        match self.identity.forgot_password(email).await? {
            ApiOutcome::Success(()) => Ok(()),
            ApiOutcome::Rejected { message } => Err(FlowError::RequestRejected { message }),
        }
    }

    /// Complete a password reset with the emailed reset token
    pub async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> FlowResult<()> {
        match self
            .identity
            .reset_password(token, email, new_password)
            .await?
        {
            ApiOutcome::Success(()) => Ok(()),
            ApiOutcome::Rejected { message } => Err(FlowError::RequestRejected { message }),
        }
    }

    /// Fetch the authenticated user's profile
    pub async fn profile<S: SessionStore>(&self, ctx: &SessionContext<S>) -> FlowResult<Profile> {
        let bearer = self.require_bearer(ctx).await?;
        match self.identity.fetch_profile(&bearer).await? {
            ApiOutcome::Success(profile) => Ok(profile),
            ApiOutcome::Rejected { message } => Err(FlowError::RequestRejected { message }),
        }
    }

    /// Update the authenticated user's profile and refresh the stored
    /// display name
    pub async fn update_profile<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        profile: &Profile,
    ) -> FlowResult<()> {
        let bearer = self.require_bearer(ctx).await?;
        match self.identity.update_profile(&bearer, profile).await? {
            ApiOutcome::Success(()) => {
                ctx.set_username(&profile.full_name).await?;
                Ok(())
            }
            ApiOutcome::Rejected { message } => Err(FlowError::RequestRejected { message }),
        }
    }

    /// Apply the bot gate when configured
    async fn gate_bots(&self, bot_token: Option<&str>) -> FlowResult<()> {
        if !self.config.require_bot_verification {
            return Ok(());
        }
        if self.bot_check.check(bot_token).await {
            Ok(())
        } else {
            Err(FlowError::SecurityCheckFailed)
        }
    }

    /// The pending flow of the given kind, or `MissingFlowState`
    async fn require_pending<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        kind: FlowKind,
    ) -> FlowResult<PendingAuthFlow> {
        match ctx.pending_flow().await? {
            Some(flow) if flow.kind == kind => Ok(flow),
            _ => Err(FlowError::MissingFlowState),
        }
    }

    /// The session's bearer token, or `NotAuthenticated`
    async fn require_bearer<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
    ) -> FlowResult<String> {
        ctx.token().await?.ok_or(FlowError::NotAuthenticated)
    }

    /// Write the authenticated session and, when asked, sign the
    /// persistent identity cookie
    async fn establish<S: SessionStore>(
        &self,
        ctx: &SessionContext<S>,
        session: AuthenticatedSession,
        remember_me: bool,
    ) -> FlowResult<FlowAdvance> {
        ctx.set_auth_session(&session).await?;

        let identity_cookie = if remember_me && self.config.persist_via_cookie {
            let value = self
                .cookie_codec
                .encode(&session)
                .map_err(|e| SessionError::Store(e.to_string()))?;
            Some(value)
        } else {
            None
        };

        info!("Session established for {}", mask_email(&session.email));
        Ok(FlowAdvance::Authenticated {
            session,
            identity_cookie,
        })
    }
}
