use crate::adapters::identity::HttpIdentity;
use crate::core::backoff::with_backoff;
use crate::core::render::{render, Verdict};
use crate::core::status::StatusReporter;
use crate::core::verifier::Verifier;
use crate::domain::model::{Outcome, Session};
use crate::domain::ports::{AuditSink, ConfigProvider, LookupService};
use crate::utils::error::{Result, VerifyError};

/// Drives one verification request end to end: online guard, pipeline,
/// verdict rendering.
pub struct VerifyEngine<L, A> {
    verifier: Verifier<L, A>,
    reporter: Option<StatusReporter>,
}

impl<L, A> VerifyEngine<L, A>
where
    L: LookupService,
    A: AuditSink + 'static,
{
    pub fn new(verifier: Verifier<L, A>) -> Self {
        Self {
            verifier,
            reporter: None,
        }
    }

    /// Attach a connection-health reporter. Requests are then refused
    /// unless the transport is connected; an engine without a reporter
    /// performs no guard.
    pub fn with_reporter(mut self, reporter: StatusReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn reporter(&self) -> Option<&StatusReporter> {
        self.reporter.as_ref()
    }

    pub async fn run(&self, raw: &str) -> Result<(Outcome, Option<Verdict>)> {
        if let Some(reporter) = &self.reporter {
            if !reporter.is_online() {
                return Err(VerifyError::Offline);
            }
        }

        let outcome = self.verifier.verify(raw).await?;
        tracing::info!("serial {} resolved as {}", outcome.serial, outcome.status);

        let verdict = render(&outcome);
        if verdict.is_none() {
            tracing::debug!("no verdict rendered for status {}", outcome.status);
        }
        Ok((outcome, verdict))
    }
}

/// Build the session context, signing in through the identity provider
/// when one is configured. The sign-in call is the only operation in
/// the system guarded by the backoff wrapper.
pub async fn establish_session<C: ConfigProvider>(config: &C) -> Result<Session> {
    let Some(endpoint) = config.auth_endpoint() else {
        return Ok(Session::anonymous(config.app_id()));
    };

    let identity = HttpIdentity::new(endpoint, config.auth_token().map(str::to_string));
    let user_id = with_backoff(|| identity.sign_in(), config.auth_attempts()).await?;

    let short: String = user_id.chars().take(8).collect();
    tracing::info!("signed in, user id {}...", short);
    Ok(Session::new(config.app_id(), Some(user_id)))
}
