//! The individual walkthrough steps.

use super::{Step, StepContext, StepReport};
use crate::error::Error;
use crate::executor::{Connector, HttpClient};
use crate::models::response::HttpResponse;
use crate::session::Session;

/// Field read from the API root payload.
pub const CURRENT_USER_URL_FIELD: &str = "current_user_url";

/// Header read from the API root response.
pub const SERVER_HEADER: &str = "Server";

/// Media type requested from the user endpoint.
pub const JSON_ACCEPT: &str = "application/json";

/// Form submitted to the echo endpoint.
pub const FORM_DATA: [(&str, &str); 1] = [("key", "value")];

/// Result of fetching one target in the status check.
#[derive(Debug)]
pub enum TargetOutcome {
    /// The request completed with a non-error status.
    Success { url: String },
    /// The request completed with a 4xx or 5xx status.
    HttpError { url: String, error: Error },
    /// The request failed for any other reason.
    OtherError { url: String, error: Error },
}

impl TargetOutcome {
    pub fn url(&self) -> &str {
        match self {
            TargetOutcome::Success { url }
            | TargetOutcome::HttpError { url, .. }
            | TargetOutcome::OtherError { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TargetOutcome::Success { .. })
    }

    /// The line printed for this outcome.
    pub fn message(&self) -> String {
        match self {
            TargetOutcome::Success { .. } => "Request and response successful".to_string(),
            TargetOutcome::HttpError { error, .. } => format!("HTTP Error: {}", error),
            TargetOutcome::OtherError { error, .. } => format!("Other error: {}", error),
        }
    }
}

/// GETs each URL and checks its status, independently and in order.
///
/// Failures are classified rather than propagated; one bad target never
/// stops the others.
pub fn check_targets<C, S>(client: &mut C, urls: &[S]) -> Vec<TargetOutcome>
where
    C: HttpClient,
    S: AsRef<str>,
{
    urls.iter()
        .map(|url| {
            let url = url.as_ref().to_string();
            let checked = client
                .get(&url)
                .map_err(Error::from)
                .and_then(|response| response.raise_for_status().map(|_| ()));

            match checked {
                Ok(()) => TargetOutcome::Success { url },
                Err(error @ Error::HttpStatus { .. }) => TargetOutcome::HttpError { url, error },
                Err(error) => TargetOutcome::OtherError { url, error },
            }
        })
        .collect()
}

pub(crate) fn simple_get<C: Connector>(ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::SimpleGet);
    let response = ctx.client.get(&ctx.config.api_root)?;

    report.line(format!("GET {}", response.request.url));
    report.line(format!(
        "Status code: {} {}",
        response.status_code, response.status_text
    ));
    Ok(report)
}

pub(crate) fn status_check<C: Connector>(ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::StatusCheck);
    let targets = [ctx.config.api_root.as_str(), ctx.config.invalid_url.as_str()];

    for outcome in check_targets(&mut ctx.client, &targets) {
        log::debug!("{} -> {}", outcome.url(), outcome.message());
        report.line(outcome.message());
    }
    Ok(report)
}

pub(crate) fn payload<C: Connector>(ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::Payload);
    let response = ctx.client.get(&ctx.config.api_root)?;

    report.line("Payload of response in bytes:");
    report.line(response.content_literal());
    report.line("");
    report.line(format!(
        "Payload of response in string ({}):",
        response.encoding().name()
    ));
    report.line(response.text());

    ctx.last_response = Some(response);
    Ok(report)
}

pub(crate) fn json_field<C: Connector>(ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::JsonField);
    let payload = ctx.root_response()?.json()?;
    let value = payload.field_text(CURRENT_USER_URL_FIELD)?;

    report.line(format!(
        "Current_user_url value of dictionary created from response payload: {}",
        value
    ));
    Ok(report)
}

pub(crate) fn header_lookup<C: Connector>(ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::HeaderLookup);
    let response = ctx.root_response()?;
    let server = response.headers.require(SERVER_HEADER)?;

    report.line(format!("Server name from header: {}", server));
    Ok(report)
}

pub(crate) fn form_post<C: Connector>(ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::FormPost);
    let response = ctx.client.post_form(&ctx.config.echo_url, &FORM_DATA)?;

    report.line(format!("Request URL: {}", response.request.url));
    report.line(format!(
        "Request body: {}",
        response.request.body_text().unwrap_or_default()
    ));
    Ok(report)
}

pub(crate) fn authenticated_session<C: Connector>(
    ctx: &mut StepContext<'_, C>,
) -> Result<StepReport, Error> {
    let mut report = StepReport::new(Step::AuthenticatedSession);
    let config = ctx.config;
    let credentials = ctx.credentials;

    if config.has_placeholder_username() {
        log::warn!(
            "username is still the placeholder; pass --username or set WALKTHROUGH_USERNAME"
        );
    }

    let transport = ctx.connector.connect()?;
    let response: HttpResponse = Session::scoped(transport, |session| -> Result<_, Error> {
        session.set_header("Accept", JSON_ACCEPT);
        session.set_auth(credentials.obtain_credentials(&config.username)?);
        Ok(session.get(&config.user_endpoint)?)
    })?;

    report.line(format!(
        "GET {} as {} -> {} {}",
        response.request.url, config.username, response.status_code, response.status_text
    ));
    report.line("Headers:");
    for (name, value) in response.headers.iter() {
        report.line(format!("  {}: {}", name, value));
    }
    report.line("Payload:");
    report.line(response.json()?.to_pretty_string());
    Ok(report)
}
