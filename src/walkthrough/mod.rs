//! The walkthrough itself: an ordered list of named steps and the driver
//! that runs them.
//!
//! Each step is a function from a [`StepContext`] to a [`StepReport`]. The
//! driver runs the steps in order, writes each report to an output sink, and
//! stops at the first error. Only [`Step::StatusCheck`] recovers from
//! request failures; every other step lets them propagate.

pub mod steps;

pub use steps::{check_targets, TargetOutcome};

use crate::auth::CredentialProvider;
use crate::config::WalkthroughConfig;
use crate::error::Error;
use crate::executor::{Connector, HttpClient};
use crate::models::response::HttpResponse;
use crate::session::Session;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// One step of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// GET the API root and look at the status code.
    SimpleGet,
    /// GET a good and a bad URL, reporting HTTP errors per target.
    StatusCheck,
    /// Show the body as raw bytes and as decoded text.
    Payload,
    /// Parse the body as JSON and read one field.
    JsonField,
    /// Read one response header.
    HeaderLookup,
    /// POST a form and read back what was sent.
    FormPost,
    /// GET a credential-gated endpoint through a scoped session.
    AuthenticatedSession,
}

impl Step {
    /// Every step, in the order the walkthrough runs them.
    pub const ALL: [Step; 7] = [
        Step::SimpleGet,
        Step::StatusCheck,
        Step::Payload,
        Step::JsonField,
        Step::HeaderLookup,
        Step::FormPost,
        Step::AuthenticatedSession,
    ];

    /// Short name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Step::SimpleGet => "simple-get",
            Step::StatusCheck => "status-check",
            Step::Payload => "payload",
            Step::JsonField => "json-field",
            Step::HeaderLookup => "header-lookup",
            Step::FormPost => "form-post",
            Step::AuthenticatedSession => "authenticated-session",
        }
    }

    /// One-line description shown above the step's output.
    pub fn title(&self) -> &'static str {
        match self {
            Step::SimpleGet => "Simple GET request",
            Step::StatusCheck => "Checking status codes for HTTP errors",
            Step::Payload => "Response payload as bytes and as text",
            Step::JsonField => "Reading a field from the JSON payload",
            Step::HeaderLookup => "Reading a response header",
            Step::FormPost => "POST with a form-encoded body",
            Step::AuthenticatedSession => "Authenticated session",
        }
    }

    /// Runs this step against `ctx`.
    pub fn run<C: Connector>(self, ctx: &mut StepContext<'_, C>) -> Result<StepReport, Error> {
        match self {
            Step::SimpleGet => steps::simple_get(ctx),
            Step::StatusCheck => steps::status_check(ctx),
            Step::Payload => steps::payload(ctx),
            Step::JsonField => steps::json_field(ctx),
            Step::HeaderLookup => steps::header_lookup(ctx),
            Step::FormPost => steps::form_post(ctx),
            Step::AuthenticatedSession => steps::authenticated_session(ctx),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .iter()
            .copied()
            .find(|step| step.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Step::ALL.iter().map(Step::name).collect();
                format!("unknown step '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// What a step produced: the lines it wants printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub lines: Vec<String>,
}

impl StepReport {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            lines: Vec::new(),
        }
    }

    /// Appends a line of output.
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Writes the title and every line, followed by a blank line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "--- {} ---", self.step.title())?;
        for line in &self.lines {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)
    }
}

/// Everything a step may use.
pub struct StepContext<'a, C: Connector> {
    pub config: &'a WalkthroughConfig,
    /// Opens transports for steps that need their own session.
    pub connector: &'a C,
    pub credentials: &'a dyn CredentialProvider,
    /// Unauthenticated client shared by the steps.
    pub client: Session<C::Transport>,
    /// Response to the last GET of the API root, reused by later steps.
    pub last_response: Option<HttpResponse>,
}

impl<'a, C: Connector> StepContext<'a, C> {
    /// Opens the shared client and builds a context around it.
    pub fn new(
        config: &'a WalkthroughConfig,
        connector: &'a C,
        credentials: &'a dyn CredentialProvider,
    ) -> Result<Self, Error> {
        let client = Session::open(connector.connect()?);
        Ok(Self {
            config,
            connector,
            credentials,
            client,
            last_response: None,
        })
    }

    /// The kept API root response, fetching it first if no step has yet.
    pub fn root_response(&mut self) -> Result<&HttpResponse, Error> {
        let response = match self.last_response.take() {
            Some(response) => response,
            None => self.client.get(&self.config.api_root)?,
        };
        Ok(self.last_response.insert(response))
    }
}

/// Runs a sequence of steps and writes their output.
pub struct Walkthrough<C: Connector, P: CredentialProvider> {
    config: WalkthroughConfig,
    connector: C,
    credentials: P,
    steps: Vec<Step>,
}

impl<C: Connector, P: CredentialProvider> Walkthrough<C, P> {
    /// Creates a walkthrough that runs every step.
    pub fn new(config: WalkthroughConfig, connector: C, credentials: P) -> Self {
        Self {
            config,
            connector,
            credentials,
            steps: Step::ALL.to_vec(),
        }
    }

    /// Restricts the run to `steps`, which still run in walkthrough order.
    pub fn with_steps(mut self, steps: &[Step]) -> Self {
        self.steps = Step::ALL
            .iter()
            .copied()
            .filter(|step| steps.contains(step))
            .collect();
        self
    }

    /// Runs the steps in order, writing each report to `out` as it completes.
    ///
    /// # Errors
    ///
    /// Stops at the first step that fails and returns its error. Reports of
    /// earlier steps have already been written.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Vec<StepReport>, Error> {
        let mut ctx = StepContext::new(&self.config, &self.connector, &self.credentials)?;
        let mut reports = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            log::info!("step {}/{}: {}", index + 1, self.steps.len(), step);
            let report = step.run(&mut ctx).map_err(|e| {
                log::error!("step {} failed: {}", step, e);
                e
            })?;
            report.write_to(out)?;
            reports.push(report);
        }

        Ok(reports)
    }
}
