//! Process-wide log context
//!
//! Every log line of a run carries the topic, host, environment and
//! application identity. The values are gathered once at startup into a
//! [`LogContext`] and attached to a root span; nothing global is mutated.

use crate::config::ExporterConfig;
use tracing::Level;

/// Fields attached to every log event of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    topic_name: String,
    hostname: String,
    environment: String,
    application: String,
    app_version: String,
    component: String,
}

impl LogContext {
    /// Creates a context from explicit values
    pub fn new(
        topic_name: impl Into<String>,
        hostname: impl Into<String>,
        environment: impl Into<String>,
        application: impl Into<String>,
        app_version: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            topic_name: topic_name.into(),
            hostname: hostname.into(),
            environment: environment.into(),
            application: application.into(),
            app_version: app_version.into(),
            component: component.into(),
        }
    }

    /// Builds the context for this process from configuration
    ///
    /// The host name comes from `HOSTNAME`, falling back to `unknown`.
    pub fn from_config(config: &ExporterConfig, component: impl Into<String>) -> Self {
        let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string());
        Self::new(
            &config.snapshot_sender.topic_name,
            hostname,
            config.environment.to_string(),
            &config.application.name,
            env!("CARGO_PKG_VERSION"),
            component,
        )
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Root span carrying the context fields
    ///
    /// Enter it (or instrument the run's future with it) so that every
    /// event inside the run is tagged. The span is created at ERROR level so
    /// that no configured log level filters it out.
    pub fn span(&self) -> tracing::Span {
        tracing::span!(
            Level::ERROR,
            "run",
            topic_name = %self.topic_name,
            hostname = %self.hostname,
            environment = %self.environment,
            application = %self.application,
            app_version = %self.app_version,
            component = %self.component,
        )
    }
}
