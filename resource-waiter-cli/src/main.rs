//! `resource-waiter`: block until a SageMaker resource reaches a terminal state.

use anyhow::{Context, Result};
use clap::Parser;
use resource_waiter_core::{CancellationToken, ObservedResponses, Reason};
use resource_waiter_sagemaker::{
    AwsSettings, DescribeError, ResourceDescription, SageMakerWaiter, SageMakerWaiterError,
    SageMakerWaiterService, WaitConfig,
};
use serde::Serialize;
use std::time::Duration;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_CONFIG: i32 = 3;
const EXIT_TIMEOUT: i32 = 4;
const EXIT_INTERRUPTED: i32 = 130;

const WAITERS_HELP: &str = "Waiters:
  endpoint-in-service
  endpoint-deleted
  notebook-instance-in-service
  notebook-instance-stopped
  notebook-instance-deleted
  training-job-completed-or-stopped
  processing-job-completed-or-stopped
  transform-job-completed-or-stopped

Exit codes: 0 success, 1 failure, 2 usage error, 3 invalid configuration, 4 timeout, 130 interrupted";

#[derive(Parser, Debug)]
#[command(
    name = "resource-waiter",
    version,
    about = "Wait until a SageMaker resource reaches a terminal state",
    after_help = WAITERS_HELP
)]
struct Cli {
    /// Waiter to run (see the list below)
    waiter: SageMakerWaiter,

    /// Name of the endpoint, notebook instance or job
    name: String,

    /// Overall wait budget in seconds
    #[arg(long, env = "RESOURCE_WAITER_MAX_WAIT", default_value_t = 3600)]
    max_wait: u64,

    /// Minimum delay between polls in seconds (defaults to the waiter's service default)
    #[arg(long, env = "RESOURCE_WAITER_MIN_DELAY")]
    min_delay: Option<u64>,

    /// Maximum delay between polls in seconds (defaults to the waiter's service default)
    #[arg(long, env = "RESOURCE_WAITER_MAX_DELAY")]
    max_delay: Option<u64>,

    /// AWS region to use instead of the default provider chain
    #[arg(long)]
    region: Option<String>,

    /// Named AWS profile
    #[arg(long)]
    profile: Option<String>,

    /// Stop on describe errors no waiter rule recognises instead of retrying them
    #[arg(long)]
    fail_on_unknown_errors: bool,

    /// Print a JSON report to stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn wait_config(&self) -> WaitConfig {
        let mut config = WaitConfig::new(Duration::from_secs(self.max_wait))
            .fail_on_unknown_errors(self.fail_on_unknown_errors);
        if let Some(min_delay) = self.min_delay {
            config = config.with_min_delay(Duration::from_secs(min_delay));
        }
        if let Some(max_delay) = self.max_delay {
            config = config.with_max_delay(Duration::from_secs(max_delay));
        }
        config
    }
}

/// Machine-readable result printed with `--json`.
#[derive(Debug, Serialize)]
struct WaitReport {
    waiter: String,
    name: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    observed: Option<ObservedResponses>,
}

type WaitResult =
    Result<resource_waiter_core::WaiterSuccess<ResourceDescription, DescribeError>, SageMakerWaiterError>;

fn exit_code(result: &WaitResult) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(
            SageMakerWaiterError::FailureState { .. }
            | SageMakerWaiterError::NonRetryable { .. }
            | SageMakerWaiterError::Unexpected { .. },
        ) => EXIT_FAILURE,
        Err(SageMakerWaiterError::Timeout { .. }) => EXIT_TIMEOUT,
        Err(SageMakerWaiterError::Aborted { .. }) => EXIT_INTERRUPTED,
        Err(SageMakerWaiterError::InvalidConfiguration(_)) => EXIT_INVALID_CONFIG,
    }
}

fn build_report(waiter: SageMakerWaiter, name: &str, result: &WaitResult) -> WaitReport {
    let mut report = WaitReport {
        waiter: waiter.to_string(),
        name: name.to_string(),
        outcome: "success",
        attempts: None,
        elapsed_secs: None,
        status: None,
        message: None,
        observed: None,
    };

    match result {
        Ok(success) => {
            report.attempts = Some(success.attempts);
            report.elapsed_secs = Some(success.elapsed.as_secs_f64());
            report.observed = Some(success.observed.clone());
            match &success.reason {
                Reason::Response(described) => report.status = described.status.clone(),
                Reason::Error(error) => report.message = Some(error.to_string()),
            }
        }
        Err(err) => {
            report.message = Some(err.to_string());
            match err {
                SageMakerWaiterError::FailureState {
                    status, observed, ..
                } => {
                    report.outcome = "failure";
                    report.status = Some(status.clone());
                    report.observed = Some(observed.clone());
                }
                SageMakerWaiterError::NonRetryable { .. } => report.outcome = "failure",
                SageMakerWaiterError::Unexpected { .. } => report.outcome = "unexpected",
                SageMakerWaiterError::Timeout {
                    elapsed,
                    last,
                    observed,
                    ..
                } => {
                    report.outcome = "timeout";
                    report.elapsed_secs = Some(elapsed.as_secs_f64());
                    report.status = last.as_ref().and_then(|d| d.status.clone());
                    report.observed = Some(observed.clone());
                }
                SageMakerWaiterError::Aborted { .. } => report.outcome = "aborted",
                SageMakerWaiterError::InvalidConfiguration(_) => {
                    report.outcome = "invalid-configuration";
                }
            }
        }
    }
    report
}

fn print_human(report: &WaitReport) {
    match report.outcome {
        "success" => eprintln!(
            "{}: '{}' reached {} after {} attempt(s) in {:.0}s",
            report.waiter,
            report.name,
            report.status.as_deref().unwrap_or("its target state"),
            report.attempts.unwrap_or_default(),
            report.elapsed_secs.unwrap_or_default()
        ),
        _ => eprintln!("{}", report.message.as_deref().unwrap_or(report.outcome)),
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config = cli.wait_config();

    // Reject bad bounds before touching AWS configuration
    if let Err(e) = config.options_for(cli.waiter).validate() {
        eprintln!("Invalid waiter configuration: {e}");
        return Ok(EXIT_INVALID_CONFIG);
    }

    let token = CancellationToken::new();
    let config = config.with_cancellation(token.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, stopping after the current poll");
            token.cancel();
        }
    });

    let service = SageMakerWaiterService::from_settings(&AwsSettings {
        region: cli.region.clone(),
        profile: cli.profile.clone(),
    })
    .await;

    let result = service.wait_until(cli.waiter, &cli.name, config).await;
    let report = build_report(cli.waiter, &cli.name, &result);

    print_human(&report);
    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    }

    Ok(exit_code(&result))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
