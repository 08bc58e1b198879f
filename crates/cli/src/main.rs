//! splunk-knowledge CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: connection settings come from flags or the
//!    `SPLUNK_*` environment variables.
//! 2. **Wire observability**: see [`telemetry`].
//! 3. **Construct infrastructure**: build a [`SplunkClient`] and hand its
//!    [`knowledge::KnowledgeService`] to the selected subcommand.
//! 4. **Report**: results are printed as JSON on stdout; diagnostics go to stderr.

mod telemetry;

use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use knowledge::{AccessControl, ExtractionKey, KnowledgeError, ListOptions};
use serde::Serialize;
use splunk_client::{ClientConfig, SplunkClient};

use crate::telemetry::Telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "splunk-knowledge",
    version,
    about = "Manage Splunk field extractions and their ACLs"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Management URL, e.g. https://splunk.example:8089
    #[arg(long, env = "SPLUNK_URL")]
    url: String,

    #[arg(long, env = "SPLUNK_USERNAME", default_value = "admin")]
    username: String,

    #[arg(long, env = "SPLUNK_PASSWORD", hide_env_values = true)]
    password: String,

    /// Skip TLS certificate verification (self-signed test instances only).
    #[arg(long, env = "SPLUNK_INSECURE_SKIP_VERIFY", default_value_t = false)]
    insecure_skip_verify: bool,

    /// Per-request timeout in seconds.
    #[arg(long, env = "SPLUNK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List field extractions.
    ListExtractions(PageArgs),
    /// List transforms extractions.
    ListTransforms(PageArgs),
    /// Create a field extraction, optionally with an ACL.
    CreateExtraction {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        key: KeyArgs,
        /// ACL owner; the ACL is applied only when --sharing is given too.
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        sharing: Option<String>,
        #[arg(long, default_value = "")]
        perms_read: String,
        #[arg(long, default_value = "")]
        perms_write: String,
    },
    /// Apply an ACL to an existing field extraction.
    SetAcl {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        sharing: String,
        #[arg(long, default_value = "")]
        perms_read: String,
        #[arg(long, default_value = "")]
        perms_write: String,
    },
    /// Delete a field extraction.
    DeleteExtraction {
        #[command(flatten)]
        key: KeyArgs,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long)]
    offset: Option<u32>,
    /// Maximum number of entries; 0 returns all.
    #[arg(long)]
    count: Option<u32>,
}

impl From<PageArgs> for ListOptions {
    fn from(args: PageArgs) -> Self {
        ListOptions {
            offset: args.offset,
            count: args.count,
        }
    }
}

#[derive(Args, Debug)]
struct KeyArgs {
    #[arg(long)]
    stanza: String,
    #[arg(long = "type")]
    kind: String,
    #[arg(long)]
    value: String,
}

impl From<KeyArgs> for ExtractionKey {
    fn from(args: KeyArgs) -> Self {
        ExtractionKey::new(args.stanza, args.kind, args.value)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    status: &'a str,
    resource: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let telemetry = Telemetry::init()?;

    let result = run(cli).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "command failed");
    }

    telemetry.shutdown();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = connect(cli.connection)?;
    let service = client.knowledge();

    match cli.command {
        Command::ListExtractions(page) => {
            let records = service.list_extractions(Some(&page.into())).await?;
            print_json(&records)
        }
        Command::ListTransforms(page) => {
            let records = service.list_transforms(Some(&page.into())).await?;
            print_json(&records)
        }
        Command::CreateExtraction {
            name,
            key,
            owner,
            sharing,
            perms_read,
            perms_write,
        } => {
            // Validate the ACL before anything is sent.
            let acl = match (owner, sharing) {
                (Some(owner), Some(sharing)) => {
                    Some(AccessControl::new(owner, sharing, perms_read, perms_write)?)
                }
                (None, None) => None,
                _ => anyhow::bail!("--owner and --sharing must be given together"),
            };
            let key = ExtractionKey::from(key);

            match service.create_extraction(&name, &key, acl.as_ref()).await {
                Ok(outcome) => print_json(&serde_json::json!({
                    "status": outcome,
                    "resource": key.composite_name(),
                })),
                Err(err @ KnowledgeError::AclNotApplied { .. }) => Err(anyhow::Error::new(err)
                    .context("re-run `set-acl` with the same key to apply the ACL")),
                Err(err) => Err(err.into()),
            }
        }
        Command::SetAcl {
            key,
            owner,
            sharing,
            perms_read,
            perms_write,
        } => {
            let acl = AccessControl::new(owner, sharing, perms_read, perms_write)?;
            let key = ExtractionKey::from(key);
            service.set_extraction_acl(&key, &acl).await?;
            print_json(&Report {
                status: "acl_applied",
                resource: key.composite_name(),
            })
        }
        Command::DeleteExtraction { key } => {
            let key = ExtractionKey::from(key);
            service.delete_extraction(&key).await?;
            print_json(&Report {
                status: "deleted",
                resource: key.composite_name(),
            })
        }
    }
}

fn connect(args: ConnectionArgs) -> anyhow::Result<SplunkClient> {
    let mut config = ClientConfig::new(args.url, args.username, args.password)
        .with_insecure_skip_verify(args.insecure_skip_verify);
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    SplunkClient::new(config).context("could not create Splunk client")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_extraction_parses_key_and_acl_flags() {
        let cli = Cli::try_parse_from([
            "splunk-knowledge",
            "--url",
            "https://splunk.example:8089",
            "--password",
            "changeme",
            "create-extraction",
            "--name",
            "ext1",
            "--stanza",
            "stanza1",
            "--type",
            "RE",
            "--value",
            r"\d+",
            "--owner",
            "admin",
            "--sharing",
            "app",
        ])
        .unwrap();

        assert_eq!(cli.connection.username, "admin");
        match cli.command {
            Command::CreateExtraction { name, key, owner, sharing, perms_read, .. } => {
                assert_eq!(name, "ext1");
                assert_eq!(ExtractionKey::from(key).composite_name(), r"stanza1 : RE-\d+");
                assert_eq!(owner.as_deref(), Some("admin"));
                assert_eq!(sharing.as_deref(), Some("app"));
                assert!(perms_read.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn page_args_map_onto_list_options() {
        let opts = ListOptions::from(PageArgs {
            offset: Some(20),
            count: None,
        });
        assert_eq!(opts, ListOptions::new().with_offset(20));
    }
}
