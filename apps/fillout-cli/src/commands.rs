use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use fillout_host::{
    FileStaticData, MemoryCredentialStore, NodeContext, ReqwestRequestHelper, RequestHelperConfig,
    TriggerNode, WebhookRequest, lifecycle,
};
use fillout_trigger::{
    FILLOUT_CREDENTIAL_NAME, FilloutConfig, FilloutTrigger, webhook::load_registration,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

#[derive(Debug, Parser)]
#[command(name = "fillout", version, about = "Manage Fillout form webhooks")]
pub struct Cli {
    /// File the webhook registration is persisted in
    #[arg(long, global = true, default_value = ".fillout-state.json")]
    pub state: PathBuf,

    /// Node id the registration is stored under
    #[arg(long, global = true, default_value = "fillout-cli")]
    pub node_id: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the forms of the account
    Forms,
    /// Subscribe a webhook for a form
    Register {
        #[arg(long)]
        form: String,
        /// Public base URL; the callback is `<base>/<node-id>/webhook`
        #[arg(long, env = "FILLOUT_WEBHOOK_BASE_URL")]
        webhook_base_url: String,
    },
    /// Remove the subscribed webhook
    Unregister,
    /// Show the persisted registration
    Status,
    /// Reshape a captured webhook body, `-` reads stdin
    Transform { input: PathBuf },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let node = FilloutTrigger::new();

    match &cli.command {
        Command::Forms => {
            let ctx = context(&cli)?;
            for form in node.load_options(&ctx, "getForms").await? {
                println!("{}\t{}", form.value, form.name);
            }
        }
        Command::Register {
            form,
            webhook_base_url,
        } => {
            let ctx = context(&cli)?
                .with_parameter("form", json!(form))
                .with_webhook_base_url(webhook_base_url);
            if lifecycle::activate(&node, &ctx).await? {
                println!("Registered webhook for form {}", form);
            } else {
                println!("Webhook already registered, run `unregister` first to change forms");
            }
        }
        Command::Unregister => {
            let ctx = context(&cli)?;
            lifecycle::deactivate(&node, &ctx).await?;
            println!("No webhook registered");
        }
        Command::Status => {
            let ctx = context_without_credentials(&cli);
            match load_registration(&ctx).await? {
                Some(registration) => {
                    println!("{}", serde_json::to_string_pretty(&registration)?)
                }
                None => println!("No webhook registered"),
            }
        }
        Command::Transform { input } => {
            let body = read_body(input).await?;
            let ctx = context_without_credentials(&cli);
            let response = node
                .webhook(&ctx, WebhookRequest::post("default", body))
                .await?;
            let items: Vec<_> = response.items().cloned().collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}

fn context(cli: &Cli) -> anyhow::Result<NodeContext> {
    let config = FilloutConfig::from_env().context("Failed to load Fillout configuration")?;

    let credentials = MemoryCredentialStore::new();
    credentials.insert(FILLOUT_CREDENTIAL_NAME, config.credentials.to_host_value());

    let http = ReqwestRequestHelper::new(RequestHelperConfig {
        timeout: config.request_timeout,
        ..Default::default()
    })?;

    Ok(NodeContext::new(
        cli.node_id.clone(),
        Arc::new(credentials),
        Arc::new(FileStaticData::new(&cli.state)),
        Arc::new(http),
    ))
}

/// Context for commands that never reach the Fillout API
fn context_without_credentials(cli: &Cli) -> NodeContext {
    NodeContext::new(
        cli.node_id.clone(),
        Arc::new(MemoryCredentialStore::new()),
        Arc::new(FileStaticData::new(&cli.state)),
        Arc::new(ReqwestRequestHelper::with_client(Default::default())),
    )
}

async fn read_body(input: &Path) -> anyhow::Result<Vec<u8>> {
    let mut body = Vec::new();
    if input.as_os_str() == "-" {
        tokio::io::stdin().read_to_end(&mut body).await?;
    } else {
        body = tokio::fs::read(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;
    }

    if body.is_empty() {
        bail!("Webhook body is empty");
    }
    Ok(body)
}
