//! MoMo CLI
//!
//! Command-line interface for the mobile-money collection API.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use momo_client::{
    AuthScheme, ClientConfig, MomoClient, PartyIdType, Payer, PaymentRequest, ReferenceId,
    TargetEnvironment,
};
use momo_hex::{CollectionService, inbound::HttpServer};

#[derive(Parser)]
#[command(name = "momo")]
#[command(author, version, about = "Mobile-money collection API CLI client", long_about = None)]
struct Cli {
    /// Subscription key of the collection product
    #[arg(long, env = "MOMO_SUBSCRIPTION_KEY", default_value = "", hide_env_values = true)]
    subscription_key: String,

    /// API key issued for the API user
    #[arg(long, env = "MOMO_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// API user id (the reference id it was provisioned with)
    #[arg(long, env = "MOMO_API_USER_ID", default_value = "")]
    api_user_id: String,

    /// Target environment (sandbox, production)
    #[arg(long, env = "MOMO_ENVIRONMENT", default_value = "sandbox")]
    environment: TargetEnvironment,

    /// Token endpoint authentication (basic, subscription-key)
    #[arg(long, env = "MOMO_AUTH_SCHEME", default_value = "basic")]
    auth_scheme: AuthScheme,

    /// Provider base URL
    #[arg(long, env = "MOMO_BASE_URL")]
    base_url: Option<String>,

    /// Path prefix of the provisioning endpoints
    #[arg(long, env = "MOMO_PROVISIONING_PREFIX")]
    provisioning_prefix: Option<String>,

    /// Per-request deadline in seconds
    #[arg(long, env = "MOMO_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// API user provisioning
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Fetch a bearer token
    Token,
    /// Poll the backchannel (CIBA) token endpoint
    Oauth2Token {
        /// Request id returned by the backchannel authorize call
        auth_req_id: String,
    },
    /// Read the collection account balance
    Balance {
        /// Bearer token; fetched with the configured credentials when omitted
        #[arg(long, env = "MOMO_BEARER_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Submit a request to pay
    Pay {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "EUR")]
        currency: String,
        #[arg(long)]
        external_id: String,
        /// Payer's party id (a phone number for MSISDN)
        #[arg(long)]
        payer: String,
        /// Party id type (MSISDN, EMAIL, PARTY_CODE)
        #[arg(long, default_value = "MSISDN")]
        party_id_type: String,
        #[arg(long, default_value = "")]
        payer_message: String,
        #[arg(long, default_value = "")]
        payee_note: String,
        #[arg(long, env = "MOMO_BEARER_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Get the status of a request to pay
    Status {
        /// Reference id returned by `pay`
        reference_id: String,
        #[arg(long, env = "MOMO_BEARER_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Run the HTTP facade
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Provision a new API user
    Create {
        /// Reference id for the user; a UUID is generated when omitted
        #[arg(long)]
        reference_id: Option<String>,
        /// Host the provider sends callbacks to
        #[arg(long)]
        callback_host: String,
    },
    /// Issue an API key for a provisioned user
    Key {
        reference_id: String,
    },
    /// Show the provider's record of an API user
    Get {
        reference_id: String,
    },
}

fn parse_party_id_type(s: &str) -> Result<PartyIdType> {
    match s.to_uppercase().replace('-', "_").as_str() {
        "MSISDN" => Ok(PartyIdType::Msisdn),
        "EMAIL" => Ok(PartyIdType::Email),
        "PARTY_CODE" => Ok(PartyIdType::PartyCode),
        _ => anyhow::bail!(
            "Unknown party id type: {}. Supported: MSISDN, EMAIL, PARTY_CODE",
            s
        ),
    }
}

fn build_client(cli: &Cli) -> Result<MomoClient> {
    let mut config = ClientConfig::new(
        cli.subscription_key.as_str(),
        cli.api_key.as_str(),
        cli.api_user_id.as_str(),
        cli.environment,
    )
    .with_auth_scheme(cli.auth_scheme);
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(prefix) = &cli.provisioning_prefix {
        config = config.with_provisioning_prefix(prefix.as_str());
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(MomoClient::new(config)?)
}

/// Uses the given token, or fetches a fresh one.
async fn bearer(client: &MomoClient, token: Option<String>) -> Result<String> {
    match token {
        Some(token) => Ok(token),
        None => Ok(client.get_auth_token().await?.access_token),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Ctrl-C aborts whatever request is in flight
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let client = build_client(&cli)?.with_cancellation(cancel);

    match cli.command {
        Commands::User { action } => match action {
            UserCommands::Create {
                reference_id,
                callback_host,
            } => {
                let reference_id = match reference_id {
                    Some(id) => ReferenceId::parse(&id)?,
                    None => ReferenceId::generate(),
                };
                client
                    .create_api_user(reference_id.as_str(), &callback_host)
                    .await?;
                let out = serde_json::json!({ "reference_id": reference_id });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            UserCommands::Key { reference_id } => {
                let api_key = client.create_api_key(&reference_id).await?;
                let out = serde_json::json!({ "api_key": api_key });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            UserCommands::Get { reference_id } => {
                let details = client.get_api_user_details(&reference_id).await?;
                println!("{}", serde_json::to_string_pretty(&details)?);
            }
        },

        Commands::Token => {
            let token = client.get_auth_token().await?;
            println!("{}", serde_json::to_string_pretty(&token)?);
        }

        Commands::Oauth2Token { auth_req_id } => {
            let token = client.create_oauth2_token(&auth_req_id).await?;
            println!("{}", serde_json::to_string_pretty(&token)?);
        }

        Commands::Balance { token } => {
            let token = bearer(&client, token).await?;
            let balance = client.get_account_balance(&token).await?;
            println!("{}", serde_json::to_string_pretty(&balance)?);
        }

        Commands::Pay {
            amount,
            currency,
            external_id,
            payer,
            party_id_type,
            payer_message,
            payee_note,
            token,
        } => {
            let request = PaymentRequest {
                amount,
                currency,
                external_id,
                payer: Payer {
                    party_id_type: parse_party_id_type(&party_id_type)?,
                    party_id: payer,
                },
                payer_message,
                payee_note,
            };
            let token = bearer(&client, token).await?;
            let reference_id = client.request_to_pay(&token, &request).await?;
            let out = serde_json::json!({ "reference_id": reference_id });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Status {
            reference_id,
            token,
        } => {
            let token = bearer(&client, token).await?;
            let result = client.get_payment_status(&reference_id, &token).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Serve { port } => {
            let server = HttpServer::new(CollectionService::new(client));
            server.run(&format!("0.0.0.0:{port}")).await?;
        }
    }

    Ok(())
}
