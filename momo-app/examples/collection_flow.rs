//! Collection flow against the provider sandbox.
//!
//! Provisions a fresh API user, fetches a token, reads the balance and
//! submits a request to pay, then polls until the payment settles.
//!
//! Run with: MOMO_SUBSCRIPTION_KEY=... cargo run -p momo-app --example collection_flow

use std::time::Duration;

use momo_client::{
    ClientConfig, MomoClient, Payer, PaymentRequest, ReferenceId, TargetEnvironment,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info,momo_client=debug").init();

    let subscription_key = std::env::var("MOMO_SUBSCRIPTION_KEY")
        .map_err(|_| anyhow::anyhow!("MOMO_SUBSCRIPTION_KEY environment variable is required"))?;

    // ─────────────────────────────────────────────────────────────────────────
    // Provisioning
    // ─────────────────────────────────────────────────────────────────────────

    let provisioning = MomoClient::new(
        ClientConfig::new(&subscription_key, "", "", TargetEnvironment::Sandbox)
            .with_timeout(Duration::from_secs(30)),
    )?;

    let user_id = ReferenceId::generate();
    provisioning
        .create_api_user(user_id.as_str(), "webhook.example.com")
        .await?;
    println!("API user:  {user_id}");

    let api_key = provisioning.create_api_key(user_id.as_str()).await?;
    println!("API key:   {api_key}");

    // ─────────────────────────────────────────────────────────────────────────
    // Collection
    // ─────────────────────────────────────────────────────────────────────────

    let client = MomoClient::new(
        ClientConfig::new(&subscription_key, api_key, user_id.as_str(), TargetEnvironment::Sandbox)
            .with_timeout(Duration::from_secs(30)),
    )?;

    let token = client.get_auth_token().await?;
    println!("Token expires in {}s", token.expires_in);

    let balance = client.get_account_balance(&token.access_token).await?;
    println!("Balance:   {} {}", balance.available_balance, balance.currency);

    let payment = PaymentRequest {
        amount: "100".into(),
        currency: "EUR".into(),
        external_id: "order-1001".into(),
        payer: Payer::msisdn("46733123453"),
        payer_message: "Order 1001".into(),
        payee_note: "Thank you".into(),
    };
    let reference_id = client.request_to_pay(&token.access_token, &payment).await?;
    println!("Payment:   {reference_id}");

    for _ in 0..10 {
        let result = client
            .get_payment_status(reference_id.as_str(), &token.access_token)
            .await?;
        println!("Status:    {}", result.status);
        if result.is_final() {
            println!("{}", serde_json::to_string_pretty(&result)?);
            break;
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    Ok(())
}
