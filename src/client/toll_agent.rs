use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use smart_toll::{
    client::{ClientError, TollApiClient},
    models::{CreateTransactionRequest, NumberOrString, PaymentMethod, VehicleType},
};

const BOOTHS: [&str; 5] = ["TB001", "TB002", "TB003", "TB004", "TB005"];
const OWNERS: [&str; 4] = ["Jane Doe", "John Smith", "Ana Lopez", "Wei Chen"];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let base_url =
        std::env::var("TOLL_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let payments: usize = std::env::var("AGENT_PAYMENTS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .context("Invalid AGENT_PAYMENTS")?;

    println!("Smart Toll Agent");
    println!("================");
    println!("Server: {}", base_url);
    println!("Payments to submit: {}", payments);
    println!();

    let client = TollApiClient::new(base_url);

    let mut confirmed = 0;
    for i in 0..payments {
        let (booth, vehicle_type, owner, plate, crypto) = {
            let mut rng = rand::thread_rng();
            (
                *BOOTHS.choose(&mut rng).unwrap_or(&"TB001"),
                *VehicleType::ALL.choose(&mut rng).unwrap_or(&VehicleType::Car),
                *OWNERS.choose(&mut rng).unwrap_or(&"Jane Doe"),
                format!("AGT-{:04}", rng.gen_range(0..10_000)),
                rng.gen_bool(0.3),
            )
        };

        let quote = client
            .quote(booth, vehicle_type)
            .await
            .with_context(|| format!("Failed to quote {} at {}", vehicle_type, booth))?;

        let mut request = CreateTransactionRequest {
            vehicle_number: Some(plate.clone()),
            vehicle_type: Some(vehicle_type.to_string()),
            toll_booth: Some(booth.to_string()),
            amount: Some(NumberOrString::Number(quote.amount_usd)),
            owner_name: Some(owner.to_string()),
            ..Default::default()
        };
        if crypto {
            request.payment_method = Some(PaymentMethod::Crypto);
            request.wallet_address = Some(quote.collection_address.clone());
            request.eth_amount = Some(NumberOrString::Text(quote.amount_eth.clone()));
        }

        println!(
            "[{}/{}] {} ({}) at {}: ${:.2}{}",
            i + 1,
            payments,
            plate,
            vehicle_type,
            booth,
            quote.amount_usd,
            if crypto {
                format!(" / {} ETH", quote.amount_eth)
            } else {
                String::new()
            }
        );

        match client.submit_payment(&request).await {
            Ok(created) => {
                confirmed += 1;
                println!(
                    "   [OK] {} hash={}",
                    created.message, created.transaction.blockchain_hash
                );
            }
            Err(ClientError::Api { status, message }) => {
                println!("   [FAILED] {} ({})", message, status);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!();
    println!("Confirmed {}/{} payments", confirmed, payments);

    let chain = client.blocks().await.context("Failed to fetch blocks")?;
    println!(
        "Chain: {} blocks, {} transactions, links valid: {}",
        chain.total_blocks, chain.total_transactions, chain.chain_valid
    );
    for block in &chain.blocks {
        println!(
            "   #{} {} tx prev={}.. hash={}",
            block.index,
            block.transactions.len(),
            abbreviate(&block.previous_hash, 12),
            block.hash
        );
    }

    Ok(())
}

/// First `chars` characters of `hash`, cut on a char boundary.
fn abbreviate(hash: &str, chars: usize) -> &str {
    hash.char_indices()
        .nth(chars)
        .map_or(hash, |(end, _)| &hash[..end])
}
