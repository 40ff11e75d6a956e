use tracing::{error, info, Instrument};

use cafe_rewards::domain::Product;
use cafe_rewards::{setup_tracing, AuthContext, RewardsSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting cafe rewards demo");

    // Create the entire rewards system (starts all services)
    let system = RewardsSystem::new();

    // Seed the menu the way the admin screen would
    let span = tracing::info_span!("catalog_seeding");
    async {
        info!("Seeding catalog");
        for product in [
            Product::new("espresso", "Espresso", 350),
            Product::new("latte", "Oat Milk Latte", 525),
            Product::new("beans-ethiopia", "Ethiopia Single Origin Beans", 1650),
        ] {
            system
                .catalog
                .upsert_product(product)
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    let auth = AuthContext::signed_in("customer_1");

    // Ten espressos: the tenth crosses the reward threshold
    let span = tracing::info_span!("purchase_flow");
    async {
        for _ in 0..10 {
            match system.purchases.purchase(&auth, "espresso").await {
                Ok(outcome) => info!(
                    order_id = %outcome.order.id,
                    new_points = outcome.new_points,
                    reward_granted = outcome.reward_granted,
                    "Purchase settled"
                ),
                Err(e) => error!(error = %e, "Purchase failed"),
            }
        }
    }
    .instrument(span)
    .await;

    if let Some(ledger) = system
        .ledger
        .get_ledger("customer_1".to_string())
        .await
        .map_err(|e| e.to_string())?
    {
        info!(
            points = ledger.points,
            total_earned = ledger.total_earned,
            rewards_redeemed = ledger.rewards_redeemed,
            "Loyalty summary"
        );
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
