//! Exercise every travel tool against the live upstream services.
//!
//! Run with: cargo run -p travel-tools --example test_tools -- Goa

use travel_tools::{default_registry, ToolRegistry, ToolsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_tools=debug".into()),
        )
        .init();

    let place = std::env::args().nth(1).unwrap_or_else(|| "Goa".to_string());

    println!("=== Travel Tools Test ===\n");

    let config = ToolsConfig::from_env()?;
    let registry = default_registry(&config)?;

    println!("Registered tools:");
    for def in registry.definitions() {
        println!(
            "  - {}: {}",
            def.function.name,
            def.function.description.unwrap_or_default()
        );
    }
    println!();

    let calls = [
        ("add_numbers", r#"{"a": 1200, "b": 350}"#.to_string()),
        ("calculate_total_expenses", r#"{"expenses": "1200,350,80.5"}"#.to_string()),
        ("calculate_per_person_cost", r#"{"total_cost": 1630.5, "num_people": 3}"#.to_string()),
        ("calculate_daily_budget", r#"{"total_budget": 1630.5, "num_days": 0}"#.to_string()),
        (
            "convert_currency",
            r#"{"amount": 100, "from_currency": "USD", "to_currency": "INR"}"#.to_string(),
        ),
        (
            "convert_multiple_currencies",
            r#"{"amount": 100, "from_currency": "USD", "to_currencies": "EUR,GBP,XYZ"}"#.to_string(),
        ),
        ("get_current_weather", format!(r#"{{"city": "{}"}}"#, place)),
        ("get_weather_forecast", format!(r#"{{"city": "{}"}}"#, place)),
        ("search_place_info", format!(r#"{{"place_name": "{}"}}"#, place)),
        ("get_comprehensive_travel_info", format!(r#"{{"place_name": "{}"}}"#, place)),
    ];

    for (name, args) in calls {
        run(&registry, name, &args).await;
    }

    println!("\n=== All tools exercised ===");
    Ok(())
}

async fn run(registry: &ToolRegistry, name: &str, args: &str) {
    println!("--- {} {} ---", name, args);
    match registry.execute_json(name, args).await {
        Ok(output) => println!("{}\n", output.content),
        Err(e) => println!("Error: {}\n", e),
    }
}
