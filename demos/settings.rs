//! Walks through the store operations against the bundled `Settings` template
//!
//! Set `RUST_LOG=plist_store=info` to hide the per-entry dumps.

use plist_store::{AppName, Locations, StoreManager, Value};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Window {
    width: u32,
    height: u32,
    maximized: bool,
}

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("plist_store=debug")),
        )
        .init();

    let app_name = AppName::new("com", "example", "plist_store_demo");
    let documents = Locations::for_app(&app_name).documents_dir().to_path_buf();
    let templates = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

    let mut manager = StoreManager::new(Locations::new(templates, documents));

    println!("=== Plist Store Example ===\n");

    println!("1. Starting up...");
    manager.start_up(["Settings", "Missing"], true);
    println!("   Settings available: {}", manager.is_available("Settings"));
    println!("   Missing available: {}\n", manager.is_available("Missing"));

    println!("2. Adding theme...");
    println!("   {:?}\n", manager.add_entry("dark", "theme", "Settings"));

    println!("3. Adding theme again...");
    println!("   {:?}\n", manager.add_entry("light", "theme", "Settings"));

    println!("4. Reading theme...");
    println!("   {:?}\n", manager.check_value("theme", "Settings"));

    println!("5. Bumping launch count...");
    let launches = manager
        .check_value("launchCount", "Settings")
        .value()
        .and_then(Value::as_signed_integer)
        .unwrap_or(0);
    println!("   {:?}\n", manager.save_entry(launches + 1, "launchCount", "Settings"));

    println!("6. Storing a typed value...");
    let window = Window {
        width: 1280,
        height: 800,
        maximized: false,
    };
    match manager.add_serialized(&window, "window", "Settings") {
        Ok(outcome) => println!("   {:?}", outcome),
        Err(e) => println!("   failed: {}", e),
    }
    match manager.check_value_as::<Window>("window", "Settings") {
        Ok(loaded) => println!("   loaded: {:?}\n", loaded),
        Err(e) => println!("   failed: {}\n", e),
    }

    println!("7. Revealing everything...");
    manager.reveal_all("Settings");
    println!("   keys: {:?}\n", manager.keys("Settings"));

    println!("8. Removing theme...");
    println!("   {:?}", manager.remove_entry("theme", "Settings"));
    println!("   {:?}\n", manager.check_value("theme", "Settings"));

    println!("9. Purging...");
    println!("   {:?}", manager.purge_all("Settings"));
    println!("   {:?}\n", manager.purge_all("Settings"));

    println!("=== Example Complete ===");
}
