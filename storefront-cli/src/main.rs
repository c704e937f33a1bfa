use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use storefront_core::{
    AuthToken, CartLineItem, CredentialSource, EnvCredentials, LogSink, Notification,
    NotificationQueue, NotificationSink, Product, RegistrationForm, ReqwestTransport,
    SearchStatus, Severity, Storefront, StorefrontConfig, total_cost, total_quantity,
};

/// Logs every notification and keeps it for printing once the command is done.
#[derive(Debug, Default)]
struct CliSink {
    queue: NotificationQueue,
}

impl NotificationSink for CliSink {
    fn notify(&self, notification: Notification) {
        LogSink.notify(notification.clone());
        self.queue.notify(notification);
    }
}

/// Browse the catalog and manage your cart on a storefront backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the backend (overrides STOREFRONT_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Milliseconds of quiet input before a search is sent (overrides STOREFRONT_DEBOUNCE_MS)
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    /// Bearer token for the cart (falls back to STOREFRONT_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every product in the catalog
    Products,
    /// Search the catalog, feeding the query in one keystroke at a time
    Search { query: String },
    /// Show the cart and its total
    Cart,
    /// Add a product to the cart
    Add { product_id: String },
    /// Change the quantity of a product in the cart (0 removes it)
    Set { product_id: String, quantity: u32 },
    /// Create an account
    Register {
        username: String,
        password: String,
        confirm_password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let mut config = StorefrontConfig::from_env().context("Invalid storefront configuration")?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(millis) = args.debounce_ms {
        config.debounce_delay = Duration::from_millis(millis);
    }
    log::info!("Using backend at {}", config.endpoint);

    let token = args
        .token
        .and_then(AuthToken::new)
        .or_else(|| EnvCredentials::default().auth_token());

    let notifications = Arc::new(CliSink::default());
    let store = Storefront::new(
        ReqwestTransport::new(config.endpoint.clone()),
        notifications.clone(),
        &config,
    );

    match args.command {
        Command::Products => {
            store.load(None).await;
            print_products(&store.catalog());
        }
        Command::Search { query } => {
            let mut typed = String::new();
            for c in query.chars() {
                typed.push(c);
                store.on_search_input(typed.clone());
            }
            store.flush_search().await;

            let search = store.search_state();
            match search.status {
                SearchStatus::Empty => println!("No products found for {query:?}"),
                _ => print_products(&search.results),
            }
        }
        Command::Cart => {
            store.load(token.as_ref()).await;
            match store.cart() {
                Some(items) => print_cart(&items),
                None if token.is_none() => println!("Not logged in"),
                None => {}
            }
        }
        Command::Add { product_id } => {
            store.load(token.as_ref()).await;
            store.add_to_cart(token.as_ref(), &product_id).await;
            if let Some(items) = store.cart() {
                print_cart(&items);
            }
        }
        Command::Set {
            product_id,
            quantity,
        } => {
            store.load(token.as_ref()).await;
            store
                .set_quantity(token.as_ref(), &product_id, quantity)
                .await;
            if let Some(items) = store.cart() {
                print_cart(&items);
            }
        }
        Command::Register {
            username,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                username,
                password,
                confirm_password,
            };
            store.register(&form).await;
        }
    }

    let mut failed = false;
    for notification in notifications.queue.drain() {
        let label = match notification.severity {
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Error => {
                failed = true;
                "error"
            }
        };
        eprintln!("{label}: {}", notification.message);
    }
    if failed {
        bail!("The storefront reported an error");
    }

    Ok(())
}

fn print_products(products: &[Product]) {
    for product in products {
        println!(
            "{:<26} {:<40} {:<12} {:>8.2} {}/5",
            product.id, product.name, product.category, product.cost, product.rating
        );
    }
}

fn print_cart(items: &[CartLineItem]) {
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in items {
        println!(
            "{:<26} {:<40} {:>3} x {:>8.2} = {:>9.2}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.product.cost,
            item.subtotal()
        );
    }
    println!(
        "{} items, total {:.2}",
        total_quantity(items),
        total_cost(items)
    );
}
