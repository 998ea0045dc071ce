use dotenvy::dotenv;
use printshop_gate::{
    config::{self, app::AppConfig},
    core::{
        guard::{Navigator, Redirect, Rendered, TracingNotifier},
        notice::SecurityNotice,
        order,
        profile::Profile,
        session::{SessionProvider, StoreSessionProvider},
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: printshop-gate <user-id|-> <path>";

/// Prints redirect instructions instead of navigating.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn redirect(&self, redirect: &Redirect) {
        println!("-> {} (replace: {})", redirect.to, redirect.replace);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Arguments: who is signed in ("-" for nobody) and which view they asked for
    let mut args = std::env::args().skip(1);
    let (Some(user), Some(path)) = (args.next(), args.next()) else {
        return Err(Error::Config {
            message: USAGE.to_string(),
        });
    };
    let user_id = (user != "-").then_some(user);

    // 4. Load the application configuration and the guard for the requested view
    let app_config = config::app::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    let guard = app_config.guard_for(&path)?;

    // 5. Initialize the store
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))?;

    // 6. Resolve the session and gate the view
    let state = StoreSessionProvider::new(db.clone(), user_id)
        .resolve()
        .await?;

    match guard.render(&state, path.as_str(), &TracingNotifier, &StdoutNavigator) {
        Rendered::Authenticating => println!("Autenticando..."),
        Rendered::Redirected(_) => {}
        Rendered::Children(page) => {
            if let Some(profile) = state.profile.as_ref() {
                render_page(&db, &app_config, page, profile).await?;
            }
        }
    }

    Ok(())
}

async fn render_page(
    db: &DatabaseConnection,
    app_config: &AppConfig,
    page: &str,
    profile: &Profile,
) -> Result<()> {
    println!(
        "{page} ({})",
        profile.display_name().unwrap_or_else(|| profile.id.clone())
    );

    if profile.requires_password_change() {
        let settings = Redirect {
            to: app_config.settings_path.clone(),
            replace: false,
        };
        let notice = SecurityNotice::new(|| StdoutNavigator.redirect(&settings));
        let view = notice.view();
        println!(
            "! {}\n  {}\n  [{}] {}",
            view.title, view.body, view.action_label, settings.to
        );
    }

    let orders = order::list_orders_for(db, profile).await?;
    if orders.is_empty() {
        println!("No hay pedidos.");
    }
    for order in orders {
        println!(
            "#{:<6} {:<10} {:>10.2} {}",
            order.id,
            order.status,
            order.total_price,
            order.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
