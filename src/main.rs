use ringslot::config::Config;
use ringslot::session::Session;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // .env があれば読み込む（無ければ無視）
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // stdout は応答専用なのでログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "ringslot v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        if config.production {
            "production"
        } else {
            "development"
        }
    );
    tracing::info!("Capacity: {}", config.capacity);

    let mut session = Session::new(config.capacity)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = session.run(stdin.lock(), stdout.lock())?;

    tracing::info!("Processed {handled} commands");
    Ok(())
}
