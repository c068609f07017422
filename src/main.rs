use anyhow::Context;
use bot_rates::config::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .init();
    info!("Настройки прочитаны: {settings:?}");
    let (provider, router) = bot_rates::build(&settings)?;
    let listener = tokio::net::TcpListener::bind(settings.addr)
        .await
        .with_context(|| format!("не удалось занять адрес {}", settings.addr))?;
    info!("Сервис курсов BOT слушает {}", settings.addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("{e:?}");
            }
        })
        .await?;
    provider.uninstall();
    info!("Сервис остановлен");
    Ok(())
}
