use fertilizer_tui::App;
use fertilizer_tui::common::ApiClient;
use fertilizer_tui::config::Config;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    fertilizer_tui::logging::init(&config.log_file)?;

    let api = ApiClient::new(config.api_url.clone());
    tracing::info!(api_url = %api.base_url(), "Starting fertilizer-tui");

    let terminal = ratatui::init();
    let app = App::new(config, api);
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
