mod cli;
mod config;
mod error;
mod handlers;
mod intent;
mod llm;
mod os;
mod server;
mod session;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;
use handlers::{
    CloseAppHandler, FallbackHandler, OpenAppHandler, SearchHandler, StaticReplyHandler,
    TimeHandler, WeatherHandler,
};
use intent::{AppTarget, Intent, PatternTable, Resolver};
use llm::GeminiProvider;
use os::{LauncherService, ProcessController, ProcfsController, SystemLauncher};
use server::AppState;
use session::ConversationContext;

const GREETING: &str = "Hi, how can I help you?";
const STOP_NOTICE: &str =
    "I cannot stop the server process from here, but I can cease listening on the frontend.";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(listen) = &cli.listen {
        config.server.listen = listen.clone();
    }

    let state = build_state(&config, &cli)?;
    server::serve(&config.server.listen, state).await?;

    Ok(())
}

fn build_state(config: &AppConfig, cli: &Cli) -> Result<AppState> {
    let gemini_key = cli
        .gemini_api_key
        .clone()
        .ok_or(error::VoxError::NoProvider)?;

    let openweather_key = cli.openweather_api_key.clone().unwrap_or_else(|| {
        warn!("OPENWEATHER_API_KEY not set; weather lookups will fail upstream");
        String::new()
    });

    let provider = Arc::new(GeminiProvider::new(
        gemini_key,
        config.llm.model.clone(),
        Duration::from_secs(config.llm.timeout_secs),
    ));

    let fallback = Arc::new(FallbackHandler::new(
        provider,
        config.llm.model.clone(),
        config.llm.max_reply_words,
        config.llm.temperature,
        config.llm.top_p,
        config.llm.top_k,
        config.llm.max_output_tokens,
    ));

    let launcher: Arc<dyn LauncherService> =
        Arc::new(SystemLauncher::new(config.launcher.url_opener.clone()));
    let processes: Arc<dyn ProcessController> = Arc::new(ProcfsController);

    let mut resolver = Resolver::new(PatternTable::default_catalogue(), fallback);

    resolver.register(Intent::Greeting, Arc::new(StaticReplyHandler::new(GREETING)));
    resolver.register(
        Intent::StopListening,
        Arc::new(StaticReplyHandler::new(STOP_NOTICE)),
    );
    resolver.register(Intent::CurrentTime, Arc::new(TimeHandler));
    resolver.register(
        Intent::Weather,
        Arc::new(WeatherHandler::new(
            openweather_key,
            config.weather.base_url.clone(),
            config.weather.units.clone(),
            Duration::from_secs(config.weather.timeout_secs),
        )),
    );
    resolver.register(Intent::Search, Arc::new(SearchHandler::new(launcher.clone())));

    for (target, command) in [
        (AppTarget::Notepad, config.launcher.notepad.clone()),
        (AppTarget::Chrome, config.launcher.chrome.clone()),
        (AppTarget::Calculator, config.launcher.calculator.clone()),
    ] {
        resolver.register(
            Intent::OpenApp(target),
            Arc::new(OpenAppHandler::new(target.label(), command, launcher.clone())),
        );
        resolver.register(
            Intent::CloseApp(target),
            Arc::new(CloseAppHandler::new(
                target.label(),
                target.process_needle(),
                processes.clone(),
            )),
        );
    }

    Ok(AppState {
        resolver: Arc::new(resolver),
        context: ConversationContext::seeded().shared(),
    })
}
