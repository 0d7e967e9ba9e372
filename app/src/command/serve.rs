use medtrack_config::Config;
use tracing::info;

/// Input parameters for the Serve command strategy.
#[derive(Debug, Clone, Copy)]
pub struct ServeInput {
    pub port: Option<u16>,
}

/// Strategy for running the webhook server.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(port) = input.port {
            config.server.port = port;
        }

        info!(
            "Starting {} on {}:{}",
            medtrack_server::SERVICE_NAME,
            config.server.host,
            config.server.port
        );

        let tracker = super::build_tracker(&config, false)?;
        medtrack_server::serve(tracker, &config).await
    }
}
