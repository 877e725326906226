use clap::Args;
use url::Url;

use crate::state::{AppConfig, AppState, SEALING_KEY_NAME, SIGNING_KEY_NAME};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Default base URL for `send`
    #[arg(long)]
    pub default_remote: Option<Url>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            remote: self.default_remote.clone(),
            keys_dir: None,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let remote = match &state.config.remote {
            Some(url) => url.to_string(),
            None => "none".to_string(),
        };

        let output = format!(
            "Initialized sapient directory at: {}\n\
             - Config: {}\n\
             - Keys: {}\n\
             - Signing key: {}\n\
             - Sealing key: {}\n\
             - Remote: {}",
            state.sapient_dir.display(),
            state.config_path.display(),
            state.keys_path.display(),
            state.key_path(SIGNING_KEY_NAME).display(),
            state.key_path(SEALING_KEY_NAME).display(),
            remote
        );

        Ok(output)
    }
}
