use std::error::Error;
use std::path::PathBuf;

use url::Url;

use crate::state::AppState;

/// Resolve the base URL for outgoing requests.
///
/// Priority: explicit `--remote` flag > config file `remote` > none.
pub fn resolve_remote(explicit: Option<Url>, config_path: Option<PathBuf>) -> Option<Url> {
    if explicit.is_some() {
        return explicit;
    }
    AppState::load(config_path)
        .ok()
        .and_then(|state| state.config.remote)
}

#[derive(Debug, Clone, Default)]
pub struct OpContext {
    /// Base URL for `send`, if any
    pub remote: Option<Url>,
    /// Optional custom config path (defaults to ~/.sapient)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(remote: Option<Url>, config_path: Option<PathBuf>) -> Self {
        Self {
            remote: resolve_remote(remote, config_path.clone()),
            config_path,
        }
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_remote_explicit_wins() {
        let explicit = Url::parse("http://example.com:9999").unwrap();
        let result = resolve_remote(Some(explicit.clone()), None);
        assert_eq!(result, Some(explicit));
    }

    #[test]
    fn test_resolve_remote_from_config() {
        let temp = TempDir::new().unwrap();
        let config = crate::state::AppConfig {
            remote: Some(Url::parse("https://api.example.com/").unwrap()),
            keys_dir: None,
        };
        AppState::init(Some(temp.path().to_path_buf()), Some(config)).unwrap();

        let result = resolve_remote(None, Some(temp.path().to_path_buf()));
        assert_eq!(result.unwrap().as_str(), "https://api.example.com/");
    }

    #[test]
    fn test_resolve_remote_none() {
        let result = resolve_remote(None, Some(PathBuf::from("/nonexistent")));
        assert!(result.is_none());
    }
}
