use std::path::PathBuf;

use clap::Args;

use common::envelope::Mode;
use common::message::{Adapter, HttpMessage};
use common::{Sapient, SapientError};
use sapient_http::{send, ClientError, ReqwestAdapter};

use crate::mode::{open_response, protect_request, ModeArg, ModeError};
use crate::state::{resolve_key, StateError};

#[derive(Args, Debug, Clone)]
pub struct SendRequest {
    /// Request path, resolved against --remote, or an absolute URL
    pub path: String,

    /// HTTP method
    #[arg(long, default_value = "POST")]
    pub method: String,

    /// Protection mode for the request body
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Key name in the keys directory, or path to a PEM key file
    #[arg(long)]
    pub key: String,

    /// Request body (reads --input or stdin when absent)
    #[arg(long)]
    pub data: Option<String>,

    /// File holding the request body
    #[arg(long, conflicts_with = "data")]
    pub input: Option<PathBuf>,

    /// Mode the server protects its response with; the response is
    /// printed unchecked when absent
    #[arg(long, value_enum)]
    pub response_mode: Option<ModeArg>,

    /// Key for checking the response (defaults to --key)
    #[arg(long, requires = "response_mode")]
    pub response_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("failed to read body: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Sapient(#[from] SapientError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[async_trait::async_trait]
impl crate::op::Op for SendRequest {
    type Error = SendError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = resolve_key(ctx.config_path.clone(), &self.key)?;
        let body = super::read_body(&self.data, &self.input)?;

        let adapter = match &ctx.remote {
            Some(remote) => ReqwestAdapter::with_base(remote.clone()),
            None => ReqwestAdapter::new(),
        };
        let sapient = Sapient::new(adapter);

        let request = sapient
            .adapter()
            .request(&self.method, &self.path, vec![], body.into())?;
        let request = protect_request(&sapient, self.mode.into(), &key, request)?;

        let client = reqwest::Client::new();
        let response = send(&client, request).await?;
        let status = response.status();

        let body = match self.response_mode {
            Some(mode) => {
                let response_key = match &self.response_key {
                    Some(name) => resolve_key(ctx.config_path.clone(), name)?,
                    None => key,
                };
                let body = open_response(&sapient, Mode::from(mode), &response_key, &response)?;
                tracing::info!(%status, ?mode, "response verified");
                body
            }
            None => response.body(),
        };

        Ok(format!("{}\n{}", status, String::from_utf8_lossy(&body)))
    }
}
