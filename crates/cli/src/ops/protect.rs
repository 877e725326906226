use std::path::PathBuf;

use clap::Args;

use common::crypto::encoding::encode_base64url;
use common::envelope::Mode;
use common::message::HttpMessage;
use common::testkit::{MemoryAdapter, MemoryRequest};
use common::Sapient;

use crate::mode::{protect_request, ModeArg, ModeError};
use crate::state::{resolve_key, StateError};

#[derive(Args, Debug, Clone)]
pub struct Protect {
    /// Protection mode
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Key name in the keys directory, or path to a PEM key file
    #[arg(long)]
    pub key: String,

    /// Body to protect (reads --input or stdin when absent)
    #[arg(long)]
    pub data: Option<String>,

    /// File holding the body to protect
    #[arg(long, conflicts_with = "data")]
    pub input: Option<PathBuf>,

    /// Write ciphertext here instead of printing it as base64url
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProtectError {
    #[error("failed to read or write body: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Mode(#[from] ModeError),
}

#[async_trait::async_trait]
impl crate::op::Op for Protect {
    type Error = ProtectError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = resolve_key(ctx.config_path.clone(), &self.key)?;
        let body = super::read_body(&self.data, &self.input)?;
        let mode = Mode::from(self.mode);

        let sapient = Sapient::new(MemoryAdapter);
        let request = MemoryRequest::new("POST", "/", body);
        let request = protect_request(&sapient, mode, &key, request)?;

        match mode.header_name() {
            Some(name) => {
                let value = request
                    .header(name)
                    .map(String::from_utf8_lossy)
                    .unwrap_or_default();
                Ok(format!("{}: {}", name, value))
            }
            None => match &self.output {
                Some(path) => Ok(super::write_body(&request.body(), Some(path))?),
                None => Ok(encode_base64url(&request.body())),
            },
        }
    }
}
