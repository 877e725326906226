use std::path::PathBuf;

use clap::Args;

use common::crypto::encoding::decode_base64url;
use common::envelope::Mode;
use common::message::HttpMessage;
use common::testkit::{MemoryAdapter, MemoryRequest};
use common::{Sapient, SapientError};

use crate::mode::{open_request, ModeArg, ModeError};
use crate::state::{resolve_key, StateError};

#[derive(Args, Debug, Clone)]
pub struct Open {
    /// Protection mode the body was created with
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Key name in the keys directory, or path to a PEM key file
    #[arg(long)]
    pub key: String,

    /// Protected body (reads --input or stdin when absent)
    #[arg(long)]
    pub data: Option<String>,

    /// File holding the protected body
    #[arg(long, conflicts_with = "data")]
    pub input: Option<PathBuf>,

    /// The body is base64url text, as printed by `protect`
    #[arg(long)]
    pub base64: bool,

    /// Signature or MAC header value, for sign and authenticate modes
    #[arg(long)]
    pub header: Option<String>,

    /// Write the plaintext here instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("failed to read or write body: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Sapient(#[from] SapientError),
}

#[async_trait::async_trait]
impl crate::op::Op for Open {
    type Error = OpenError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = resolve_key(ctx.config_path.clone(), &self.key)?;
        let mut body = super::read_body(&self.data, &self.input)?;
        if self.base64 {
            body = decode_base64url(&String::from_utf8_lossy(&body))?;
        }
        let mode = Mode::from(self.mode);

        let mut request = MemoryRequest::new("POST", "/", body);
        if let (Some(name), Some(value)) = (mode.header_name(), &self.header) {
            // Accept the full "Name: value" line printed by `protect`
            let value = value
                .split_once(':')
                .filter(|(n, _)| n.trim().eq_ignore_ascii_case(name))
                .map(|(_, v)| v.trim())
                .unwrap_or(value.trim());
            request.set_header(name, value)?;
        }

        let sapient = Sapient::new(MemoryAdapter);
        let plaintext = open_request(&sapient, mode, &key, &request)?;
        Ok(super::write_body(&plaintext, self.output.as_deref())?)
    }
}
