use clap::Args;

use crate::state::{resolve_key, StateError};

#[derive(Args, Debug, Clone)]
pub struct Pubkey {
    /// Key name in the keys directory, or path to a PEM key file
    #[arg(long, default_value = crate::state::SIGNING_KEY_NAME)]
    pub key: String,

    /// Print PEM instead of base64url
    #[arg(long)]
    pub pem: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PubkeyError {
    #[error("{0} keys have no public half")]
    NoPublicHalf(common::crypto::KeyKind),
    #[error("pubkey failed: {0}")]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Pubkey {
    type Error = PubkeyError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = resolve_key(ctx.config_path.clone(), &self.key)?;
        let public = if key.kind().is_secret() {
            key.public_key()
                .ok_or(PubkeyError::NoPublicHalf(key.kind()))?
        } else {
            key
        };

        if self.pem {
            Ok(public.to_pem().trim_end().to_string())
        } else {
            Ok(public.to_base64url())
        }
    }
}
