use clap::Args;

use common::crypto::{CryptographyKey, KeyKind};

use crate::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Keygen {
    /// Kind of key to generate: signing-secret, sealing-secret,
    /// shared-encryption or shared-authentication
    #[arg(long)]
    pub kind: KeyKind,

    /// Name to store the key under (defaults to the kind)
    #[arg(long)]
    pub name: Option<String>,

    /// Replace an existing key of the same name
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("{0} keys are derived from their secret half; generate the secret key instead")]
    PublicKind(KeyKind),
    #[error("keygen failed: {0}")]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = CryptographyKey::generate(self.kind).ok_or(KeygenError::PublicKind(self.kind))?;
        let name = self.name.as_deref().unwrap_or(self.kind.as_str());

        let state = AppState::load(ctx.config_path.clone())?;
        let path = state.save_key(name, &key, self.force)?;

        let mut output = format!("Generated {} key: {}", self.kind, path.display());
        if let Some(public) = key.public_key() {
            output.push_str(&format!("\nPublic key: {}", public.to_base64url()));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::op::{Op, OpContext};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_keygen_writes_named_key() {
        let temp = TempDir::new().unwrap();
        let state = AppState::init(Some(temp.path().to_path_buf()), None).unwrap();
        let ctx = OpContext::new(None, Some(temp.path().to_path_buf()));

        let op = Keygen {
            kind: KeyKind::SharedEncryption,
            name: Some("partner".to_string()),
            force: false,
        };
        op.execute(&ctx).await.unwrap();
        assert_eq!(
            state.load_key("partner").unwrap().kind(),
            KeyKind::SharedEncryption
        );

        assert!(matches!(
            op.execute(&ctx).await,
            Err(KeygenError::State(StateError::KeyExists(_)))
        ));
    }

    #[tokio::test]
    async fn test_keygen_rejects_public_kind() {
        let temp = TempDir::new().unwrap();
        AppState::init(Some(temp.path().to_path_buf()), None).unwrap();
        let ctx = OpContext::new(None, Some(temp.path().to_path_buf()));

        let op = Keygen {
            kind: KeyKind::SigningPublic,
            name: None,
            force: false,
        };
        assert!(matches!(
            op.execute(&ctx).await,
            Err(KeygenError::PublicKind(KeyKind::SigningPublic))
        ));
    }
}
