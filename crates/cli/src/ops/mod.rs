pub mod init;
pub mod keygen;
pub mod open;
pub mod protect;
pub mod pubkey;
pub mod send;
pub mod version;

pub use init::Init;
pub use keygen::Keygen;
pub use open::Open;
pub use protect::Protect;
pub use pubkey::Pubkey;
pub use send::SendRequest;
pub use version::Version;

use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a body from `--data`, `--input` or stdin, in that order
pub(crate) fn read_body(data: &Option<String>, input: &Option<PathBuf>) -> std::io::Result<Vec<u8>> {
    if let Some(data) = data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = input {
        return std::fs::read(path);
    }
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Write binary output to a file, or render it for the terminal
pub(crate) fn write_body(body: &[u8], output: Option<&Path>) -> std::io::Result<String> {
    match output {
        Some(path) => {
            std::fs::write(path, body)?;
            Ok(format!("wrote {} bytes to {}", body.len(), path.display()))
        }
        None => Ok(String::from_utf8_lossy(body).into_owned()),
    }
}
