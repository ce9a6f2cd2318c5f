//! Wallet keypair loading.

use anyhow::Context;
use solana_sdk::signature::Keypair;
use std::path::Path;

/// Load a keypair from a Solana-CLI-style JSON file: an array of 64 bytes
/// (32-byte secret followed by the 32-byte public key).
pub fn load_wallet_keypair(path: &Path) -> anyhow::Result<Keypair> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading wallet keypair {}", path.display()))?;
    let bytes: Vec<u8> = serde_json::from_str(&raw)
        .with_context(|| format!("wallet keypair {} is not a JSON byte array", path.display()))?;
    Keypair::try_from(bytes.as_slice())
        .map_err(|e| anyhow::anyhow!("invalid wallet keypair {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    #[test]
    fn loads_a_cli_format_keypair() {
        let keypair = Keypair::new();
        let dir = std::env::temp_dir();
        let path = dir.join(format!("benft-wallet-{}.json", keypair.pubkey()));
        std::fs::write(
            &path,
            serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap(),
        )
        .unwrap();

        let loaded = load_wallet_keypair(&path).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn rejects_wrong_length_files() {
        let dir = std::env::temp_dir();
        let path = dir.join("benft-wallet-short.json");
        std::fs::write(&path, "[1,2,3]").unwrap();
        assert!(load_wallet_keypair(&path).is_err());
        std::fs::remove_file(&path).ok();
    }
}
