use clap::ArgMatches;
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Zeroize, ZeroizeOnDrop, Debug, Clone)]
pub struct Key {
    key: Vec<u8>,
}

impl Key {
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }
}

/// `--kfile`读原始字节, `--kstr`按十六进制解码
pub fn read_key(m: &ArgMatches) -> anyhow::Result<Key> {
    if let Some(p) = m.get_one::<PathBuf>("kfile") {
        Ok(Key {
            key: std::fs::read(p)?,
        })
    } else if let Some(s) = m.get_one::<String>("kstr") {
        Ok(Key {
            key: hex::decode(s.trim())?,
        })
    } else {
        anyhow::bail!("one of `--kfile` or `--kstr` is required")
    }
}
