//! 单分组加密原语<br>
//!
//! The CMAC cores only ever drive a fixed-key single-block encrypt (ECB over
//! one block, no IV); decryption is never needed.

use crate::MacError;
use aes::cipher::{generic_array::GenericArray, BlockEncrypt as _, KeyInit};
use aes::{Aes128, Aes192, Aes256};

pub trait BlockEncrypt {
    /// 分组字节大小
    fn block_size(&self) -> usize;

    /// `block.len()`必须等于`block_size()`, 密文追加到`out`尾部
    fn encrypt_block(&self, block: &[u8], out: &mut Vec<u8>) -> Result<(), MacError>;
}

#[derive(Clone)]
pub enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    pub const BLOCK_SIZE: usize = 16;

    pub fn new(key: &[u8]) -> Result<Self, MacError> {
        match key.len() {
            16 => Ok(Self::Aes128(Aes128::new(GenericArray::from_slice(key)))),
            24 => Ok(Self::Aes192(Aes192::new(GenericArray::from_slice(key)))),
            32 => Ok(Self::Aes256(Aes256::new(GenericArray::from_slice(key)))),
            real => Err(MacError::InvalidKeySize { real }),
        }
    }
}

impl BlockEncrypt for AesCipher {
    fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8], out: &mut Vec<u8>) -> Result<(), MacError> {
        if block.len() != Self::BLOCK_SIZE {
            return Err(MacError::InvalidBlockSize {
                target: Self::BLOCK_SIZE,
                real: block.len(),
            });
        }

        let mut b = GenericArray::clone_from_slice(block);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut b),
            Self::Aes192(c) => c.encrypt_block(&mut b),
            Self::Aes256(c) => c.encrypt_block(&mut b),
        }
        out.extend_from_slice(&b);

        Ok(())
    }
}
