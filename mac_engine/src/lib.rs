//! Message Authentication Code engine <br>
//!
//! 以某个密钥生成指定长度的消息摘要, 用于验证消息的完整性和身份验证(拥有该密钥的身份者才能够生成该摘要) <br>
//!
//! Three constructions share one incremental lifecycle (reset → accumulate →
//! finalize → auto-reset):
//!
//! - [`Cmac`]: CBC-MAC with GF(2^128) subkeys (OMAC1 full tag, or the
//!   truncated TMAC variant);
//! - [`Hmac`]: the double-hash construction;
//! - [`MacEngine`]: the mode-switched facade over the AES/SHA-256 pairing.

mod error;
pub use error::MacError;

pub mod block_cipher;
pub use block_cipher::{AesCipher, BlockEncrypt};

pub mod digest;
pub use digest::Digest;

pub mod cmac;
pub use cmac::Cmac;

pub mod hmac;
pub use hmac::Hmac;

mod engine;
pub use engine::{MacEngine, Mode};

use subtle::ConstantTimeEq;

pub trait Mac {
    /// 输入分组字节大小
    fn block_size(&self) -> usize;

    /// 标签字节大小
    fn tag_size(&self) -> usize;

    /// 累积下一段消息. CMAC类的核按分组处理: 每次调用至多`block_size()`字节,
    /// 且只有最后一次调用允许不满一个分组.
    fn add_block(&mut self, block: &[u8]) -> Result<(), MacError>;

    /// 生成标签, 并复位到刚初始化的状态以便认证下一条消息
    fn finalize(&mut self) -> Result<Vec<u8>, MacError>;

    /// 丢弃已累积的消息, 复位到刚初始化的状态
    fn reset(&mut self);

    fn compute_mac(&mut self, msg: &[u8]) -> Result<Vec<u8>, MacError> {
        let n = self.block_size();
        if msg.is_empty() {
            // 空消息仍然产生一个空的末尾分组交由填充处理
            self.add_block(&[])?;
        } else {
            for block in msg.chunks(n) {
                self.add_block(block)?;
            }
        }

        self.finalize()
    }

    /// 重新计算标签并常数时间比较. 标签不匹配不是错误, 返回`Ok(false)`.
    fn verify_mac(&mut self, msg: &[u8], tag: &[u8]) -> Result<bool, MacError> {
        let mac = self.compute_mac(msg)?;
        Ok(tag.len() == mac.len() && bool::from(mac.as_slice().ct_eq(tag)))
    }
}
