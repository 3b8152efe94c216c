//! Keyed-Hash Message Authentication Code (HMAC) <br>
//!
//! - [RFC 2104](https://www.rfc-editor.org/rfc/rfc2104) <br>
//! - [FIPS 198-1](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.198-1.pdf) <br>
//!
//! `Hash((key ^ opad) || Hash((key ^ ipad) || message))`. 内外两个哈希上下文
//! 在设置密钥时播种, finalize时复制outer以免破坏其已播种状态.

use crate::{Digest, Mac, MacError};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

fn xor_key(key: &[u8], pad: u8) -> Vec<u8> {
    key.iter().map(|&x| x ^ pad).collect()
}

pub struct Hmac<D> {
    // 已补零到哈希分组长度
    key: Vec<u8>,
    inner: D,
    outer: D,
}

impl<D: Digest + Clone> Hmac<D> {
    /// 密钥长度必须在`1..=digest.block_size()`内; 超长密钥不做预哈希,
    /// 直接拒绝.
    pub fn new(digest: D, mut key: Vec<u8>) -> Result<Self, MacError> {
        let n = digest.block_size();
        if key.is_empty() || key.len() > n {
            return Err(MacError::InvalidKeySize { real: key.len() });
        }
        key.resize(n, 0);

        let mut hmac = Self {
            key,
            inner: digest.clone(),
            outer: digest,
        };
        hmac.reset();
        Ok(hmac)
    }
}

impl<D: Clone> Clone for Hmac<D> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            inner: self.inner.clone(),
            outer: self.outer.clone(),
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl<D> Zeroize for Hmac<D> {
    fn zeroize(&mut self) {
        // 哈希上下文属于协作者, 不在此处清除
        self.key.zeroize();
    }
}

impl<D: Digest + Clone> Mac for Hmac<D> {
    fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    fn tag_size(&self) -> usize {
        self.inner.digest_size()
    }

    /// 无分组对齐要求, 任意长度的数据直接喂给inner
    fn add_block(&mut self, data: &[u8]) -> Result<(), MacError> {
        self.inner.update(data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>, MacError> {
        let digest = self.inner.finish();

        let mut outer = self.outer.clone();
        outer.update(&digest);
        let tag = outer.finish();

        self.reset();
        Ok(tag)
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.outer.reset();
        self.inner.update(&xor_key(&self.key, IPAD));
        self.outer.update(&xor_key(&self.key, OPAD));
    }

    fn compute_mac(&mut self, msg: &[u8]) -> Result<Vec<u8>, MacError> {
        self.add_block(msg)?;
        self.finalize()
    }
}
