//! Block Cipher-based Message Authentication Code (CMAC) <br>
//!
//! - [Recommendation for Block Cipher Modes of Operation: The CMAC Mode for Authentication](https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-38b.pdf) <br>
//! - [OMAC: One-Key CBC MAC](https://eprint.iacr.org/2002/180.pdf) <br>
//!
//! - 流程:
//!   - subkey: 子密钥派生;
//!   - MAC生成;
//!   - MAC验证;
//!
//! 同一个核覆盖两个变体: OMAC1(全长标签, ISO/IEC 7816填充)和截断变体
//! TMAC(半长标签, PKCS#7填充). 末尾分组在知道消息真正结束之前不参与链式
//! 加密, 因为末尾分组是否满一个分组决定了使用K1还是K2以及是否填充.

use crate::{BlockEncrypt, Mac, MacError};
use subtle::ConstantTimeEq;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 不满分组的末尾分组填充方案
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Padding {
    /// `0x80`后补`0x00` (ISO/IEC 7816)
    Iso7816,
    /// 每个填充字节的值等于填充字节数 (PKCS#7)
    Pkcs7,
}

impl Padding {
    // 仅在`buf.len() < n`时调用
    fn apply(&self, buf: &mut Vec<u8>, n: usize) {
        match self {
            Self::Iso7816 => {
                buf.push(0x80);
                buf.resize(n, 0);
            }
            Self::Pkcs7 => {
                let pad = (n - buf.len()) as u8;
                buf.resize(n, pad);
            }
        }
    }
}

pub struct Cmac<E> {
    cipher: E,
    // C_i, 已链入的分组的运行值
    cache: Vec<u8>,
    // 候选末尾分组, 收到后续数据或finalize时才消费
    last: Option<Vec<u8>>,
    padding: Padding,
    tag_size: usize,
    rb: u8,
}

impl<E: BlockEncrypt> Cmac<E> {
    // GF(2^(8n))约减多项式的低位字节
    // Block size  Polynomal (hex)  Polynomal (bit)
    // 8           0x1B             11011
    // 16          0x87             10000111
    const fn rb(n: usize) -> Option<u8> {
        match n {
            8 => Some(0x1b),
            16 => Some(0x87),
            _ => None,
        }
    }

    /// OMAC1: 全长标签, 不满分组时ISO/IEC 7816填充
    pub fn omac(cipher: E) -> Result<Self, MacError> {
        let n = cipher.block_size();
        Self::new(cipher, Padding::Iso7816, n)
    }

    /// TMAC: 半长标签, 不满分组时PKCS#7填充
    pub fn tmac(cipher: E) -> Result<Self, MacError> {
        let n = cipher.block_size() >> 1;
        Self::new(cipher, Padding::Pkcs7, n)
    }

    fn new(cipher: E, padding: Padding, tag_size: usize) -> Result<Self, MacError> {
        let n = cipher.block_size();
        let rb = Self::rb(n).ok_or(MacError::UnsupportedBlockSize(n))?;

        Ok(Self {
            cache: vec![0u8; n],
            last: None,
            padding,
            tag_size,
            rb,
            cipher,
        })
    }

    /// GF(2^(8n))上乘2: 整体左移1位, 若移出的最高位为1则最低字节异或`rb`
    fn double(&self, mut b: Vec<u8>) -> Vec<u8> {
        let msb = b.first().map_or(0, |&x| x & 0x80);

        let mut lsb = 0;
        b.iter_mut().rev().for_each(|x| {
            let tmp = lsb;
            lsb = *x >> 7;
            *x = (*x << 1) | tmp;
        });

        if msb != 0 {
            if let Some(low) = b.last_mut() {
                *low ^= self.rb;
            }
        }

        b
    }

    // (k1, k2), 每次finalize时重新派生
    fn subkeys(&self) -> Result<(Vec<u8>, Vec<u8>), MacError> {
        let zero = vec![0u8; self.cipher.block_size()];
        let mut l = Vec::with_capacity(zero.len());
        self.cipher.encrypt_block(&zero, &mut l)?;

        let k1 = self.double(l);
        let k2 = self.double(k1.clone());

        Ok((k1, k2))
    }
}

impl<E: Clone> Clone for Cmac<E> {
    fn clone(&self) -> Self {
        Self {
            cipher: self.cipher.clone(),
            cache: self.cache.clone(),
            last: self.last.clone(),
            padding: self.padding,
            tag_size: self.tag_size,
            rb: self.rb,
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl<E> Zeroize for Cmac<E> {
    fn zeroize(&mut self) {
        // 加密原语内部的密钥编排属于协作者, 不在此处清除
        self.cache.zeroize();
        if let Some(last) = self.last.as_mut() {
            last.zeroize();
        }
        self.last = None;
    }
}

impl<E: BlockEncrypt> Mac for Cmac<E> {
    fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    fn tag_size(&self) -> usize {
        self.tag_size
    }

    fn add_block(&mut self, block: &[u8]) -> Result<(), MacError> {
        let n = self.block_size();
        if block.len() > n {
            return Err(MacError::InvalidBlockSize {
                target: n,
                real: block.len(),
            });
        }

        // 只有满分组才允许链入cache
        if let Some(last) = self.last.as_deref() {
            if last.len() != n {
                return Err(MacError::InvalidBlockSize {
                    target: n,
                    real: last.len(),
                });
            }
        }

        if let Some(last) = self.last.take() {
            // C_i = CIPH_k(C_{i-1} ^ M_i)
            self.cache.iter_mut().zip(last.iter()).for_each(|(a, &b)| {
                *a ^= b;
            });
            let mut ci = Vec::with_capacity(n);
            self.cipher.encrypt_block(&self.cache, &mut ci)?;
            self.cache = ci;
        }

        self.last = Some(block.to_vec());
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>, MacError> {
        let n = self.block_size();
        let (k1, k2) = self.subkeys()?;

        // 空消息视为一个长度为0的末尾分组
        let mut block = self.last.take().unwrap_or_default();
        let subkey = if block.len() == n {
            k1
        } else {
            self.padding.apply(&mut block, n);
            k2
        };

        block
            .iter_mut()
            .zip(self.cache.iter().zip(subkey.iter()))
            .for_each(|(a, (&b, &c))| {
                *a ^= b ^ c;
            });

        let mut tag = Vec::with_capacity(n);
        self.cipher.encrypt_block(&block, &mut tag)?;

        self.reset();
        tag.truncate(self.tag_size);
        Ok(tag)
    }

    /// 截断变体接受全长的期望标签, 只比较其前`tag_size()`字节;
    /// 全长变体要求长度精确相等
    fn verify_mac(&mut self, msg: &[u8], tag: &[u8]) -> Result<bool, MacError> {
        let truncated = self.tag_size < self.cipher.block_size();
        let mac = self.compute_mac(msg)?;

        let ok = if truncated {
            tag.len() >= mac.len() && bool::from(mac.as_slice().ct_eq(&tag[..mac.len()]))
        } else {
            tag.len() == mac.len() && bool::from(mac.as_slice().ct_eq(tag))
        };
        Ok(ok)
    }

    fn reset(&mut self) {
        self.cache.clear();
        self.cache.resize(self.cipher.block_size(), 0);
        self.last = None;
    }
}
