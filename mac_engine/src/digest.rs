//! 增量哈希原语<br>
//!
//! HMAC needs three things from the hash collaborator: incremental update,
//! digest-and-rewind, and a copy of the running context (`Clone` supplies the
//! copy at the finalize step).

use sha2::Sha256;

pub trait Digest {
    /// 哈希算法内部分组字节大小
    fn block_size(&self) -> usize;

    /// 摘要字节大小
    fn digest_size(&self) -> usize;

    fn update(&mut self, data: &[u8]);

    /// 生成摘要并复位到初始状态
    fn finish(&mut self) -> Vec<u8>;

    fn reset(&mut self);
}

impl Digest for Sha256 {
    fn block_size(&self) -> usize {
        64
    }

    fn digest_size(&self) -> usize {
        32
    }

    fn update(&mut self, data: &[u8]) {
        sha2::Digest::update(self, data)
    }

    fn finish(&mut self) -> Vec<u8> {
        sha2::Digest::finalize_reset(self).to_vec()
    }

    fn reset(&mut self) {
        sha2::Digest::reset(self)
    }
}
