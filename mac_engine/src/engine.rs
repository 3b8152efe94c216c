//! 模式切换的MAC门面<br>
//!
//! 固定搭配: 128位分组的AES做CMAC类模式, SHA-256做HMAC. 密钥和模式都设置
//! 之后才能进行累积/计算/验证操作; 切换模式总是重建对应的核, 不保留半途的
//! 累积状态.

use crate::{AesCipher, Cmac, Hmac, Mac, MacError};
use sha2::Sha256;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// MAC工作模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// OMAC1: 全长标签(16字节), ISO/IEC 7816填充
    Omac,
    /// 截断CMAC: 半长标签(8字节), PKCS#7填充
    Tmac,
    /// HMAC-SHA-256: 32字节标签
    Hmac,
}

enum Core {
    Omac(Cmac<AesCipher>),
    Tmac(Cmac<AesCipher>),
    Hmac(Hmac<Sha256>),
}

pub struct MacEngine {
    key: Option<Vec<u8>>,
    // 固定密钥的单分组加密原语, set_key时就绪
    cipher: Option<AesCipher>,
    core: Option<Core>,
}

impl MacEngine {
    pub fn new() -> Self {
        Self {
            key: None,
            cipher: None,
            core: None,
        }
    }

    /// 设置密钥(AES密钥: 16/24/32字节). 已选择的模式失效, 需要重新`set_mode`.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), MacError> {
        let cipher = AesCipher::new(key)?;

        #[cfg(feature = "sec-zeroize")]
        self.zeroize();
        self.key = Some(key.to_vec());
        self.cipher = Some(cipher);
        self.core = None;
        Ok(())
    }

    /// 选择工作模式并初始化对应的核
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), MacError> {
        let key = self.key.as_deref().ok_or(MacError::KeyNotSet)?;
        let cipher = self.cipher.clone().ok_or(MacError::KeyNotSet)?;

        let core = match mode {
            Mode::Omac => Core::Omac(Cmac::omac(cipher)?),
            Mode::Tmac => Core::Tmac(Cmac::tmac(cipher)?),
            Mode::Hmac => Core::Hmac(Hmac::new(Sha256::default(), key.to_vec())?),
        };

        self.core = Some(core);
        Ok(())
    }

    pub fn mode(&self) -> Option<Mode> {
        self.core.as_ref().map(|core| match core {
            Core::Omac(_) => Mode::Omac,
            Core::Tmac(_) => Mode::Tmac,
            Core::Hmac(_) => Mode::Hmac,
        })
    }

    pub fn tag_size(&self) -> Option<usize> {
        self.core.as_ref().map(|core| match core {
            Core::Omac(c) => c.tag_size(),
            Core::Tmac(c) => c.tag_size(),
            Core::Hmac(h) => h.tag_size(),
        })
    }

    fn core_mut(&mut self) -> Result<&mut dyn Mac, MacError> {
        if self.key.is_none() {
            return Err(MacError::KeyNotSet);
        }

        match self.core.as_mut().ok_or(MacError::ModeNotSet)? {
            Core::Omac(c) => Ok(c),
            Core::Tmac(c) => Ok(c),
            Core::Hmac(h) => Ok(h),
        }
    }

    pub fn add_block(&mut self, block: &[u8]) -> Result<(), MacError> {
        self.core_mut()?.add_block(block)
    }

    pub fn finalize(&mut self) -> Result<Vec<u8>, MacError> {
        self.core_mut()?.finalize()
    }

    /// 丢弃已累积的消息, 保留密钥和模式
    pub fn reset(&mut self) -> Result<(), MacError> {
        self.core_mut()?.reset();
        Ok(())
    }

    pub fn compute_mac(&mut self, msg: &[u8]) -> Result<Vec<u8>, MacError> {
        self.core_mut()?.compute_mac(msg)
    }

    pub fn verify_mac(&mut self, msg: &[u8], tag: &[u8]) -> Result<bool, MacError> {
        self.core_mut()?.verify_mac(msg, tag)
    }
}

impl Default for MacEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for MacEngine {
    fn zeroize(&mut self) {
        if let Some(key) = self.key.as_mut() {
            key.zeroize();
        }
        self.key = None;
        // 密钥编排在加密原语内部, 只能整体丢弃
        self.cipher = None;

        match self.core.as_mut() {
            Some(Core::Omac(c)) | Some(Core::Tmac(c)) => c.zeroize(),
            Some(Core::Hmac(h)) => h.zeroize(),
            None => {}
        }
        self.core = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

    fn engine(mode: Mode) -> MacEngine {
        let mut engine = MacEngine::new();
        engine.set_key(&hex::decode(KEY).unwrap()).unwrap();
        engine.set_mode(mode).unwrap();
        engine
    }

    #[test]
    fn omac_known_answers() {
        let mut engine = engine(Mode::Omac);

        let tag = engine.compute_mac(&[]).unwrap();
        assert_eq!(hex::encode(tag), "bb1d6929e95937287fa37d129b756746");

        let msg = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
        let tag = engine.compute_mac(&msg).unwrap();
        assert_eq!(hex::encode(tag), "070a16b46b4d4144f79bdd9dd04a287c");
    }

    #[test]
    fn tag_sizes() {
        assert_eq!(engine(Mode::Omac).tag_size(), Some(16));
        assert_eq!(engine(Mode::Tmac).tag_size(), Some(8));
        assert_eq!(engine(Mode::Hmac).tag_size(), Some(32));
    }

    #[test]
    fn round_trip_all_modes() {
        let msg = b"the quick brown fox jumps over the lazy dog";

        for mode in [Mode::Omac, Mode::Tmac, Mode::Hmac] {
            let mut engine = engine(mode);
            let tag = engine.compute_mac(msg).unwrap();
            assert!(engine.verify_mac(msg, &tag).unwrap(), "{mode:?}");

            let mut bad = tag.clone();
            bad[0] ^= 0xff;
            assert!(!engine.verify_mac(msg, &bad).unwrap(), "{mode:?}");
            assert!(!engine.verify_mac(msg, &tag[..tag.len() - 1]).unwrap());
        }
    }

    #[test]
    fn streaming_equals_oneshot_at_block_boundaries() {
        let msg = (0u8..96).collect::<Vec<_>>();

        for mode in [Mode::Omac, Mode::Tmac] {
            let mut engine = engine(mode);
            let oneshot = engine.compute_mac(&msg).unwrap();

            for split in [16usize, 32, 80] {
                for block in msg[..split].chunks(16) {
                    engine.add_block(block).unwrap();
                }
                for block in msg[split..].chunks(16) {
                    engine.add_block(block).unwrap();
                }
                assert_eq!(engine.finalize().unwrap(), oneshot, "{mode:?} at {split}");
            }
        }
    }

    #[test]
    fn repeated_compute_is_stateless() {
        for mode in [Mode::Omac, Mode::Tmac, Mode::Hmac] {
            let mut engine = engine(mode);
            let msg = b"state must not leak across messages";
            assert_eq!(
                engine.compute_mac(msg).unwrap(),
                engine.compute_mac(msg).unwrap(),
                "{mode:?}"
            );
        }
    }

    #[test]
    fn tmac_verifies_against_full_omac_tag() {
        // 分组对齐的消息: TMAC标签等于OMAC标签的前半, 验证只比较前半
        let msg = (0u8..64).collect::<Vec<_>>();

        let full = engine(Mode::Omac).compute_mac(&msg).unwrap();
        let mut tmac = engine(Mode::Tmac);
        assert_eq!(tmac.compute_mac(&msg).unwrap(), full[..8]);
        assert!(tmac.verify_mac(&msg, &full).unwrap());
    }

    #[test]
    fn verify_tag_length_rules() {
        let msg = b"tag length handling";

        // 全长变体要求期望标签长度精确
        for mode in [Mode::Omac, Mode::Hmac] {
            let mut engine = engine(mode);
            let tag = engine.compute_mac(msg).unwrap();

            let mut long = tag.clone();
            long.push(0);
            assert!(!engine.verify_mac(msg, &long).unwrap(), "{mode:?}");
            assert!(!engine.verify_mac(msg, &tag[..tag.len() - 1]).unwrap());
        }

        // 截断变体只看前8字节
        let mut engine = engine(Mode::Tmac);
        let tag = engine.compute_mac(msg).unwrap();

        let mut long = tag.clone();
        long.extend_from_slice(&[0xa5; 8]);
        assert!(engine.verify_mac(msg, &long).unwrap());
        assert!(!engine.verify_mac(msg, &tag[..7]).unwrap());
    }

    #[test]
    fn lifecycle_preconditions() {
        let mut engine = MacEngine::new();
        assert_eq!(engine.set_mode(Mode::Omac), Err(MacError::KeyNotSet));
        assert_eq!(engine.compute_mac(b"x").err(), Some(MacError::KeyNotSet));

        engine.set_key(&hex::decode(KEY).unwrap()).unwrap();
        assert_eq!(engine.compute_mac(b"x").err(), Some(MacError::ModeNotSet));
        assert_eq!(engine.add_block(b"x").err(), Some(MacError::ModeNotSet));
        assert_eq!(engine.finalize().err(), Some(MacError::ModeNotSet));

        engine.set_mode(Mode::Hmac).unwrap();
        assert!(engine.compute_mac(b"x").is_ok());

        // 换密钥使模式失效
        engine.set_key(&[0u8; 16]).unwrap();
        assert_eq!(engine.mode(), None);
        assert_eq!(engine.compute_mac(b"x").err(), Some(MacError::ModeNotSet));
    }

    #[test]
    fn invalid_keys_rejected() {
        let mut engine = MacEngine::new();
        for len in [0usize, 15, 17, 33] {
            assert_eq!(
                engine.set_key(&vec![0u8; len]),
                Err(MacError::InvalidKeySize { real: len })
            );
        }
        for len in [16usize, 24, 32] {
            assert!(engine.set_key(&vec![0u8; len]).is_ok());
        }
    }

    #[test]
    fn mode_switch_reinitializes() {
        let mut engine = engine(Mode::Omac);
        engine.add_block(&[0xabu8; 16]).unwrap();

        // 半途切换模式不保留累积进度
        engine.set_mode(Mode::Omac).unwrap();
        let tag = engine.compute_mac(&[]).unwrap();
        assert_eq!(hex::encode(tag), "bb1d6929e95937287fa37d129b756746");

        engine.set_mode(Mode::Hmac).unwrap();
        assert_eq!(engine.mode(), Some(Mode::Hmac));
    }
}
