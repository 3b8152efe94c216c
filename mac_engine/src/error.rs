use std::{error::Error, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacError {
    /// 未设置密钥
    KeyNotSet,

    /// 未设置工作模式
    ModeNotSet,

    /// 不合法的密钥长度
    InvalidKeySize { real: usize },

    /// 不合法分组大小
    InvalidBlockSize { target: usize, real: usize },

    /// 分组大小没有对应的约减常数Rb
    UnsupportedBlockSize(usize),
}

impl Display for MacError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotSet => f.write_str("The key is not set, call `set_key` first"),
            Self::ModeNotSet => f.write_str("The mode is not set, call `set_mode` first"),
            Self::InvalidKeySize { real } => f.write_fmt(format_args!(
                "Invalid key size `{real}` for the selected primitive"
            )),
            Self::InvalidBlockSize { target, real } => f.write_fmt(format_args!(
                "Invalid block data size `{real}` not match to target size `{target}`"
            )),
            Self::UnsupportedBlockSize(n) => {
                f.write_fmt(format_args!("No Rb parameter for the block size `{n}`"))
            }
        }
    }
}

impl Error for MacError {}
