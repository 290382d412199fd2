use crate::model::KeyPath;
use thiserror::Error;

pub mod codes {
    pub const NOT_AN_ARRAY: &str = "TREE.NOT_AN_ARRAY";
    pub const DECODE_FAILED: &str = "TREE.DECODE_FAILED";
    pub const CODEC: &str = "TREE.CODEC";
    pub const OPTIONS_INVALID: &str = "TREE.OPTIONS_INVALID";
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("value at '{path}' is not an array (found {found})")]
    NotAnArray { path: KeyPath, found: &'static str },

    #[error("value at '{path}' cannot be decoded: {detail}")]
    Decode { path: KeyPath, detail: String },

    #[error("codec error: {0}")]
    Codec(String),

    #[error("invalid store options: {0}")]
    InvalidOptions(String),
}

impl TreeError {
    pub fn code(&self) -> &'static str {
        match self {
            TreeError::NotAnArray { .. } => codes::NOT_AN_ARRAY,
            TreeError::Decode { .. } => codes::DECODE_FAILED,
            TreeError::Codec(_) => codes::CODEC,
            TreeError::InvalidOptions(_) => codes::OPTIONS_INVALID,
        }
    }

    pub fn not_an_array(path: &KeyPath, found: &'static str) -> Self {
        TreeError::NotAnArray {
            path: path.clone(),
            found,
        }
    }
}
