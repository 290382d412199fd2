use crate::errors::TreeError;
use crate::model::TreeValue;

/// Text form of a tree. Decoding may fail; encoding a tree never does.
pub trait TreeCodec: Send + Sync + 'static {
    fn decode(&self, text: &str) -> Result<TreeValue, TreeError>;
    fn encode(&self, value: &TreeValue) -> String;
    fn encode_pretty(&self, value: &TreeValue) -> String {
        self.encode(value)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl TreeCodec for JsonCodec {
    fn decode(&self, text: &str) -> Result<TreeValue, TreeError> {
        serde_json::from_str(text).map_err(|e| TreeError::Codec(format!("decode json: {e}")))
    }

    fn encode(&self, value: &TreeValue) -> String {
        value.to_string()
    }

    fn encode_pretty(&self, value: &TreeValue) -> String {
        // `{:#}` on a `Value` is the infallible pretty printer.
        format!("{value:#}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_json_text() {
        let codec = JsonCodec;
        assert_eq!(codec.decode(r#"{"a":[1,true]}"#).unwrap(), json!({"a": [1, true]}));
        assert_eq!(codec.decode("123").unwrap(), json!(123));
    }

    #[test]
    fn rejects_plain_text() {
        let err = JsonCodec.decode("hello world").unwrap_err();
        assert_eq!(err.code(), crate::errors::codes::CODEC);
    }

    #[test]
    fn encodes_compact_and_pretty() {
        let value = json!({"a": {"c": 2}});
        assert_eq!(JsonCodec.encode(&value), r#"{"a":{"c":2}}"#);
        assert!(JsonCodec.encode_pretty(&value).contains('\n'));
    }
}
