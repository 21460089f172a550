//! Hidden message behind a decode/encode toggle.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::borrow::Cow;

/// Shown when the payload is not valid base64 or not UTF-8.
pub const DECODE_FAILED: &str = "Decoding failed. Try again later.";

/// A base64 payload plus a decoded/encoded display flag.
#[derive(Debug, Clone)]
pub struct DecodeToggle {
    encoded: String,
    decoded: bool,
}

impl DecodeToggle {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
            decoded: false,
        }
    }

    /// Flip between decoded and encoded. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.decoded = !self.decoded;
        self.decoded
    }

    pub fn is_decoded(&self) -> bool {
        self.decoded
    }

    /// Button caption for the action a toggle would perform.
    pub fn action_label(&self) -> &'static str {
        if self.decoded {
            "ENCODE"
        } else {
            "DECODE"
        }
    }

    /// The text to display for the current state.
    pub fn text(&self) -> Cow<'_, str> {
        if self.decoded {
            Cow::Owned(decode_payload(&self.encoded).unwrap_or_else(|| DECODE_FAILED.to_string()))
        } else {
            Cow::Borrowed(&self.encoded)
        }
    }
}

/// Decode a base64 payload into UTF-8 text.
pub fn decode_payload(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Encode text the way payloads are stored in configuration.
pub fn encode_payload(text: &str) -> String {
    STANDARD.encode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_reveals_and_hides() {
        let mut toggle = DecodeToggle::new(encode_payload("Keep exploring!"));
        assert!(!toggle.is_decoded());
        assert_eq!(toggle.action_label(), "DECODE");
        assert_eq!(toggle.text(), "S2VlcCBleHBsb3Jpbmch");

        assert!(toggle.toggle());
        assert_eq!(toggle.text(), "Keep exploring!");
        assert_eq!(toggle.action_label(), "ENCODE");

        assert!(!toggle.toggle());
        assert!(!toggle.is_decoded());
    }

    #[test]
    fn test_invalid_payload_falls_back() {
        let mut toggle = DecodeToggle::new("not base64 !!");
        toggle.toggle();
        assert_eq!(toggle.text(), DECODE_FAILED);
    }

    #[test]
    fn test_non_utf8_payload_falls_back() {
        assert!(decode_payload("//79").is_none());
    }
}
