//! Decoding of `\uXXXX` escapes, including UTF-16 surrogate pairs.
//!
//! The [`UnicodeEscapeBuffer`] accumulates four ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) into a `u32` as they arrive. A complete escape that
//! names a basic-plane scalar is returned straight away. A high surrogate is
//! held until the following escape supplies the low half, and the pair is then
//! combined into one supplementary-plane `char`.
//!
//! # Errors
//!
//! - Feeding a non-hexadecimal character returns
//!   [`SyntaxError::InvalidUnicodeEscapeChar`].
//! - A low surrogate with no preceding high surrogate, or a high surrogate not
//!   followed by a low one, returns [`SyntaxError::LoneSurrogate`].
use super::error::SyntaxError;

const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u32,
    len: u8,
    high: Option<u32>,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits and any pending high surrogate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `true` when a high surrogate has been decoded and the next escape must
    /// be its low half.
    pub fn awaiting_low_surrogate(&self) -> bool {
        self.high.is_some() && self.len == 0
    }

    /// The pending high surrogate, for error reporting.
    pub fn pending_high(&self) -> Option<u32> {
        self.high
    }

    /// Feeds a single ASCII hexadecimal digit.
    ///
    /// - Returns `Ok(None)` while digits are still missing, and after a high
    ///   surrogate (check [`Self::awaiting_low_surrogate`]).
    /// - Returns `Ok(Some(ch))` once a complete scalar has been decoded, after
    ///   which the buffer is reset.
    pub fn feed(&mut self, c: char) -> Result<Option<char>, SyntaxError> {
        let d = c.to_digit(16).ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let code = self.acc;
        self.acc = 0;
        self.len = 0;

        match self.high.take() {
            Some(high) if LOW_SURROGATES.contains(&code) => {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
                char::from_u32(combined)
                    .map(Some)
                    .ok_or(SyntaxError::InvalidUnicodeEscapeSequence(combined))
            }
            Some(high) => Err(SyntaxError::LoneSurrogate(high)),
            None if HIGH_SURROGATES.contains(&code) => {
                self.high = Some(code);
                Ok(None)
            }
            None if LOW_SURROGATES.contains(&code) => Err(SyntaxError::LoneSurrogate(code)),
            None => char::from_u32(code)
                .map(Some)
                .ok_or(SyntaxError::InvalidUnicodeEscapeSequence(code)),
        }
    }
}
