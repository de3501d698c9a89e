use crate::foundation::error::{MorphError, MorphResult};

/// Cursor over path mini-language input.
///
/// Separators are whitespace and commas. Numbers follow the path number
/// grammar, so `"10-5"` reads as two numbers and `"1.5.5"` as `1.5` then `.5`.
pub(crate) struct PathLexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PathLexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    pub(crate) fn skip_separators(&mut self) {
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_whitespace() || self.bytes[self.pos] == b',')
        {
            self.pos += 1;
        }
    }

    pub(crate) fn is_eof(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.bytes.len()
    }

    /// Consume a command letter if one is next.
    pub(crate) fn command(&mut self) -> Option<char> {
        self.skip_separators();
        let c = *self.bytes.get(self.pos)?;
        // `e`/`E` only appear inside numbers
        if c.is_ascii_alphabetic() && !matches!(c, b'e' | b'E') {
            self.pos += 1;
            return Some(c as char);
        }
        None
    }

    pub(crate) fn number(&mut self) -> MorphResult<f64> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.bytes;
        let mut i = start;

        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let mut digits = i - int_start;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            digits += i - frac_start;
        }
        if digits == 0 {
            return Err(self.error(start, "expected number"));
        }

        // exponent
        if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            let exp_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j == exp_start {
                return Err(self.error(i, "invalid number exponent (expected digits)"));
            }
            i = j;
        }

        let v: f64 = self.input[start..i]
            .parse()
            .map_err(|_| self.error(start, "invalid number"))?;
        if !v.is_finite() {
            return Err(self.error(start, "number out of range"));
        }
        self.pos = i;
        Ok(v)
    }

    /// Arc flag: a single `0` or `1`, which may be packed against the next token.
    pub(crate) fn flag(&mut self) -> MorphResult<f64> {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0.0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1.0)
            }
            _ => Err(self.error(self.pos, "expected arc flag (0 or 1)")),
        }
    }

    fn error(&self, at: usize, msg: &str) -> MorphError {
        MorphError::parse(format!("path: {msg} at byte {at} in \"{}\"", self.input))
    }
}
