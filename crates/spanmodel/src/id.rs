use std::fmt;
use std::str::FromStr;

/// Errors produced when parsing a hex-encoded identifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected {expected} hex characters, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// A 128-bit trace identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(pub [u8; 16]);

impl TraceId {
    pub const INVALID: TraceId = TraceId([0; 16]);

    /// Reports whether the id has at least one non-zero byte.
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

/// A 64-bit span identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanId(pub [u8; 8]);

impl SpanId {
    pub const INVALID: SpanId = SpanId([0; 8]);

    /// Reports whether the id has at least one non-zero byte.
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

fn parse_fixed<const N: usize>(s: &str) -> Result<[u8; N], IdError> {
    if s.len() != N * 2 {
        return Err(IdError::InvalidLength {
            expected: N * 2,
            got: s.len(),
        });
    }
    let mut buf = [0u8; N];
    hex::decode_to_slice(s, &mut buf)?;
    Ok(buf)
}

impl FromStr for TraceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s).map(TraceId)
    }
}

impl FromStr for SpanId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s).map(SpanId)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
