//! Cassette data model and the append-friendly text codec.

use serde::{Deserialize, Serialize};

use crate::error::TapeError;

/// A single scalar value carried in query parameters and result rows.
///
/// The variants mirror what the cassette's YAML representation can express;
/// containers round-trip by ordered-value equality only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One result row: an ordered sequence of scalar values.
pub type Row = Vec<Scalar>;

/// The identity of one executed statement, matched structurally during replay.
///
/// Equality covers all four fields. `None` serializes as YAML `null` so every
/// key is present on disk, and an unset hint stays distinguishable from an
/// explicit `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDescriptor {
    /// SQL text as passed to the driver.
    pub query: String,
    /// Ordered statement parameters, if any were supplied.
    pub params: Option<Vec<Scalar>>,
    /// Driver prepare hint; `None` when the caller left it unset.
    pub prepare: Option<bool>,
    /// Driver binary-format hint; `None` when the caller left it unset.
    pub binary: Option<bool>,
}

/// The captured outcome of one executed statement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseRecord {
    /// The statement produced no result set at all (e.g. DDL).
    ///
    /// Serialized as `null`; distinct from a result set with zero rows.
    NoResult,
    /// The full, ordered result set.
    Rows(Vec<Row>),
}

/// One immutable request/response pair, in capture order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CassetteEntry {
    /// The statement identity as issued.
    pub request: RequestDescriptor,
    /// The captured outcome.
    pub response: ResponseRecord,
}

/// Encodes one entry as a self-contained single-item YAML sequence fragment.
///
/// Fragments from independent calls, concatenated in append order with no
/// separator, form one valid sequence. That property is what makes the
/// append-only capture path possible: no fragment ever references or
/// rewrites another, so a crash or cancellation between appends leaves a
/// parseable file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_entry(entry: &CassetteEntry) -> Result<String, TapeError> {
    Ok(serde_yaml::to_string(std::slice::from_ref(entry))?)
}

/// Decodes a concatenation of fragments as one ordered entry sequence.
///
/// Empty input decodes as an empty sequence.
///
/// # Errors
///
/// Returns an error if the text is not a valid entry sequence.
pub fn decode_stream(text: &str) -> Result<Vec<CassetteEntry>, TapeError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(text)?)
}
