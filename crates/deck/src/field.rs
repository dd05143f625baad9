//! Key table entries, typed values, and their text formats

// crate modules
use crate::error::{Error, Result};
use crate::model::{ModelChoice, ModelFamily};

// xtools modules
use xtools_schema::{Gate, SchemaVersion};
use xtools_utils::{f, ValueExt};

/// One `Key=Value` entry of a deck's master key table
///
/// The table is the single source of truth for serialisation. The order of
/// the table is the order keys are written, and the [Gate] decides which
/// schema versions carry the key at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// Literal key as written in the deck
    pub key: &'static str,
    /// Version condition for the key to exist
    pub gate: Gate,
    /// Text format of the value
    pub format: Format,
}

impl Field {
    /// Key present in every schema version
    pub const fn always(key: &'static str, format: Format) -> Self {
        Self {
            key,
            gate: Gate::Always,
            format,
        }
    }

    /// Key introduced at `version`
    pub const fn since(key: &'static str, version: SchemaVersion, format: Format) -> Self {
        Self {
            key,
            gate: Gate::Since(version),
            format,
        }
    }

    /// Key removed at `version`
    pub const fn before(key: &'static str, version: SchemaVersion, format: Format) -> Self {
        Self {
            key,
            gate: Gate::Before(version),
            format,
        }
    }

    /// Check if the key exists for a schema version
    pub fn is_applicable(&self, version: SchemaVersion) -> bool {
        self.gate.admits(version)
    }
}

/// Text format of a value, mirroring the simulator's own serialiser
///
/// | Format            | Example         |
/// | ----------------- | --------------- |
/// | `Fixed(2)`        | `40.00`         |
/// | `FixedTrimmed(6)` | `30.0`, `0.25`  |
/// | `Scientific(6)`   | `1.000000e+00`  |
/// | `SciTrimmed(9)`   | `1e-10`         |
/// | `Integer`         | `1000`          |
/// | `Text`            | `Si`            |
/// | `Flag`            | `1` or `0`      |
/// | `Model(..)`       | `2`             |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Float with a fixed number of decimals
    Fixed(usize),
    /// Float with a fixed number of decimals, trailing zeros removed
    FixedTrimmed(usize),
    /// Float in scientific notation with a two digit exponent
    Scientific(usize),
    /// Scientific notation, trailing mantissa zeros removed
    SciTrimmed(usize),
    /// Signed integer
    Integer,
    /// Free text, written as is
    Text,
    /// Boolean flag written as an integer
    Flag,
    /// Numeric code of a physics model
    Model(ModelFamily),
}

impl Format {
    /// Convert raw text from a deck into a typed value
    pub fn extract(&self, key: &str, raw: &str) -> Result<Value> {
        let raw = raw.trim();
        let fail = || Error::ParseError {
            field: key.to_string(),
            raw_value: raw.to_string(),
        };

        let value = match self {
            Format::Fixed(_)
            | Format::FixedTrimmed(_)
            | Format::Scientific(_)
            | Format::SciTrimmed(_) => Value::Float(raw.parse::<f64>().map_err(|_| fail())?),
            Format::Integer => Value::Integer(raw.parse::<i64>().map_err(|_| fail())?),
            Format::Text => Value::Text(raw.to_string()),
            Format::Flag => match raw.to_lowercase().as_str() {
                "1" | "true" => Value::Flag(true),
                "0" | "false" => Value::Flag(false),
                _ => return Err(fail()),
            },
            Format::Model(family) => {
                let code = raw.parse::<u32>().map_err(|_| fail())?;
                Value::Model(ModelChoice::new(*family, code)?)
            }
        };

        Ok(value)
    }

    /// Write a typed value exactly as the simulator would
    pub fn format(&self, key: &str, value: &Value) -> Result<String> {
        let text = match (self, value) {
            (Format::Fixed(p), Value::Float(v)) => f!("{v:.p$}", p = *p),
            (Format::FixedTrimmed(p), Value::Float(v)) => v.fixed_trimmed(*p),
            (Format::Scientific(p), Value::Float(v)) => v.sci(*p, 2),
            (Format::SciTrimmed(p), Value::Float(v)) => v.sci_trimmed(*p, 2),
            (Format::Integer, Value::Integer(v)) => v.to_string(),
            (Format::Text, Value::Text(v)) => v.clone(),
            (Format::Flag, Value::Flag(v)) => u8::from(*v).to_string(),
            (Format::Model(family), Value::Model(v)) if v.family() == *family => {
                v.code().to_string()
            }
            _ => {
                return Err(Error::ValueKindMismatch {
                    key: key.to_string(),
                })
            }
        };
        Ok(text)
    }
}

/// Typed value of a single deck entry
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Any floating point quantity
    Float(f64),
    /// Counts and integer settings
    Integer(i64),
    /// Names, file names and paths
    Text(String),
    /// Boolean switches
    Flag(bool),
    /// Physics model selection
    Model(ModelChoice),
}

impl Value {
    /// Unwrap a float, or fail for `key`
    pub fn into_f64(self, key: &str) -> Result<f64> {
        match self {
            Value::Float(v) => Ok(v),
            _ => Err(mismatch(key)),
        }
    }

    /// Unwrap an integer, or fail for `key`
    pub fn into_i64(self, key: &str) -> Result<i64> {
        match self {
            Value::Integer(v) => Ok(v),
            _ => Err(mismatch(key)),
        }
    }

    /// Unwrap text, or fail for `key`
    pub fn into_text(self, key: &str) -> Result<String> {
        match self {
            Value::Text(v) => Ok(v),
            _ => Err(mismatch(key)),
        }
    }

    /// Unwrap a flag, or fail for `key`
    pub fn into_flag(self, key: &str) -> Result<bool> {
        match self {
            Value::Flag(v) => Ok(v),
            _ => Err(mismatch(key)),
        }
    }

    /// Unwrap a model choice, or fail for `key`
    pub fn into_model(self, key: &str) -> Result<ModelChoice> {
        match self {
            Value::Model(v) => Ok(v),
            _ => Err(mismatch(key)),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl From<ModelChoice> for Value {
    fn from(value: ModelChoice) -> Self {
        Value::Model(value)
    }
}

fn mismatch(key: &str) -> Error {
    Error::ValueKindMismatch {
        key: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_formats() {
        let value = Value::Float(1.0e-10);
        assert_eq!(Format::SciTrimmed(9).format("k", &value).unwrap(), "1e-10");
        assert_eq!(Format::Scientific(6).format("k", &value).unwrap(), "1.000000e-10");

        let value = Value::Float(40.0);
        assert_eq!(Format::Fixed(2).format("k", &value).unwrap(), "40.00");
        assert_eq!(Format::FixedTrimmed(6).format("k", &value).unwrap(), "40.0");
    }

    #[test]
    fn flags() {
        assert_eq!(Format::Flag.extract("k", "1").unwrap(), Value::Flag(true));
        assert_eq!(Format::Flag.extract("k", "False").unwrap(), Value::Flag(false));
        assert!(Format::Flag.extract("k", "yes").is_err());
        assert_eq!(Format::Flag.format("k", &Value::Flag(true)).unwrap(), "1");
    }

    #[test]
    fn extraction_errors_carry_context() {
        let error = Format::FixedTrimmed(6).extract("BeamEnergy", "five").unwrap_err();
        match error {
            Error::ParseError { field, raw_value } => {
                assert_eq!(field, "BeamEnergy");
                assert_eq!(raw_value, "five");
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn model_codes() {
        let format = Format::Model(ModelFamily::AtomMac);
        let value = format.extract("AtomMacModel", "2").unwrap();
        assert_eq!(format.format("AtomMacModel", &value).unwrap(), "2");
        assert!(matches!(
            format.extract("AtomMacModel", "9"),
            Err(Error::UnknownModelCode { .. })
        ));
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        assert!(matches!(
            Format::Integer.format("k", &Value::Text("a".into())),
            Err(Error::ValueKindMismatch { .. })
        ));
        assert!(Value::Float(1.0).into_text("k").is_err());
    }
}
