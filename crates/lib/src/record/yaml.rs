//! YAML input and output for records.
//!
//! Parsing accepts any YAML document whose root is a mapping or a sequence and
//! merges it recursively into the record. Emitting writes the recursive plain
//! form as UTF-8 text; [`EmitOptions`] controls line breaks and document
//! markers so output can be matched byte for byte against other emitters.

use std::path::Path;

use tracing::{debug, warn};

use super::{Array, Key, Record, RecordError, Value, list};

/// Line break style for emitted YAML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineBreak {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl LineBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::CrLf => "\r\n",
            LineBreak::Cr => "\r",
        }
    }
}

/// Options for [`Record::to_yaml_with`].
///
/// ```
/// # use recordkit::record::{EmitOptions, LineBreak};
/// let options = EmitOptions::new()
///     .with_line_break(LineBreak::CrLf)
///     .with_document_markers(true);
/// assert_eq!(options.line_break(), LineBreak::CrLf);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    line_break: LineBreak,
    document_markers: bool,
}

impl EmitOptions {
    /// Default options: `\n` line breaks, no document markers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    /// Wrap the document in `---` and `...` markers
    pub fn with_document_markers(mut self, document_markers: bool) -> Self {
        self.document_markers = document_markers;
        self
    }

    pub fn line_break(&self) -> LineBreak {
        self.line_break
    }

    pub fn document_markers(&self) -> bool {
        self.document_markers
    }
}

impl Record {
    /// Parses `text` as YAML and merges the result recursively into this record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidFormat`] if `text` is not valid YAML or its
    /// root is not a mapping or sequence.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_yaml(&mut self, text: &str) -> crate::Result<&mut Self> {
        let parsed: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| {
            debug!(error = %e, "YAML parse failed");
            RecordError::InvalidFormat {
                reason: format!("Invalid YAML: {e}"),
            }
        })?;

        let value = from_yaml_value(parsed);
        if !value.is_mapping() {
            return Err(RecordError::InvalidFormat {
                reason: format!(
                    "Invalid YAML: expected a mapping or sequence, found {}",
                    value.type_name()
                ),
            }
            .into());
        }
        self.merge(value, true)
    }

    /// Reads the YAML file at `path` and merges it into this record.
    ///
    /// # Errors
    ///
    /// - [`RecordError::NotFound`] if `path` does not exist
    /// - [`RecordError::Io`] if the file cannot be read
    /// - [`RecordError::InvalidFormat`] (`"Invalid YAML File <path>"`) if the
    ///   contents are not valid YAML
    #[allow(clippy::wrong_self_convention)]
    pub fn from_yaml_file(&mut self, path: impl AsRef<Path>) -> crate::Result<&mut Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RecordError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        debug!(path = %path.display(), "Loading YAML file");
        let bytes = std::fs::read(path).map_err(|source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let invalid = || RecordError::InvalidFormat {
            reason: format!("Invalid YAML File {}", path.display()),
        };
        let text = String::from_utf8(bytes).map_err(|_| invalid())?;
        if let Err(e) = self.from_yaml(&text) {
            warn!(path = %path.display(), error = %e, "Invalid YAML file");
            return Err(invalid().into());
        }
        Ok(self)
    }

    /// Creates a new record from the YAML file at `path`.
    ///
    /// Fails like [`Record::from_yaml_file`].
    pub fn load_yaml(path: impl AsRef<Path>) -> crate::Result<Self> {
        let mut record = Record::new();
        record.from_yaml_file(path)?;
        Ok(record)
    }

    /// Emits the recursive plain form as YAML with `\n` line breaks.
    pub fn to_yaml(&self) -> crate::Result<String> {
        self.to_yaml_with(&EmitOptions::default())
    }

    /// Emits the recursive plain form as YAML using `options`.
    pub fn to_yaml_with(&self, options: &EmitOptions) -> crate::Result<String> {
        let mut text = serde_yaml::to_string(self).map_err(|e| RecordError::EmitFailed {
            reason: e.to_string(),
        })?;

        if options.document_markers() {
            text = format!("---\n{text}...\n");
        }
        if options.line_break() != LineBreak::Lf {
            text = text.replace('\n', options.line_break().as_str());
        }
        Ok(text)
    }
}

/// Converts parsed YAML into a [`Value`]. Tags are dropped in favour of the
/// tagged value.
fn from_yaml_value(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::Int(i),
            (None, Some(u)) => Value::from(u),
            (None, None) => Value::Float(n.as_f64().unwrap_or_default()),
        },
        serde_yaml::Value::String(s) => Value::Text(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(list(items.into_iter().map(from_yaml_value)))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let array: Array = mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), from_yaml_value(value)))
                .collect();
            Value::Array(array)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml_value(tagged.value),
    }
}

/// Converts a YAML mapping key. Scalars follow the usual key rules; booleans
/// become 0 or 1, null becomes the empty name.
fn yaml_key(key: serde_yaml::Value) -> Key {
    match key {
        serde_yaml::Value::Null => Key::Name(String::new()),
        serde_yaml::Value::Bool(b) => Key::Index(u64::from(b)),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Key::from(i),
            None => match n.as_u64() {
                Some(u) => Key::Index(u),
                None => Key::Name(n.to_string()),
            },
        },
        serde_yaml::Value::String(s) => Key::from(s),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        complex => Key::Name(
            serde_yaml::to_string(&complex)
                .map(|text| text.trim_end().to_string())
                .unwrap_or_default(),
        ),
    }
}
