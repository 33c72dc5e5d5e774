//! Human-readable dumps in the classic `print_r` layout.
//!
//! ```text
//! Array
//! (
//!     [name] => Alice
//!     [tags] => Array
//!         (
//!             [0] => a
//!         )
//!
//! )
//! ```

use super::{Array, Record, Value, list};

const INDENT: usize = 4;

impl Record {
    /// Renders [`Record::to_array`] of this record as readable text.
    ///
    /// Without `recursive`, nested records are shown as `Record Object` blocks;
    /// with it, everything is rendered as plain arrays.
    pub fn to_dump(&self, recursive: bool) -> String {
        let mut out = String::new();
        write_value(&mut out, &Value::Array(self.to_array(recursive)), 0);
        out
    }
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Array(array) => {
            out.push_str("Array\n");
            write_block(out, array, indent);
        }
        Value::Record(record) => {
            out.push_str("Record Object\n");
            write_block(out, record.as_array(), indent);
        }
        Value::Rows(rows) => {
            out.push_str("RowSet Object\n");
            write_block(out, &list(rows.iter().cloned()), indent);
        }
        Value::Object(object) => {
            out.push_str(object.type_name());
            out.push_str(" Object\n");
            write_block(out, &Array::new(), indent);
        }
        scalar => out.push_str(&scalar.coerce_string()),
    }
}

fn write_block(out: &mut String, array: &Array, indent: usize) {
    pad(out, indent);
    out.push_str("(\n");
    for (key, value) in array {
        pad(out, indent + INDENT);
        out.push_str(&format!("[{key}] => "));
        write_value(out, value, indent + 2 * INDENT);
        out.push('\n');
    }
    pad(out, indent);
    out.push_str(")\n");
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}
