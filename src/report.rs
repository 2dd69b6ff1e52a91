//! Stable pretty printing of responses for side-by-side reading

use std::io::{self, Write};

use serde_json::{Map, Value};

/// Rebuilds `value` with every object's keys reordered: alphabetically when
/// `sort_keys` is set, otherwise in the order they appeared in the document.
pub fn order_keys(value: &Value, sort_keys: bool) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| order_keys(item, sort_keys))
                .collect(),
        ),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            if sort_keys {
                keys.sort();
            }
            let ordered: Map<String, Value> = keys
                .into_iter()
                .map(|key| (key.clone(), order_keys(&map[key.as_str()], sort_keys)))
                .collect();
            Value::Object(ordered)
        }
        scalar => scalar.clone(),
    }
}

/// Writes the reordered value as indented JSON followed by a newline.
pub fn write_ordered<W: Write>(mut writer: W, value: &Value, sort_keys: bool) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &order_keys(value, sort_keys))?;
    writeln!(writer)
}

/// Prints the reordered value to stdout.
pub fn print(value: &Value, sort_keys: bool) -> io::Result<()> {
    write_ordered(io::stdout().lock(), value, sort_keys)
}
