use serde::Serialize;

use super::Formatter;
use crate::fixed_point::QuantizedTapSequence;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonTable<'a> {
    bit_width: u32,
    shift: u32,
    coeffs: &'a [i64],
}

impl Formatter for JsonFormatter {
    fn format(&self, table: &QuantizedTapSequence) -> String {
        let json = JsonTable {
            bit_width: table.bit_width,
            shift: table.shift,
            coeffs: &table.values,
        };
        // Integers and plain fields only; serialization cannot fail
        let mut out = serde_json::to_string(&json).unwrap_or_default();
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_table() {
        let table = QuantizedTapSequence {
            bit_width: 16,
            shift: 0,
            values: vec![1, -2, 1],
        };
        let out = JsonFormatter.format(&table);
        assert_eq!(out, "{\"bit_width\":16,\"shift\":0,\"coeffs\":[1,-2,1]}\n");
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["coeffs"][1], -2);
    }
}
