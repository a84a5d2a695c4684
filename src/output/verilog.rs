use super::Formatter;
use crate::fixed_point::QuantizedTapSequence;

/// SystemVerilog coefficient table
///
/// ```text
/// localparam integer COEFF_SHIFT = 1;
/// localparam signed [23:0] COEFFS [0:14] = '{27019, -78579, ..., 7450730, ..., -78579, 27019};
/// ```
pub struct VerilogFormatter;

impl Formatter for VerilogFormatter {
    fn format(&self, table: &QuantizedTapSequence) -> String {
        let coeffs = table
            .values
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "localparam integer COEFF_SHIFT = {};\nlocalparam signed [{}:0] COEFFS [0:{}] = '{{{}}};\n",
            table.shift,
            table.bit_width - 1,
            table.values.len().saturating_sub(1),
            coeffs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verilog_table() {
        let table = QuantizedTapSequence {
            bit_width: 24,
            shift: 1,
            values: vec![-5, 100, -5],
        };
        assert_eq!(
            VerilogFormatter.format(&table),
            "localparam integer COEFF_SHIFT = 1;\n\
             localparam signed [23:0] COEFFS [0:2] = '{-5, 100, -5};\n"
        );
    }
}
