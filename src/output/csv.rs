use super::Formatter;
use crate::fixed_point::QuantizedTapSequence;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, table: &QuantizedTapSequence) -> String {
        let mut out = String::from("index,coeff\n");
        for (i, c) in table.values.iter().enumerate() {
            out.push_str(&format!("{},{}\n", i, c));
        }
        out
    }
}
