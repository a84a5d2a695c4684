mod csv;
mod json;
mod verilog;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{DesignError, Result};
use crate::fixed_point::QuantizedTapSequence;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::verilog::VerilogFormatter;

/// Coefficient table output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CoeffFormat {
    /// SystemVerilog localparam array literal
    #[default]
    Verilog,
    Json,
    Csv,
}

pub trait Formatter {
    /// Render the whole table; the result ends with a newline
    fn format(&self, table: &QuantizedTapSequence) -> String;
}

pub fn create_formatter(format: CoeffFormat) -> Box<dyn Formatter> {
    match format {
        CoeffFormat::Verilog => Box::new(VerilogFormatter),
        CoeffFormat::Json => Box::new(JsonFormatter),
        CoeffFormat::Csv => Box::new(CsvFormatter),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file through a sibling temporary and rename it into place
///
/// The parent directory is created if needed. On failure the temporary is
/// removed and the target is left untouched.
pub fn write_atomic<F>(path: &Path, write_body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| DesignError::io(parent, e))?;
    }

    let tmp = temp_path(path);
    let result = File::create(&tmp).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_body(&mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    });

    match result.and_then(|()| fs::rename(&tmp, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(DesignError::io(path, e))
        }
    }
}

/// Persist the stimulus: one signed decimal integer per line, in time order
pub fn write_stimulus(path: &Path, samples: &[i64]) -> Result<()> {
    write_atomic(path, |w| {
        for sample in samples {
            writeln!(w, "{}", sample)?;
        }
        Ok(())
    })?;
    log::info!("Wrote {} stimulus samples to {}", samples.len(), path.display());
    Ok(())
}

/// Write an already rendered text artifact
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    write_atomic(path, |w| w.write_all(contents.as_bytes()))
}

/// Parse a stimulus file back into samples
pub fn read_stimulus(path: &Path) -> Result<Vec<i64>> {
    let content = fs::read_to_string(path).map_err(|e| DesignError::io(path, e))?;
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            line.trim().parse::<i64>().map_err(|e| {
                DesignError::io(
                    path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("line {}: {}", i + 1, e),
                    ),
                )
            })
        })
        .collect()
}
