use std::f64::consts::PI;
use std::path::PathBuf;

/// Sine at `f` (fraction of Nyquist) with the given amplitude
#[allow(dead_code)]
pub fn tone(f: f64, num_samples: usize, amplitude: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| amplitude * (PI * f * i as f64).sin())
        .collect()
}

/// Fresh, empty per-test directory under the system temp dir
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "cic-compensator-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
