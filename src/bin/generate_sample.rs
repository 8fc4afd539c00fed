//! Write synthetic FSEC log files for trying out the viewer.
//!
//! Usage: `generate_sample [OUT_DIR]` (default `sample_logs`).

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Column volume in ml and the sampling step of the detector.
const TOTAL_VOLUME: f64 = 30.0;
const STEP: f64 = 0.01;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One construct: void-volume aggregate, the fusion protein, free fluorophore.
struct Construct {
    name: &'static str,
    /// (elution volume, width, height) per peak.
    peaks: [(f64, f64, f64); 3],
}

const CONSTRUCTS: [Construct; 4] = [
    Construct {
        name: "GFP_fusion_WT",
        peaks: [(8.2, 0.25, 900.0), (12.6, 0.45, 5200.0), (17.4, 0.5, 700.0)],
    },
    Construct {
        name: "GFP_fusion_dN20",
        peaks: [(8.2, 0.25, 2600.0), (13.1, 0.5, 2100.0), (17.4, 0.5, 1200.0)],
    },
    Construct {
        name: "GFP_fusion_T4L",
        peaks: [(8.2, 0.25, 400.0), (12.2, 0.4, 7400.0), (17.4, 0.5, 350.0)],
    },
    Construct {
        name: "GFP_fusion_BRIL",
        peaks: [(8.2, 0.25, 1500.0), (12.4, 0.42, 4300.0), (17.4, 0.5, 900.0)],
    },
];

fn render_log(construct: &Construct, rng: &mut SimpleRng) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[Header]");
    let _ = writeln!(out, "Sample Name\t{}", construct.name);
    let _ = writeln!(out, "Detector\tRF-20A Ex 480 Em 512");
    let _ = writeln!(out);
    let _ = writeln!(out, "Volume(ml)\tIntensity");

    let n = (TOTAL_VOLUME / STEP).round() as usize;
    for i in 0..=n {
        let volume = i as f64 * STEP;
        let signal: f64 = construct
            .peaks
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(volume, mu, sigma, amp))
            .sum();
        let baseline = 150.0 + 2.0 * volume;
        let intensity = signal + baseline + rng.gauss(0.0, 12.0);
        let _ = writeln!(out, "{volume:.3}\t{intensity:.1}");
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_logs"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    for construct in &CONSTRUCTS {
        let path = out_dir.join(format!("{}.txt", construct.name));
        std::fs::write(&path, render_log(construct, &mut rng))
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }

    println!(
        "Wrote {} FSEC logs to {}",
        CONSTRUCTS.len(),
        out_dir.display()
    );
    Ok(())
}
