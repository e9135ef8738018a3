use std::fmt::Write as _;
use std::path::PathBuf;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_spectrum(
    wavenumbers: &[f64],
    bands: &[(f64, f64, f64)],
    drift: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavenumbers
        .iter()
        .map(|&wn| {
            let signal: f64 = bands
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wn, mu, sigma, amp))
                .sum();
            signal + drift * (4000.0 - wn) / 3600.0 + rng.gauss(0.0, noise_level)
        })
        .collect()
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

/// How one sample file is laid out on disk.
struct Layout {
    file_name: &'static str,
    header: &'static str,
    separator: &'static str,
    decimal_comma: bool,
    /// Keep every n-th point; a coarse survey scan has only a dozen rows.
    stride: usize,
}

const LAYOUTS: [Layout; 5] = [
    Layout {
        file_name: "PET_instrument.csv",
        header: "Spectrum export\nNúmero de onda;Absorbância\n",
        separator: ";",
        decimal_comma: true,
        stride: 1,
    },
    Layout {
        file_name: "Polyethylene (2)_excel.csv",
        header: "wavenumber,absorbance\n",
        separator: ",",
        decimal_comma: false,
        stride: 1,
    },
    Layout {
        file_name: "Nylon_tabbed.txt",
        header: "",
        separator: "\t",
        decimal_comma: false,
        stride: 1,
    },
    Layout {
        file_name: "Polystyrene_spaced.txt",
        header: "",
        separator: "   ",
        decimal_comma: false,
        stride: 1,
    },
    Layout {
        file_name: "Cellulose_noheader.csv",
        header: "",
        separator: ";",
        decimal_comma: true,
        stride: 150,
    },
];

fn format_number(value: f64, decimals: usize, decimal_comma: bool) -> String {
    let text = format!("{value:.decimals$}");
    if decimal_comma {
        text.replace('.', ",")
    } else {
        text
    }
}

fn main() -> std::io::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_spectra"));
    std::fs::create_dir_all(&out_dir)?;

    let mut rng = SimpleRng::new(42);

    // Wavenumbers: 4000 → 402, step 2
    let wavenumbers: Vec<f64> = (0..1800).map(|i| 4000.0 - i as f64 * 2.0).collect();

    let bands: [Vec<(f64, f64, f64)>; 5] = [
        vec![(1715.0, 12.0, 0.9), (1240.0, 15.0, 0.7), (1095.0, 14.0, 0.5), (725.0, 8.0, 0.3)],
        vec![(2915.0, 14.0, 0.8), (2848.0, 12.0, 0.6), (1470.0, 8.0, 0.3), (720.0, 6.0, 0.25)],
        vec![(3300.0, 50.0, 0.4), (1635.0, 15.0, 0.8), (1540.0, 14.0, 0.6)],
        vec![(3026.0, 10.0, 0.3), (1601.0, 8.0, 0.2), (1493.0, 8.0, 0.4), (698.0, 7.0, 0.9)],
        vec![(3340.0, 80.0, 0.5), (2900.0, 30.0, 0.2), (1030.0, 30.0, 0.9)],
    ];

    for (layout, bands) in LAYOUTS.iter().zip(&bands) {
        let absorbance = generate_spectrum(&wavenumbers, bands, 0.05, 0.004, &mut rng);

        let mut text = String::from(layout.header);
        let mut rows = 0;
        for (wn, a) in wavenumbers.iter().zip(&absorbance).step_by(layout.stride) {
            rows += 1;
            let _ = writeln!(
                text,
                "{}{}{}",
                format_number(*wn, 1, layout.decimal_comma),
                layout.separator,
                format_number(*a, 5, layout.decimal_comma),
            );
        }

        let path = out_dir.join(layout.file_name);
        std::fs::write(&path, text)?;
        println!("Wrote {rows} points to {}", path.display());
    }

    Ok(())
}
