use csv::Writer;

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

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 500;
    let output_path = "apples.csv";

    let mut writer = Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "A_id",
            "Size",
            "Weight",
            "Sweetness",
            "Crunchiness",
            "Juiciness",
            "Ripeness",
            "Acidity",
            "Quality",
        ])
        .expect("Failed to write header");

    let mut missing_rows = 0;
    for id in 0..n_rows {
        let good = rng.next_f64() < 0.5;
        let shift = if good { 1.0 } else { -1.0 };

        // Good apples skew larger, sweeter, and juicier; the columns the
        // dashboard drops stay uninformative noise.
        let size = rng.gauss(0.8 * shift, 1.0);
        let weight = rng.gauss(0.0, 1.0);
        let sweetness = rng.gauss(0.7 * shift, 1.0);
        let crunchiness = rng.gauss(0.0, 1.0);
        let juiciness = rng.gauss(0.6 * shift, 1.0);
        let ripeness = rng.gauss(0.2 * shift, 1.0);
        let acidity = rng.gauss(0.0, 1.0);

        let mut fields = vec![
            id.to_string(),
            format!("{size:.3}"),
            format!("{weight:.3}"),
            format!("{sweetness:.3}"),
            format!("{crunchiness:.3}"),
            format!("{juiciness:.3}"),
            format!("{ripeness:.3}"),
            format!("{acidity:.3}"),
            (if good { "good" } else { "bad" }).to_string(),
        ];

        // Blank one value in a few rows so the cleaning step has work to do.
        if rng.next_f64() < 0.03 {
            let col = 1 + (rng.next_u64() % 7) as usize;
            fields[col] = String::new();
            missing_rows += 1;
        }

        writer.write_record(&fields).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output file");

    println!("Wrote {n_rows} apples ({missing_rows} rows with a missing value) to {output_path}");
}
