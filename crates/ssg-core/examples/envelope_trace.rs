//! Print the envelope level and channel A output for each envelope shape.
//!
//! Run with: RUST_LOG=debug cargo run --example envelope_trace -p ssg [shape] [fidelity]

use ssg::{Fidelity, SsgBackend, SsgConfig};

fn main() -> ssg::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let shapes: Vec<u8> = match args.next() {
        Some(arg) => {
            let shape = u8::from_str_radix(arg.trim_start_matches("0x"), 16)
                .map_err(|e| ssg::SsgError::ConfigError(format!("bad shape '{arg}': {e}")))?;
            vec![shape & 0x0F]
        }
        None => (0..16).collect(),
    };
    let fidelity: Fidelity = match args.next() {
        Some(arg) => arg.parse()?,
        None => Fidelity::Gate,
    };

    let config = SsgConfig {
        fidelity,
        ..Default::default()
    };

    for shape in shapes {
        let mut chip = config.build();
        chip.write_register(0x07, 0x3F); // Mode: tones and noise off
        chip.write_register(0x08, 0x10); // Level A from envelope
        chip.write_register(0x0B, 0x01); // Envelope period 1
        chip.write_register(0x0D, shape);
        chip.run_cycles(4);

        let mut trace = Vec::new();
        for _ in 0..96 {
            chip.run_cycles(4);
            trace.push(format!("{:2}", chip.envelope_level()));
        }
        println!("shape {shape:#03x}: {}", trace.join(" "));
        println!("             A = {:?}", chip.analog_output()[0]);
    }

    Ok(())
}
