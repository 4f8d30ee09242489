use ssg::{Channel, GateSsg, Phase, SampleSsg, SsgBackend};

/// Count channel sign changes over `cycles` full cycles.
fn count_toggles<B: SsgBackend>(chip: &mut B, channel: Channel, cycles: usize) -> usize {
    let bit = 1 << channel.index();
    let mut last = chip.tone_signs() & bit;
    let mut toggles = 0;
    for _ in 0..cycles {
        chip.run_cycles(1);
        let now = chip.tone_signs() & bit;
        if now != last {
            toggles += 1;
        }
        last = now;
    }
    toggles
}

#[test]
fn tone_a_end_to_end() {
    let mut chip = GateSsg::new();
    chip.write_register(0x00, 100);
    chip.write_register(0x01, 0);
    chip.write_register(0x07, 0x3E);
    chip.write_register(0x08, 0x0F);
    chip.run_cycles(4);
    assert_eq!(chip.pending_writes(), 0);

    let mut toggles: usize = 0;
    let mut last = chip.tone_signs() & 1;
    for _ in 0..3200 {
        chip.clock(Phase::Zero);
        chip.clock(Phase::One);
        let sign = chip.tone_signs() & 1;
        if sign != last {
            toggles += 1;
        }
        last = sign;

        let [a, b, c] = chip.analog_output();
        assert!(a == 0 || a == 10922, "channel A output {a}");
        assert_eq!(b, 0);
        assert_eq!(c, 0);
    }

    let expected = 3200 / (4 * 100);
    assert!(
        toggles.abs_diff(expected) <= 1,
        "expected {expected} +/- 1 toggles, got {toggles}"
    );
}

#[test]
fn tone_rate_scales_with_period() {
    for period in [1u16, 8, 37, 255] {
        let mut chip = GateSsg::new();
        chip.write_register(0x00, (period & 0xFF) as u8);
        chip.write_register(0x01, (period >> 8) as u8);
        chip.run_cycles(2);

        let cycles = 3200;
        let toggles = count_toggles(&mut chip, Channel::A, cycles);
        let expected = cycles / (4 * period as usize);
        assert!(
            toggles.abs_diff(expected) <= 1,
            "period {period}: expected {expected}, got {toggles}"
        );
    }
}

#[test]
fn tone_period_zero_behaves_as_one() {
    let mut zero = GateSsg::new();
    let mut one = GateSsg::new();
    one.write_register(0x02, 1);
    zero.write_register(0x02, 0);
    zero.run_cycles(1);
    one.run_cycles(1);
    assert_eq!(
        count_toggles(&mut zero, Channel::B, 400),
        count_toggles(&mut one, Channel::B, 400)
    );
}

#[test]
fn replay_is_deterministic() {
    fn run() -> Vec<[u16; 3]> {
        let mut chip = GateSsg::new();
        let regs = [
            0x10, 0x01, 0x20, 0x02, 0x30, 0x03, 0x05, 0x30, 0x0F, 0x10, 0x0A, 0x40, 0x00, 0x0E,
            0x00, 0x00,
        ];
        chip.load_registers(&regs);
        let mut out = Vec::with_capacity(5000);
        for cycle in 0..5000 {
            if cycle == 2500 {
                chip.write_register(0x07, 0x00);
                chip.write_register(0x0D, 0x0A);
            }
            chip.run_cycles(1);
            out.push(chip.analog_output());
        }
        out
    }

    assert_eq!(run(), run());
}

#[test]
fn mute_does_not_disturb_generators() {
    fn setup<B: SsgBackend>(chip: &mut B) {
        chip.write_register(0x00, 0x21);
        chip.write_register(0x06, 0x03);
        chip.write_register(0x07, 0x36);
        chip.write_register(0x08, 0x10);
        chip.write_register(0x0B, 0x02);
        chip.write_register(0x0D, 0x0E);
    }

    fn check<B: SsgBackend>(mut muted: B, mut reference: B) {
        setup(&mut muted);
        setup(&mut reference);
        muted.run_cycles(300);
        reference.run_cycles(300);

        muted.set_channel_mute(0, true);
        for _ in 0..700 {
            muted.run_cycles(1);
            reference.run_cycles(1);
            assert_eq!(muted.analog_output()[0], 0);
            assert_eq!(muted.tone_signs(), reference.tone_signs());
            assert_eq!(muted.noise_output(), reference.noise_output());
            assert_eq!(muted.envelope_level(), reference.envelope_level());
        }
        muted.set_channel_mute(0, false);

        for _ in 0..1000 {
            muted.run_cycles(1);
            reference.run_cycles(1);
            assert_eq!(muted.analog_output(), reference.analog_output());
        }
    }

    check(GateSsg::new(), GateSsg::new());
    check(SampleSsg::new(), SampleSsg::new());
}

#[test]
fn reset_restores_power_on_state() {
    let mut chip = GateSsg::new();
    chip.load_registers(&[0xFF; 16]);
    chip.run_cycles(64);
    assert_ne!(chip.dump_registers(), [0; 16]);

    chip.reset();
    assert_eq!(chip.dump_registers(), [0; 16]);
    assert_eq!(chip.analog_output(), [0; 3]);
    assert_eq!(chip.tone_signs(), 0);
    assert_eq!(chip.envelope_level(), 31);
}
