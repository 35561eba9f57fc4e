use super::*;

#[test]
fn progress_endpoints() {
    assert_eq!(opacity_for_progress(0.0), 0);
    assert_eq!(opacity_for_progress(1.0), 255);
    assert_eq!(opacity_for_progress(0.5), 128);
}

#[test]
fn progress_is_clamped() {
    assert_eq!(opacity_for_progress(-0.3), 0);
    assert_eq!(opacity_for_progress(1.7), 255);
    assert_eq!(opacity_for_progress(f64::NAN), 0);
}

#[test]
fn ramp_matches_rounded_fractions() {
    for n in 1..=120u64 {
        let got: Vec<u8> = OpacityRamp::new(n).collect();
        assert_eq!(got.len() as u64, n);
        for (i, a) in got.iter().enumerate() {
            let k = i as u64 + 1;
            let expected = (255.0 * k as f64 / n as f64).round() as u8;
            assert_eq!(*a, expected, "n={n} k={k}");
        }
        assert_eq!(*got.last().unwrap(), 255);
    }
}

#[test]
fn ramp_is_non_decreasing() {
    let ramp: Vec<u8> = OpacityRamp::new(60).collect();
    assert!(ramp.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn ramp_of_two_rounds_half_up() {
    // 255 / 2 = 127.5
    assert_eq!(OpacityRamp::new(2).collect::<Vec<_>>(), vec![128, 255]);
}

#[test]
fn empty_ramp_yields_nothing() {
    assert_eq!(OpacityRamp::new(0).count(), 0);
    assert_eq!(OpacityRamp::new(5).len(), 5);
}
