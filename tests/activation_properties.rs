use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolodecode::{sigmoid, softmax};

#[test]
fn sigmoid_stays_strictly_inside_unit_interval() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2_000 {
        let x: f32 = rng.random_range(-15.0..=15.0);
        let y = sigmoid(x);
        assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
    }
}

#[test]
fn sigmoid_is_monotonic() {
    let mut prev = sigmoid(-15.0);
    let mut x = -15.0f32;
    while x <= 15.0 {
        let y = sigmoid(x);
        assert!(y >= prev, "sigmoid decreased at {x}");
        prev = y;
        x += 0.05;
    }
    assert!((sigmoid(0.0) - 0.5).abs() < 1e-7);
}

#[test]
fn softmax_sums_to_one() {
    let mut rng = StdRng::seed_from_u64(11);
    for len in 1..12 {
        let values: Vec<f32> = (0..len).map(|_| rng.random_range(-20.0..20.0)).collect();
        let probs = softmax(&values);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "sum {sum} for {values:?}");
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }
}

#[test]
fn softmax_is_shift_invariant() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let values: Vec<f32> = (0..4).map(|_| rng.random_range(-5.0..5.0)).collect();
        let shift: f32 = rng.random_range(-50.0..50.0);
        let shifted: Vec<f32> = values.iter().map(|v| v + shift).collect();
        let a = softmax(&values);
        let b = softmax(&shifted);
        for (pa, pb) in a.iter().zip(&b) {
            assert!((pa - pb).abs() < 1e-4, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn softmax_of_known_logits() {
    let probs = softmax(&[5.0, 1.0, 1.0]);
    assert!((probs[0] - 0.964_663).abs() < 1e-5);
    assert!((probs[1] - 0.017_668).abs() < 1e-5);
    assert_eq!(probs[1], probs[2]);
}
