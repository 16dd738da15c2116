mod common;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use yolodecode::{select_top_k, BoundingBox, Detection, TopK};

use common::detection;

fn unit_box() -> BoundingBox {
    BoundingBox::new(0.0, 0.0, 1.0, 1.0)
}

#[test]
fn forty_candidates_keep_best_thirty_descending() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut candidates: Vec<Detection> = (0..40)
        .map(|i| detection(i, (i + 1) as f32 / 41.0, unit_box()))
        .collect();
    candidates.shuffle(&mut rng);

    let top = select_top_k(candidates, 30);
    assert_eq!(top.len(), 30);
    let expected: Vec<usize> = (10..40).rev().collect();
    let got: Vec<usize> = top.iter().map(|det| det.id).collect();
    assert_eq!(got, expected);
    assert!(top.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn result_length_is_min_of_k_and_input() {
    let mut rng = StdRng::seed_from_u64(13);
    for n in 0..50 {
        let candidates: Vec<Detection> = (0..n)
            .map(|i| detection(i, rng.random_range(0.0..1.0), unit_box()))
            .collect();
        for k in [0, 1, 7, 30, 64] {
            let top = select_top_k(candidates.clone(), k);
            assert_eq!(top.len(), k.min(n), "n = {n}, k = {k}");
        }
    }
}

#[test]
fn kept_candidates_dominate_the_rest() {
    let mut rng = StdRng::seed_from_u64(31);
    let candidates: Vec<Detection> = (0..200)
        .map(|i| detection(i, rng.random_range(0.0..1.0), unit_box()))
        .collect();
    let top = select_top_k(candidates.clone(), 30);
    let weakest_kept = top.last().unwrap().confidence;

    let kept: Vec<usize> = top.iter().map(|det| det.id).collect();
    for det in candidates.iter().filter(|det| !kept.contains(&det.id)) {
        assert!(det.confidence <= weakest_kept);
    }
}

#[test]
fn equal_confidences_keep_arrival_order() {
    let candidates: Vec<Detection> = (0..5).map(|i| detection(i, 0.5, unit_box())).collect();
    let ids: Vec<usize> = select_top_k(candidates, 3).iter().map(|det| det.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn collector_accepts_incremental_pushes() {
    let mut topk = TopK::new(2);
    topk.extend([
        detection(0, 0.1, unit_box()),
        detection(1, 0.6, unit_box()),
    ]);
    topk.push(detection(2, 0.3, unit_box()));
    topk.push(detection(3, 0.05, unit_box()));
    assert_eq!(topk.len(), 2);

    let ids: Vec<usize> = topk.into_sorted_desc().iter().map(|det| det.id).collect();
    assert_eq!(ids, vec![1, 2]);
}
