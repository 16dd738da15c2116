mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolodecode::lowlevel::TensorLayout;
use yolodecode::{decode_grid, Anchor, BoundingBox, DetectorConfig, Pipeline, YoloDecodeError};

use common::{background_tensor, set_slot};

fn single_cell_config() -> DetectorConfig {
    DetectorConfig::default()
        .with_anchors(vec![Anchor::new(1.0, 1.0)])
        .with_stride(16)
}

#[test]
fn single_cell_decodes_to_clamped_box() {
    let cfg = single_cell_config();
    let tensor = [0.0, 0.0, 0.0, 0.0, 2.0, 5.0, 1.0, 1.0];
    let out = decode_grid(&tensor, 16, 16, &cfg).unwrap();

    assert_eq!(out.len(), 1);
    let det = &out[0];
    assert_eq!(det.id, 0);
    assert_eq!(&*det.label, "robot");
    assert_eq!(det.class.get(), 0);
    // softmax([5, 1, 1])[0] * sigmoid(2)
    assert!((det.confidence - 0.8497).abs() < 1e-3, "{}", det.confidence);
    assert_eq!(det.bbox, BoundingBox::new(0.0, 0.0, 15.0, 15.0));
}

#[test]
fn ids_are_tensor_offsets() {
    let cfg = DetectorConfig::default();
    let (layout, mut tensor) = background_tensor(&cfg, 416, 416);
    set_slot(&mut tensor, &layout, (7, 2), 3, [0.0; 4], 4.0, &[0.0, 0.0, 6.0]);

    let out = decode_grid(&tensor, 416, 416, &cfg).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, layout.offset(7, 2, 3));
    assert_eq!(&*out[0].label, "blueball");
}

#[test]
fn equal_class_scores_pick_lowest_index() {
    let cfg = single_cell_config();
    let tensor = [0.0, 0.0, 0.0, 0.0, 3.0, 0.0, 2.0, 2.0];
    let out = decode_grid(&tensor, 16, 16, &cfg).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(&*out[0].label, "redball");
}

#[test]
fn candidates_at_or_below_floor_are_dropped() {
    // sigmoid(-10) / 3 is far below 0.01.
    let cfg = single_cell_config();
    let tensor = [0.0, 0.0, 0.0, 0.0, -10.0, 0.0, 0.0, 0.0];
    assert!(decode_grid(&tensor, 16, 16, &cfg).unwrap().is_empty());

    let strict = single_cell_config().with_class_confidence_floor(0.99);
    let tensor = [0.0, 0.0, 0.0, 0.0, 2.0, 5.0, 1.0, 1.0];
    assert!(decode_grid(&tensor, 16, 16, &strict).unwrap().is_empty());
}

#[test]
fn random_tensors_respect_bounds_and_floor() {
    let cfg = DetectorConfig::default();
    let (width, height) = (416, 320);
    let layout = TensorLayout::new(&cfg, width, height);
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..8 {
        let tensor: Vec<f32> = (0..layout.expected_len())
            .map(|_| rng.random_range(-4.0..4.0))
            .collect();
        let out = decode_grid(&tensor, width, height, &cfg).unwrap();
        assert!(!out.is_empty());
        for det in &out {
            assert!(f64::from(det.confidence) > cfg.class_confidence_floor);
            assert!(det.confidence <= 1.0);
            assert!(det.bbox.is_within(width, height), "{:?}", det.bbox);
            assert!(det.bbox.left <= det.bbox.right);
            assert!(det.bbox.top <= det.bbox.bottom);
            assert!(det.id < tensor.len());
            assert_eq!(det.id % cfg.channels_per_box(), 0);
        }
    }
}

#[test]
fn decode_output_follows_grid_order() {
    let cfg = DetectorConfig::default();
    let (layout, mut tensor) = background_tensor(&cfg, 416, 416);
    set_slot(&mut tensor, &layout, (5, 9), 0, [0.0; 4], 3.0, &[4.0, 0.0, 0.0]);
    set_slot(&mut tensor, &layout, (1, 2), 4, [0.0; 4], 3.0, &[4.0, 0.0, 0.0]);
    set_slot(&mut tensor, &layout, (8, 2), 1, [0.0; 4], 3.0, &[4.0, 0.0, 0.0]);

    let ids: Vec<usize> = decode_grid(&tensor, 416, 416, &cfg)
        .unwrap()
        .iter()
        .map(|det| det.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            layout.offset(1, 2, 4),
            layout.offset(8, 2, 1),
            layout.offset(5, 9, 0)
        ]
    );
}

#[test]
fn wrong_length_is_a_shape_mismatch() {
    let cfg = DetectorConfig::default();
    let err = decode_grid(&[0.0; 10], 416, 416, &cfg).unwrap_err();
    assert_eq!(
        err,
        YoloDecodeError::ShapeMismatch {
            expected: 13 * 13 * 5 * 8,
            got: 10,
        }
    );
}

#[test]
fn invalid_config_is_rejected_before_decoding() {
    let cfg = DetectorConfig {
        num_classes: 4,
        ..DetectorConfig::default()
    };
    assert!(matches!(
        decode_grid(&[], 416, 416, &cfg),
        Err(YoloDecodeError::ConfigurationInvalid { .. })
    ));
}

#[test]
fn frame_smaller_than_stride_yields_nothing() {
    let cfg = DetectorConfig::default();
    assert!(decode_grid(&[], 20, 20, &cfg).unwrap().is_empty());
}

#[test]
fn huge_frame_dimensions_are_a_shape_mismatch() {
    let cfg = DetectorConfig::default();
    let expected = Err(YoloDecodeError::ShapeMismatch {
        expected: usize::MAX,
        got: 8,
    });
    assert_eq!(decode_grid(&[0.0; 8], usize::MAX, usize::MAX, &cfg), expected);
    assert_eq!(
        Pipeline::new(cfg).unwrap().process(&[0.0; 8], usize::MAX, usize::MAX),
        expected
    );

    // One large side is enough to overflow the row length.
    let err = decode_grid(&[0.0; 8], usize::MAX, 32, &DetectorConfig::default()).unwrap_err();
    assert!(matches!(err, YoloDecodeError::ShapeMismatch { .. }));
}
