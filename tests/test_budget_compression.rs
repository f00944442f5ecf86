//! End-to-end budget compression tests against the real JPEG probe.

mod common;

use common::{assert_fits_budget, create_gradient_image, create_solid_image};
use fit_search::EncodeProbe;
use imgfit::{
    compress_to_budget, compress_with_observer, ColorFormat, CompressOptions, EncodeFormat,
    ImageProbe, InfeasiblePolicy, Outcome,
};

#[test]
fn large_budget_keeps_real_quality() {
    let img = create_solid_image(512, 512, [255, 255, 255]);
    let result = compress_to_budget(&img, &CompressOptions::new(100_000)).unwrap();

    assert_fits_budget(&result, 100_000);
    let best = result.best.expect("feasible result carries its record");
    assert!(best.quality > 0);
}

#[test]
fn tiny_budget_is_infeasible_not_an_error() {
    let img = create_solid_image(512, 512, [255, 255, 255]);
    let result = compress_to_budget(&img, &CompressOptions::new(10)).unwrap();

    assert_eq!(result.outcome, Outcome::Infeasible);
    assert!(result.data.is_empty());
    assert!(result.best.is_none());
}

#[test]
fn small_image_fits_small_budget() {
    let img = create_solid_image(50, 50, [255, 255, 255]);
    let result = compress_to_budget(&img, &CompressOptions::new(5000)).unwrap();
    assert_fits_budget(&result, 5000);
}

#[test]
fn orientation_does_not_matter() {
    let portrait = create_solid_image(300, 600, [255, 255, 255]);
    let landscape = create_solid_image(600, 300, [255, 255, 255]);

    let a = compress_to_budget(&portrait, &CompressOptions::new(5000)).unwrap();
    let b = compress_to_budget(&landscape, &CompressOptions::new(5000)).unwrap();

    assert_fits_budget(&a, 5000);
    assert_fits_budget(&b, 5000);
}

#[test]
fn first_probe_exact_budget_short_circuits() {
    // Reproduce the first probe by hand: the default bounds midpoints are
    // quality 50 and scale 0.55.
    let img = create_solid_image(512, 512, [255, 255, 255]);
    let buffer = imgfit::normalize::normalize(&img, ColorFormat::Rgb);
    let mut probe = ImageProbe::new(EncodeFormat::Jpeg);
    let first = probe.resample(&buffer, 0.55).unwrap();
    let first_bytes = probe.encode(&first, 50).unwrap();

    let mut probes = 0usize;
    let result = compress_with_observer(
        &img,
        &CompressOptions::new(first_bytes.len()),
        &mut |_q: u8, _s: f64, _n: usize| probes += 1,
    )
    .unwrap();

    assert_eq!(result.outcome, Outcome::Exact);
    assert_eq!(probes, 1);
    assert_eq!(result.data, first_bytes);
}

#[test]
fn probe_count_stays_logarithmic() {
    let img = create_gradient_image(256, 256);
    for budget in [10, 2000, 20_000, 500_000] {
        let mut probes = 0usize;
        compress_with_observer(
            &img,
            &CompressOptions::new(budget),
            &mut |_q: u8, _s: f64, _n: usize| probes += 1,
        )
        .unwrap();
        assert!(probes <= 8, "budget {} took {} probes", budget, probes);
    }
}

#[test]
fn compression_is_deterministic() {
    let img = create_gradient_image(200, 150);
    let options = CompressOptions::new(8000);
    let a = compress_to_budget(&img, &options).unwrap();
    let b = compress_to_budget(&img, &options).unwrap();

    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.data, b.data);
}

#[test]
fn relaxing_the_budget_never_shrinks_the_artifact() {
    let img = create_gradient_image(256, 256);
    let tight = compress_to_budget(&img, &CompressOptions::new(2000)).unwrap();
    let loose = compress_to_budget(&img, &CompressOptions::new(20_000)).unwrap();

    assert_fits_budget(&tight, 2000);
    assert_fits_budget(&loose, 20_000);
    assert!(loose.data.len() >= tight.data.len());
}

#[test]
fn infeasible_can_keep_the_smallest_artifact() {
    let img = create_solid_image(64, 64, [255, 255, 255]);
    let mut options = CompressOptions::new(10);
    options.on_infeasible = InfeasiblePolicy::ReturnSmallest;
    let result = compress_to_budget(&img, &options).unwrap();

    assert_eq!(result.outcome, Outcome::Infeasible);
    assert!(result.best.is_none());
    // The payload is the closest artifact found, still over budget.
    assert!(result.data.len() > 10);
    assert_eq!(&result.data[..2], &[0xFF, 0xD8]);
}

#[test]
fn gray_and_binary_formats_compress_end_to_end() {
    let img = create_gradient_image(128, 128);

    let mut options = CompressOptions::new(5000);
    options.color = ColorFormat::Gray;
    let gray = compress_to_budget(&img, &options).unwrap();
    assert_fits_budget(&gray, 5000);

    options.color = ColorFormat::Binary;
    let binary = compress_to_budget(&img, &options).unwrap();
    assert_fits_budget(&binary, 5000);
}

#[test]
fn observer_reports_every_probe() {
    let img = create_solid_image(128, 128, [200, 120, 40]);
    let mut seen: Vec<(u8, f64, usize)> = Vec::new();
    let result = compress_with_observer(
        &img,
        &CompressOptions::new(4000),
        &mut |q: u8, s: f64, n: usize| seen.push((q, s, n)),
    )
    .unwrap();

    assert!(!seen.is_empty());
    assert_eq!(seen[0].0, 50);
    assert!((seen[0].1 - 0.55).abs() < 1e-9);
    assert!(seen.iter().all(|&(_, s, n)| s > 0.0 && n > 0));
    // Feasible outcomes agree with what the observer saw.
    if let Some(best) = result.best {
        assert!(seen.iter().any(|&(q, _, n)| q == best.quality && n == best.size));
    }
}
