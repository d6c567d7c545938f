use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use measure_core::{DisplayUnit, MeasurementConfig, MeasurementInput, to_display, to_model};
use std::time::{Duration, Instant};

const VALUES: i64 = 10_000;

fn bench_to_display(c: &mut Criterion) {
    c.bench_function("bench_to_display_cm", |b| {
        b.iter(|| {
            for mm in 0..VALUES {
                black_box(to_display(black_box(Some(mm)), DisplayUnit::Centimeters));
            }
        });
    });
    c.bench_function("bench_to_display_in", |b| {
        b.iter(|| {
            for mm in 0..VALUES {
                black_box(to_display(black_box(Some(mm)), DisplayUnit::Inches));
            }
        });
    });
}

fn bench_to_model(c: &mut Criterion) {
    let cm: Vec<_> = (0..VALUES)
        .map(|mm| to_display(Some(mm), DisplayUnit::Centimeters))
        .collect();
    let inches: Vec<_> = (0..VALUES)
        .map(|mm| to_display(Some(mm), DisplayUnit::Inches))
        .collect();

    c.bench_function("bench_to_model_cm", |b| {
        b.iter(|| {
            for text in &cm {
                let _ = black_box(to_model(&text.whole, &text.fraction, DisplayUnit::Centimeters));
            }
        });
    });
    c.bench_function("bench_to_model_in", |b| {
        b.iter(|| {
            for text in &inches {
                let _ = black_box(to_model(&text.whole, &text.fraction, DisplayUnit::Inches));
            }
        });
    });
}

fn bench_keystroke_burst(c: &mut Criterion) {
    let keystrokes = ["1", "12", "123", "123.", "123.4"];
    c.bench_function("bench_keystroke_burst_then_tick", |b| {
        b.iter_batched(
            || MeasurementInput::new(MeasurementConfig::new(DisplayUnit::Centimeters)),
            |mut input| {
                let t0 = Instant::now();
                let mut last = 0;
                for (i, raw) in keystrokes.iter().enumerate() {
                    let now = t0 + Duration::from_millis(50 * i as u64);
                    input.on_whole_change(raw, now, &mut |mm: i64| last = mm);
                }
                input.tick(t0 + Duration::from_secs(5), &mut |mm: i64| last = mm);
                black_box(last);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_to_display, bench_to_model, bench_keystroke_burst);
criterion_main!(benches);
