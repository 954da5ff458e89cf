use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cael_kepler::{KeplerConfig, KeplerOracle};
use cael_search::{
    AngleOracle, AspectConfig, Body, BodySpec, SearchConfig, SearchDirection, calendar_to_jd,
    find_angular_aspects, find_elapsed_degree_timestamps, find_station_points,
};

fn oracle() -> KeplerOracle {
    KeplerOracle::new(KeplerConfig::default()).expect("default config")
}

fn sample_bench(c: &mut Criterion) {
    let oracle = oracle();
    let jd = calendar_to_jd(2024, 3, 20.5);
    let moon = BodySpec::geocentric(Body::Moon);
    let mars = BodySpec::geocentric(Body::Mars);

    let mut group = c.benchmark_group("kepler_sample");
    group.bench_function("moon", |b| {
        b.iter(|| oracle.sample(black_box(&moon), black_box(jd)).expect("sample"))
    });
    group.bench_function("mars", |b| {
        b.iter(|| oracle.sample(black_box(&mars), black_box(jd)).expect("sample"))
    });
    group.finish();
}

fn aspect_bench(c: &mut Criterion) {
    let oracle = oracle();
    let start = calendar_to_jd(2024, 1, 1.0);
    let moon = BodySpec::geocentric(Body::Moon);
    let sun = BodySpec::geocentric(Body::Sun);
    let aspect = AspectConfig::aspect(90.0);

    let mut group = c.benchmark_group("search_aspects");
    group.sample_size(20);
    for (name, config) in [
        ("moon_sun_quarters_1y_precise", SearchConfig::precise()),
        ("moon_sun_quarters_1y_survey", SearchConfig::survey()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                find_angular_aspects(
                    black_box(&oracle),
                    moon,
                    sun,
                    black_box(&aspect),
                    start,
                    start + 365.25,
                    &config,
                )
                .expect("search should succeed")
            })
        });
    }
    group.finish();
}

fn station_bench(c: &mut Criterion) {
    let oracle = oracle();
    let start = calendar_to_jd(2024, 1, 1.0);
    let mercury = BodySpec::geocentric(Body::Mercury);
    let config = SearchConfig::precise();

    let mut group = c.benchmark_group("search_stations");
    group.sample_size(20);
    group.bench_function("mercury_1y", |b| {
        b.iter(|| {
            find_station_points(black_box(&oracle), mercury, start, start + 365.25, &config)
                .expect("search should succeed")
        })
    });
    group.finish();
}

fn elapsed_bench(c: &mut Criterion) {
    let oracle = oracle();
    let epoch = calendar_to_jd(2024, 9, 1.0);
    let mars = BodySpec::geocentric(Body::Mars);
    let config = SearchConfig::precise();

    let mut group = c.benchmark_group("search_elapsed");
    group.sample_size(10);
    group.bench_function("mars_30deg", |b| {
        b.iter(|| {
            find_elapsed_degree_timestamps(
                black_box(&oracle),
                mars,
                epoch,
                black_box(30.0),
                SearchDirection::Forward,
                &config,
            )
            .expect("search should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, sample_bench, aspect_bench, station_bench, elapsed_bench);
criterion_main!(benches);
