use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::NaiveDate;
use liga_dashboard::form::compute_form;
use liga_dashboard::model::Snapshot;
use liga_dashboard::payload::{parse_clubs_json, parse_dashboard_json};
use liga_dashboard::slides::{BuildOptions, DisplayProfile, build_slides};

const DASHBOARD_JSON: &str = include_str!("../tests/fixtures/dashboard.json");
const CLUBS_JSON: &str = include_str!("../tests/fixtures/clubs.json");

fn snapshot() -> Snapshot {
    Snapshot {
        dataset: parse_dashboard_json(DASHBOARD_JSON).expect("valid fixture json"),
        clubs: parse_clubs_json(CLUBS_JSON).expect("valid fixture json"),
        fetched_on: NaiveDate::from_ymd_opt(2025, 9, 21).expect("valid date"),
    }
}

fn bench_dashboard_parse(c: &mut Criterion) {
    c.bench_function("dashboard_parse", |b| {
        b.iter(|| {
            let data = parse_dashboard_json(black_box(DASHBOARD_JSON)).unwrap();
            black_box(data.all_matches.len());
        })
    });
}

fn bench_build_slides(c: &mut Criterion) {
    let snapshot = snapshot();
    let opts = BuildOptions {
        profile: DisplayProfile::desktop(),
        force_periods: true,
    };
    c.bench_function("build_slides_desktop", |b| {
        b.iter(|| {
            let slides = build_slides(black_box(&snapshot), black_box(&opts));
            black_box(slides.len());
        })
    });
}

fn bench_form(c: &mut Criterion) {
    let snapshot = snapshot();
    let matches = &snapshot.dataset.all_matches;
    c.bench_function("form_all_teams", |b| {
        b.iter(|| {
            for row in &snapshot.dataset.league_table {
                black_box(compute_form(black_box(&row.team), matches));
            }
        })
    });
}

criterion_group!(benches, bench_dashboard_parse, bench_build_slides, bench_form);
criterion_main!(benches);
