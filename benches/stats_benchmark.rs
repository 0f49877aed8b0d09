use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use skylog::models::{Airport, AppStats, Flight, GlobeData, Theme, UserSettings};
use std::hint::black_box;

fn airport(i: usize) -> Airport {
    // A few hundred distinct airports spread over ~100 countries
    let code = format!("A{:03}", i % 400);
    Airport {
        code: code.clone(),
        name: format!("{} Intl", code),
        city: code,
        country: format!("Country {}", i % 100),
        lat: (i % 180) as f64 - 90.0,
        lng: (i % 360) as f64 - 180.0,
    }
}

fn flight_log(len: usize) -> Vec<Flight> {
    let start = Utc.with_ymd_and_hms(2015, 1, 1, 8, 0, 0).unwrap();
    (0..len)
        .map(|i| Flight {
            id: format!("{:012x}", i),
            flight_number: format!("XX{}", i % 9000),
            airline: "Bench Air".to_string(),
            airline_iata: Some("XX".to_string()),
            origin: airport(i * 7),
            destination: airport(i * 13 + 1),
            date: start + Duration::hours(i as i64 * 31),
            duration_minutes: (45 + i % 900) as u32,
            distance_km: (300 + i % 14000) as f64,
        })
        .collect()
}

fn benchmark_stats(c: &mut Criterion) {
    let settings = UserSettings {
        birthday: NaiveDate::from_ymd_opt(1985, 3, 14),
        theme: Theme::Dark,
    };
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let mut group = c.benchmark_group("stats_compute");
    for len in [10, 1_000, 10_000] {
        let flights = flight_log(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &flights, |b, flights| {
            b.iter(|| AppStats::compute(black_box(flights), black_box(&settings), now))
        });
    }
    group.finish();

    let flights = flight_log(1_000);
    c.bench_function("globe_from_flights", |b| {
        b.iter(|| GlobeData::from_flights(black_box(&flights)))
    });
}

criterion_group!(benches, benchmark_stats);
criterion_main!(benches);
