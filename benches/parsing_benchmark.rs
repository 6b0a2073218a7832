use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write;
use std::fs;

use man_processor::models::Retrieval;
use man_processor::readers::RawFileReader;
use man_processor::schema::SchemaCatalogue;

fn synthetic_aod_file(rows: usize) -> String {
    let mut content = String::from(
        "Level 1.5 Maritime Aerosol Network (MAN) Measurements\n\
         BenchCruise,Version 3 direct sun algorithm\n\
         Public domain data notice\n\
         PI=Doe,Jane,Email=jdoe@example.org\n\
         Date(dd:mm:yyyy),Time(hh:mm:ss),Air Mass,Latitude,Longitude,AOD_340nm,AOD_500nm(int),AOD_870nm,440-870nm_Angstrom_Exponent,Last_Processing_Date(dd:mm:yyyy),AERONET_Number,Microtops_Number\n",
    );
    for i in 0..rows {
        let day = (i % 28) + 1;
        writeln!(
            content,
            "{day:02}:04:2019,12:{:02}:{:02},1.5,11.{},-42.{},0.21,0.083,0.051,0.61,05:05:2019,77,5410",
            i % 60,
            (i / 60) % 60,
            i % 100,
            i % 100
        )
        .unwrap();
    }
    content
}

fn bench_raw_file_parsing(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut group = c.benchmark_group("raw_file_parsing");

    for rows in [100usize, 1_000, 10_000] {
        let path = dir.path().join(format!("BenchCruise{rows}_all_points.lev15"));
        fs::write(&path, synthetic_aod_file(rows)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            let reader = RawFileReader::new();
            b.iter(|| {
                let parsed = reader.read(black_box(&path)).unwrap();
                black_box(parsed.rows.len())
            });
        });
    }
    group.finish();
}

fn bench_catalogue_lookup(c: &mut Criterion) {
    let catalogue = SchemaCatalogue::for_retrieval(Retrieval::Aod);
    let labels = [
        "Date(dd:mm:yyyy)",
        "AOD_500nm(int)",
        "STD_440-870nm_Angstrom_Exponent",
        "Unknown_Column",
    ];

    c.bench_function("catalogue_lookup", |b| {
        b.iter(|| {
            for label in &labels {
                black_box(catalogue.canonical_for(black_box(label)));
            }
        });
    });
}

criterion_group!(benches, bench_raw_file_parsing, bench_catalogue_lookup);
criterion_main!(benches);
