use criterion::{black_box, criterion_group, criterion_main, Criterion};
use enigmatic_core::*;

fn machine(level: SecurityLevel) -> Machine {
    let alphabet = alphabets::by_name("ascii").unwrap();
    Machine::builder()
        .alphabet(alphabet.symbols())
        .unwrap()
        .random_settings(level, &mut SeededRandom::new(1))
        .unwrap()
        .build()
        .unwrap()
}

fn bench_encrypt(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(23); // ~1 KB

    for level in [SecurityLevel::Low, SecurityLevel::Extreme] {
        let mut m = machine(level);
        c.bench_function(&format!("encrypt_1kb_{level}"), |b| {
            b.iter(|| {
                m.reset();
                m.encrypt(black_box(&text))
            })
        });
    }
}

fn bench_settings(c: &mut Criterion) {
    let m = machine(SecurityLevel::High);
    let json = m.to_json().unwrap();

    c.bench_function("settings_to_json", |b| b.iter(|| black_box(&m).to_json()));
    c.bench_function("settings_from_json", |b| {
        b.iter(|| Machine::from_json(black_box(&json)))
    });
}

fn bench_random_settings(c: &mut Criterion) {
    let symbols: Vec<char> = alphabets::LATIN_UPPER.chars().collect();

    c.bench_function("random_settings_extreme", |b| {
        b.iter(|| {
            Machine::builder()
                .alphabet(black_box(&symbols))
                .and_then(|builder| {
                    builder.random_settings(SecurityLevel::Extreme, &mut SecureRandom)
                })
                .and_then(MachineBuilder::build)
        })
    });
}

fn bench_detect(c: &mut Criterion) {
    let text = "Съешь же ещё этих мягких французских булок, да выпей чаю. ".repeat(20);

    c.bench_function("detect_alphabet", |b| {
        b.iter(|| detect(black_box(&text), &DetectOptions::default()))
    });
}

criterion_group!(
    benches,
    bench_encrypt,
    bench_settings,
    bench_random_settings,
    bench_detect
);
criterion_main!(benches);
