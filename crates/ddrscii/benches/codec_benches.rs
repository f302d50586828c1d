use criterion::{Criterion, criterion_group, criterion_main};
use erika_ddrscii::{ErrorPolicy, decode, encode};

const LETTER: &str = "Sehr geehrte Damen und Herren, anbei erhalten Sie die Unterlagen.\n";
const ACCENTED: &str = "Ça côûte très cher à Noël, où êtes-vous? Ǹǘḿ!\n";

fn benchmark_encode(c: &mut Criterion) {
    c.bench_function("encode ascii letter", |b| {
        b.iter(|| std::hint::black_box(encode(LETTER, ErrorPolicy::Strict).ok()));
    });

    c.bench_function("encode accented line", |b| {
        b.iter(|| std::hint::black_box(encode(ACCENTED, ErrorPolicy::Ignore).ok()));
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let bytes = encode(LETTER, ErrorPolicy::Strict)
        .map(|(bytes, _)| bytes)
        .unwrap_or_default();

    c.bench_function("decode ascii letter", |b| {
        b.iter(|| std::hint::black_box(decode(&bytes, ErrorPolicy::Strict).ok()));
    });
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
