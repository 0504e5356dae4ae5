use backseat::{assemble_to_bytes, decode_all, Emulator, Lexer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const HELLO_WORLD: &str = include_str!("../demos/hello_world.asm");

/// Fills every cell of the screen, one word at a time
fn fill_screen_program() -> String {
    let mut source = String::new();
    for address in (0..1920).step_by(4) {
        source.push_str(&format!("copy {}, A\ncopy 0x2E2E2E2E, *A\n", address));
    }
    source.push_str("halt\n");
    source
}

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize hello world", |b| {
        b.iter(|| {
            Lexer::new("hello_world.asm", black_box(HELLO_WORLD))
                .tokenize()
                .unwrap()
        })
    });
}

fn assembler_benchmark(c: &mut Criterion) {
    let source = fill_screen_program();

    c.bench_function("assemble fill screen", |b| {
        b.iter(|| assemble_to_bytes("fill.asm", black_box(&source)).unwrap())
    });

    let image = assemble_to_bytes("fill.asm", &source).unwrap();
    c.bench_function("decode fill screen", |b| {
        b.iter(|| decode_all(black_box(&image)).unwrap())
    });
}

fn emulator_benchmark(c: &mut Criterion) {
    let hello = assemble_to_bytes("hello_world.asm", HELLO_WORLD).unwrap();
    c.bench_function("run hello world", |b| {
        b.iter(|| {
            let mut emulator = Emulator::new(black_box(&hello));
            emulator.run().unwrap()
        })
    });

    let fill = assemble_to_bytes("fill.asm", &fill_screen_program()).unwrap();
    c.bench_function("run fill screen", |b| {
        b.iter(|| {
            let mut emulator = Emulator::new(black_box(&fill));
            emulator.run().unwrap();
            emulator.text_device().printable_text()
        })
    });
}

criterion_group!(
    benches,
    lexer_benchmark,
    assembler_benchmark,
    emulator_benchmark
);
criterion_main!(benches);
