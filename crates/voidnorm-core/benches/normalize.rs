use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voidnorm_core::normalize;

fn source_file(functions: usize) -> String {
    let mut out = String::new();
    for i in 0..functions {
        match i % 4 {
            0 => out.push_str(&format!("void Sys_Init{}( void );\n", i)),
            1 => out.push_str(&format!("int Com_Count{}(VOID) {{ return {}; }}\n", i, i)),
            2 => out.push_str(&format!("static void R_Flush{}( ) {{ }}\n", i)),
            _ => out.push_str(&format!("float Vec_Len{}(const float *v, int n);\n", i)),
        }
    }
    out
}

fn bench_normalize(c: &mut Criterion) {
    let dirty = source_file(2_000);
    let clean = normalize(&dirty).text;

    c.bench_function("normalize_dirty_2000", |b| b.iter(|| normalize(black_box(&dirty))));
    c.bench_function("normalize_clean_2000", |b| b.iter(|| normalize(black_box(&clean))));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
