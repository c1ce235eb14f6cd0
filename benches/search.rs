use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordle_bot::{
    feedback, initial_guess, load_dictionary, prune, ExhaustiveSearch, Word,
};

fn bench_feedback(c: &mut Criterion) {
    let words = load_dictionary().unwrap();
    let guess = Word::new("alert").unwrap();
    c.bench_function("feedback_full_dictionary", |b| {
        b.iter(|| {
            for word in &words {
                black_box(feedback(word, &guess));
            }
        })
    });
}

fn bench_prune(c: &mut Criterion) {
    let words = load_dictionary().unwrap();
    let guess = Word::new("alert").unwrap();
    let pattern = feedback(&Word::new("crane").unwrap(), &guess);
    c.bench_function("prune_full_dictionary", |b| {
        b.iter(|| black_box(prune(&words, &guess, pattern)))
    });
}

fn bench_initial_guess(c: &mut Criterion) {
    let words = load_dictionary().unwrap();
    c.bench_function("initial_guess", |b| {
        b.iter(|| black_box(initial_guess(&words)))
    });
}

fn bench_select(c: &mut Criterion) {
    let words = load_dictionary().unwrap();
    let guess = Word::new("alert").unwrap();
    let candidates = prune(&words, &guess, feedback(&Word::new("fuzzy").unwrap(), &guess));

    let mut group = c.benchmark_group("select_guess");
    group.sample_size(10);
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(ExhaustiveSearch::new().select(&candidates, &words)))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            black_box(
                ExhaustiveSearch::new()
                    .parallel(true)
                    .select(&candidates, &words),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_feedback, bench_prune, bench_initial_guess, bench_select);
criterion_main!(benches);
