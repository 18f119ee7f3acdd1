use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use tango::engine::sampler::{dedup_excluding, sample_n};
use tango::session::quiz::QuizState;
use tango::session::{Direction, SessionConfig};
use tango::words::WordEntry;

fn make_words(count: usize) -> Vec<WordEntry> {
    (0..count)
        .map(|i| WordEntry::new(&format!("語{i}"), &format!("ご{i}"), &format!("단어{i}")))
        .collect()
}

fn bench_sampling(c: &mut Criterion) {
    let words = make_words(2000);
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("sample_n (10 of 2000 words)", |b| {
        b.iter(|| sample_n(black_box(&words), 10, &mut rng))
    });

    c.bench_function("dedup_excluding (2000 words)", |b| {
        b.iter(|| dedup_excluding(black_box(&words), &words[0], |w| w.target_text.clone()))
    });
}

fn bench_question(c: &mut Criterion) {
    let words = make_words(200);
    let mut rng = SmallRng::seed_from_u64(2);
    let config = SessionConfig::quiz(Direction::SourceToTarget, "bench", "bench");
    let (state, _) = QuizState::start(&words, config, &mut rng).expect("valid quiz config");

    c.bench_function("build_question", |b| {
        b.iter(|| state.build_question(black_box(&mut rng)))
    });

    c.bench_function("full quiz (10 questions)", |b| {
        b.iter(|| {
            let config = SessionConfig::quiz(Direction::TargetToSource, "bench", "bench");
            let (mut state, mut step) =
                QuizState::start(black_box(&words), config, &mut rng).expect("valid quiz config");
            while let tango::session::quiz::QuizStep::Question(q) = step {
                let (answered, _) = state.submit_answer(&q.options[0], &q.correct_answer);
                (state, step) = answered.advance(&mut rng);
            }
            state
        })
    });
}

criterion_group!(benches, bench_sampling, bench_question);
criterion_main!(benches);
