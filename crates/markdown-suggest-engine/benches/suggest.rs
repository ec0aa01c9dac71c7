use criterion::{Criterion, criterion_group, criterion_main};
use markdown_suggest_engine::editing::{
    Document, EditProposal, RangeIndex, Resolution, SuggestionSession, TextChange, filter_edit,
    resolve_all,
};
mod common;

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    group.sample_size(10);

    let content = common::generate_marked_up_content(500);
    let index = RangeIndex::new(&content);
    let session = SuggestionSession::new(Some("bench".into())).enabled(true);
    let mid = content.len() / 2;
    let at = (mid..content.len()).find(|&i| content.is_char_boundary(i)).unwrap_or(mid);

    group.bench_function("filter_insertion", |b| {
        let proposal = EditProposal::input(TextChange::insert(at, "x"));
        b.iter(|| std::hint::black_box(filter_edit(&content, &index, &proposal, &session, 0)));
    });

    group.bench_function("filter_deletion", |b| {
        let proposal = EditProposal::input(TextChange::delete(0, at));
        b.iter(|| std::hint::black_box(filter_edit(&content, &index, &proposal, &session, 0)));
    });

    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    group.sample_size(10);

    let content = common::generate_marked_up_content(100);
    group.bench_function("type_50_chars", |b| {
        b.iter(|| {
            let mut doc = Document::from_text(&content);
            doc.set_suggestion_mode(true);
            for _ in 0..50 {
                let at = doc.selection().start;
                let _ = doc.propose_at(EditProposal::input(TextChange::insert(at, "a")), 0);
            }
            std::hint::black_box(doc.len());
        });
    });

    group.bench_function("resolve_all", |b| {
        b.iter(|| std::hint::black_box(resolve_all(&content, Resolution::Accept)));
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_typing);
criterion_main!(benches);
