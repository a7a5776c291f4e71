//! Benchmarks for text processing utilities.
//!
//! These benchmarks measure regex performance for apply-link validation and
//! search-term highlighting, which run on every render of a scheme list.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex::{Regex, RegexBuilder};

const APPLY_LINK_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*\.[^\s]+$";
const SCHEME_NAME: &str = "Pradhan Mantri Kisan Samman Nidhi (PM-KISAN) income support for farmer families";

fn bench_apply_link_compile(c: &mut Criterion) {
    c.bench_function("regex_compile_apply_link_pattern", |b| {
        b.iter(|| Regex::new(black_box(APPLY_LINK_PATTERN)))
    });
}

fn bench_apply_link_match(c: &mut Criterion) {
    let re = Regex::new(APPLY_LINK_PATTERN).unwrap();

    c.bench_function("regex_match_apply_link", |b| {
        b.iter(|| re.is_match(black_box("https://pmkisan.gov.in/RegistrationFormNew.aspx")))
    });
}

fn bench_highlight_search_term(c: &mut Criterion) {
    c.bench_function("regex_highlight_search_term", |b| {
        b.iter(|| {
            let re = RegexBuilder::new(&regex::escape(black_box("kisan")))
                .case_insensitive(true)
                .build()
                .unwrap();
            re.find_iter(black_box(SCHEME_NAME)).count()
        })
    });
}

fn bench_string_contains_lowercase(c: &mut Criterion) {
    c.bench_function("string_contains_lowercase", |b| {
        b.iter(|| black_box(SCHEME_NAME).to_lowercase().contains("kisan"))
    });
}

criterion_group!(
    benches,
    bench_apply_link_compile,
    bench_apply_link_match,
    bench_highlight_search_term,
    bench_string_contains_lowercase
);
criterion_main!(benches);
