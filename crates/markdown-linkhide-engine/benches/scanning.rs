use criterion::{Criterion, criterion_group, criterion_main};
use markdown_linkhide_engine::{
    Selection,
    cursor::correct_head,
    ranges::{compute_hidden_ranges, scan_line},
};
use xi_rope::Rope;

fn link_heavy_line(links: usize) -> String {
    (0..links)
        .map(|i| {
            if i % 2 == 0 {
                format!("see [[Note {i}|alias {i}]] and ")
            } else {
                format!("[text {i}](notes/{i}.md) then ")
            }
        })
        .collect()
}

fn bench_scan_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanning");

    let line = link_heavy_line(50);
    group.bench_function("scan_line_50_links", |b| {
        b.iter(|| scan_line(std::hint::black_box(&line), 0));
    });

    let doc = Rope::from(format!("{line}\n").repeat(1000).as_str());
    let selection = Selection::cursor(doc.len() / 2);
    group.bench_function("compute_hidden_ranges_1000_lines", |b| {
        b.iter(|| compute_hidden_ranges(std::hint::black_box(&doc), &selection));
    });

    group.finish();
}

fn bench_correction(c: &mut Criterion) {
    let line = link_heavy_line(50);
    let doc = Rope::from(line.as_str());
    let ranges = scan_line(&line, 0);
    let last = ranges.last().map_or(0, |r| r.from);

    c.bench_function("correct_head_last_range", |b| {
        b.iter(|| correct_head(std::hint::black_box(last), last.saturating_sub(1), &ranges, &doc, false));
    });
}

criterion_group!(benches, bench_scan_line, bench_correction);
criterion_main!(benches);
