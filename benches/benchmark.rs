//! Performance benchmarks for page-lexicon.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use page_lexicon::{clean_html, AggregateOptions, Aggregation, Analyzer, Options, RemovalPolicy, StopWords};

const SAMPLE_HTML: &str = r##"
<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <title>Le chat noir</title>
    <meta name="description" content="Un article sur les chats noirs.">
    <style>body { color: black; }</style>
    <script>var tracking = 1;</script>
</head>
<body>
    <nav><a href="/">Accueil</a> <a href="/chats">Chats</a></nav>
    <article>
        <h1>Le chat noir</h1>
        <a href="#origines">Origines</a>
        <h2 id="origines">Origines du chat noir</h2>
        <p style="margin: 0" onclick="track()">Le chat noir est un animal domestique très apprécié
        dans les campagnes françaises. Le chat noir chasse les souris la nuit.</p>
        <p>Les superstitions autour du chat noir sont nombreuses et varient selon les régions
        et les époques. <a href="/superstitions">Lire la suite</a></p>
        <div></div>
        <h3>Alimentation</h3>
        <p>Le chat noir mange du poisson, de la viande et parfois des croquettes achetées
        au marché du village.</p>
    </article>
    <footer><p>Copyright 2024</p></footer>
</body>
</html>
"##;

fn analyzer() -> Analyzer {
    Analyzer::with_defaults(StopWords::french())
}

fn bench_clean_markup(c: &mut Criterion) {
    let policy = RemovalPolicy::markup().with_css_capture(true);
    c.bench_function("clean_markup", |b| {
        b.iter(|| clean_html(black_box(SAMPLE_HTML), &policy));
    });
}

fn bench_analyze_default(c: &mut Criterion) {
    let analyzer = analyzer();
    c.bench_function("analyze_default", |b| {
        b.iter(|| analyzer.analyze("sample", black_box(SAMPLE_HTML), Some("https://example.com/")));
    });
}

fn bench_ngram_orders(c: &mut Criterion) {
    let text = SAMPLE_HTML.repeat(20);
    let mut group = c.benchmark_group("ngram_orders");
    group.throughput(Throughput::Bytes(text.len() as u64));

    for n_max in [1, 3, 5] {
        let options = Options {
            n_max,
            ..Options::default()
        };
        let Ok(analyzer) = Analyzer::new(options, StopWords::french()) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n_max), &text, |b, html| {
            b.iter(|| analyzer.analyze("sample", black_box(html), None));
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let analyzer = analyzer();
    let records: Vec<_> = (0..50)
        .map(|i| analyzer.analyze(&format!("page-{i}"), SAMPLE_HTML, None))
        .collect();
    let options = AggregateOptions::default();

    c.bench_function("aggregate_50", |b| {
        b.iter(|| Aggregation::from_records(black_box(&records), &options));
    });
}

criterion_group!(
    benches,
    bench_clean_markup,
    bench_analyze_default,
    bench_ngram_orders,
    bench_aggregate
);
criterion_main!(benches);
