use page_lexicon::{Analyzer, StopWords};

const PAGE: &str = r##"<html>
<head>
    <title>Guide du jardin</title>
    <meta name="description" content="Conseils pour un potager.">
</head>
<body>
    <nav><a href="/nav-only">Menu</a></nav>
    <h1>Le potager</h1>
    <a href="#semis">Semis</a>
    <a href="#recolte">Récolte</a>
    <h2 id="semis">Semis de printemps</h2>
    <p>Semer les tomates en <a href="/tomates">mars</a>.</p>
    <h2 id="recolte">Récolte</h2>
    <h3>Conservation</h3>
    <p>Voir aussi <a href="conserves.html">les conserves</a>,
    <a href="https://jardin.example.com/outils">les outils</a> et
    <a href="https://ailleurs.example.org/">un autre site</a>.</p>
    <footer><a href="/mentions">Mentions</a></footer>
</body>
</html>"##;

fn analyzer() -> Analyzer {
    Analyzer::with_defaults(StopWords::empty())
}

#[test]
fn title_description_and_headings() {
    let record = analyzer().analyze("jardin", PAGE, None);

    assert_eq!(record.title(), "Guide du jardin");
    assert_eq!(record.meta_description(), "Conseils pour un potager.");
    assert_eq!(record.headings().h1, ["Le potager"]);
    assert_eq!(record.headings().h2, ["Semis de printemps", "Récolte"]);
    assert_eq!(record.headings().h3, ["Conservation"]);
}

#[test]
fn fragment_links_are_anchors_not_links() {
    let record = analyzer().analyze("jardin", PAGE, Some("https://jardin.example.com/guide/"));

    assert_eq!(record.internal_anchors(), ["Semis", "Récolte"]);
    assert!(record.internal_links().iter().all(|link| !link.contains('#')));
}

#[test]
fn links_resolved_against_base_url() {
    let record = analyzer().analyze("jardin", PAGE, Some("https://jardin.example.com/guide/"));

    // nav and footer are removed before extraction
    assert_eq!(
        record.internal_links(),
        [
            "https://jardin.example.com/guide/conserves.html",
            "https://jardin.example.com/outils",
            "https://jardin.example.com/tomates",
        ]
    );
}

#[test]
fn links_without_base_keep_root_relative_paths() {
    let record = analyzer().analyze("jardin", PAGE, None);
    assert_eq!(record.internal_links(), ["/tomates"]);
}

#[test]
fn missing_structure_yields_empty_fields() {
    let record = analyzer().analyze("bare", "<p>texte seul</p>", None);

    assert_eq!(record.title(), "");
    assert_eq!(record.meta_description(), "");
    assert!(record.headings().h1.is_empty());
    assert!(record.internal_anchors().is_empty());
    assert!(record.internal_links().is_empty());
}

#[test]
fn anchor_only_document() {
    let record = analyzer().analyze("a", r##"<a href="#section1">Section</a>"##, None);
    assert_eq!(record.internal_anchors(), ["Section"]);
    assert!(record.internal_links().is_empty());
}

#[test]
fn navigation_table_of_contents_supplies_anchors() {
    let html = r##"<html><body>
        <nav><a href="#intro">Introduction</a> <a href="#usage">Usage</a> <a href="/sommaire">Sommaire</a></nav>
        <h2 id="intro">Introduction</h2><p>Premier paragraphe.</p>
        <h2 id="usage">Usage</h2><p>Second paragraphe.</p>
        <footer><h3>Contact</h3><a href="#haut">Haut de page</a></footer>
    </body></html>"##;
    let record = analyzer().analyze("toc", html, None);

    assert_eq!(record.internal_anchors(), ["Introduction", "Usage", "Haut de page"]);
    assert_eq!(record.headings().h3, ["Contact"]);
    // links and text still come from the tree without page chrome
    assert!(record.internal_links().is_empty());
    assert!(!record.combined().contains("sommaire"));
}
