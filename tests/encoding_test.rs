use page_lexicon::analyze_bytes;

#[test]
fn utf8_content_handled_correctly() {
    let html = "<html><head><meta charset=\"utf-8\"></head><body><p>Crème brûlée à l'érable</p></body></html>";
    let record = analyze_bytes(html.as_bytes()).expect("text input");

    assert!(record.combined().contains("crème"));
    assert!(record.combined().contains("brûlée"));
    assert!(record.excerpt().contains("l'érable"));
}

#[test]
fn iso88591_converted_to_utf8() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><h1>Caf\xE9 cr\xE8me</h1></body></html>";
    let record = analyze_bytes(html).expect("text input");

    assert_eq!(record.headings().h1, ["Café crème"]);
    assert!(record.combined().contains("café crème"));
}

#[test]
fn http_equiv_charset_is_honoured() {
    let html = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><title>D\xE9j\xE0 vu</title>";
    let record = analyze_bytes(html).expect("text input");
    assert_eq!(record.title(), "Déjà vu");
}

#[test]
fn utf16_with_bom_is_decoded() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "<title>Été</title><p>soleil</p>".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let record = analyze_bytes(&bytes).expect("utf-16 is text");
    assert_eq!(record.title(), "Été");
    assert!(record.combined().contains("soleil"));
}
