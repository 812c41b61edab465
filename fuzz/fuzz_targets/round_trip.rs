#![no_main]

use libfuzzer_sys::fuzz_target;

use ganbaru::parse::parse_text;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let parse = parse_text(&text);

    assert_eq!(parse.root.to_string(), text);
    assert_eq!(parse.root.full_len(), text.len());
    assert!(parse
        .errors
        .windows(2)
        .all(|pair| pair[0].span.start.byte <= pair[1].span.start.byte));
});
