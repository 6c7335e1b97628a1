#![no_main]

use libfuzzer_sys::fuzz_target;
use yaml_splice::{Editor, Path};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 100_000 {
        return;
    }

    // Parsing must never panic, and a clean parse must round-trip.
    let Ok(mut editor) = Editor::new(text) else {
        return;
    };
    assert_eq!(editor.to_string(), text);

    // A few canned edits; each either succeeds (and the result re-parses,
    // checked internally) or fails leaving the text untouched.
    let before = editor.to_string();
    if editor.update(["fuzz"], "value").is_err() {
        assert_eq!(editor.to_string(), before);
    }
    let before = editor.to_string();
    if editor.append_to(Path::root(), 1).is_err() {
        assert_eq!(editor.to_string(), before);
    }
    let before = editor.to_string();
    if editor.remove([0usize]).is_err() {
        assert_eq!(editor.to_string(), before);
    }
});
