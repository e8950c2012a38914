use anyhow::Result;
use quickreply::clipboard::{ClipboardProvider, NullClipboard, copy_with_provider, open_clipboard};

/// Tests that actually access clipboard are disabled in automated testing
/// Set ENABLE_CLIPBOARD_TESTS=1 to run these tests locally.
fn should_test_clipboard() -> bool {
    std::env::var("ENABLE_CLIPBOARD_TESTS").is_ok()
}

/// Provider that keeps every copy
#[derive(Default)]
struct RecordingClipboard {
    copies: Vec<String>,
}

impl ClipboardProvider for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.copies.push(text.to_string());
        Ok(())
    }
}

#[test]
fn test_clipboard_integration_system() {
    if !should_test_clipboard() {
        eprintln!("Skipping clipboard access test (set ENABLE_CLIPBOARD_TESTS=1 to run)");
        return;
    }

    let mut clipboard = open_clipboard();
    let result = copy_with_provider("Integration test: quick response", clipboard.as_mut());

    if let Err(e) = result {
        // Expected in headless environments
        let err_msg = e.to_string().to_lowercase();
        assert!(
            err_msg.contains("clipboard") || err_msg.contains("display"),
            "Unexpected error type: {}",
            e
        );
    }
}

#[test]
fn test_clipboard_special_characters_pass_through() {
    let mut clipboard = RecordingClipboard::default();
    let texts = [
        "Olá! Em que posso ajudar?",
        "Linha 1\nLinha 2\r\nLinha 3",
        "Emoji 🎉 e CJK 你好",
        "Aspas \"duplas\" e 'simples'",
    ];

    for text in texts {
        copy_with_provider(text, &mut clipboard).unwrap();
    }

    assert_eq!(clipboard.copies, texts);
}

#[test]
fn test_clipboard_boundary_size() {
    let mut clipboard = RecordingClipboard::default();
    let max = 10 * 1024 * 1024;

    assert!(copy_with_provider(&"a".repeat(max), &mut clipboard).is_ok());
    assert!(copy_with_provider(&"a".repeat(max + 1), &mut clipboard).is_err());
    assert_eq!(clipboard.copies.len(), 1);
}

#[test]
fn test_null_clipboard_is_never_fatal_to_callers() {
    let mut clipboard = NullClipboard;

    assert!(!clipboard.is_available());
    let err = copy_with_provider("texto", &mut clipboard).unwrap_err();
    assert!(err.to_string().contains("unavailable"));
}
