//! Keyboard key definitions.
//!
//! WebDriver `send_keys` encodes special keys as private-use code points
//! (`U+E000` block). [`Key`] names the ones the wait layer sends.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_waits::Key;
//!
//! element.send_keys(Key::Return.as_str()).await?;
//!
//! let mut keys = String::from("query");
//! keys.push(Key::Enter.code_point());
//! element.send_keys(&keys).await?;
//! ```

// ============================================================================
// Key Enum
// ============================================================================

/// Special keyboard keys for `send_keys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // ========================================================================
    // Navigation & Control
    // ========================================================================
    /// Return key (what `press_keys` sends for a trailing newline)
    Return,
    /// Enter key (numeric keypad)
    Enter,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Space bar
    Space,

    // ========================================================================
    // Arrow Keys
    // ========================================================================
    /// Arrow Up
    ArrowUp,
    /// Arrow Down
    ArrowDown,
    /// Arrow Left
    ArrowLeft,
    /// Arrow Right
    ArrowRight,

    // ========================================================================
    // Page Navigation
    // ========================================================================
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
}

impl Key {
    /// Returns the key properties: (W3C code point, DOM key name).
    #[must_use]
    pub fn properties(self) -> (char, &'static str) {
        match self {
            Key::Return => ('\u{E006}', "Enter"),
            Key::Enter => ('\u{E007}', "Enter"),
            Key::Tab => ('\u{E004}', "Tab"),
            Key::Escape => ('\u{E00C}', "Escape"),
            Key::Backspace => ('\u{E003}', "Backspace"),
            Key::Delete => ('\u{E017}', "Delete"),
            Key::Space => ('\u{E00D}', " "),
            Key::ArrowUp => ('\u{E013}', "ArrowUp"),
            Key::ArrowDown => ('\u{E015}', "ArrowDown"),
            Key::ArrowLeft => ('\u{E012}', "ArrowLeft"),
            Key::ArrowRight => ('\u{E014}', "ArrowRight"),
            Key::Home => ('\u{E011}', "Home"),
            Key::End => ('\u{E010}', "End"),
            Key::PageUp => ('\u{E00E}', "PageUp"),
            Key::PageDown => ('\u{E00F}', "PageDown"),
        }
    }

    /// Returns the code point sent through `send_keys`.
    #[inline]
    #[must_use]
    pub fn code_point(self) -> char {
        self.properties().0
    }

    /// Returns the DOM `KeyboardEvent.key` name.
    #[inline]
    #[must_use]
    pub fn key(self) -> &'static str {
        self.properties().1
    }

    /// Returns the code point as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Key::Return => "\u{E006}",
            Key::Enter => "\u{E007}",
            Key::Tab => "\u{E004}",
            Key::Escape => "\u{E00C}",
            Key::Backspace => "\u{E003}",
            Key::Delete => "\u{E017}",
            Key::Space => "\u{E00D}",
            Key::ArrowUp => "\u{E013}",
            Key::ArrowDown => "\u{E015}",
            Key::ArrowLeft => "\u{E012}",
            Key::ArrowRight => "\u{E014}",
            Key::Home => "\u{E011}",
            Key::End => "\u{E010}",
            Key::PageUp => "\u{E00E}",
            Key::PageDown => "\u{E00F}",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
