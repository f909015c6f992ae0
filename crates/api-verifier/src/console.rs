//! Step-by-step console diagnostics.
//!
//! The checks narrate themselves on stdout (`[1] Saving file ...`,
//! `✅ Save successful.`). Writes go through a generic sink so tests can
//! capture the narration.

use std::io::{self, Write};

use crate::error::VerifyError;

pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        // A closed stdout has nowhere to report to.
        let _ = writeln!(self.out, "{}", text.as_ref());
    }

    /// Numbered step header, preceded by a blank line.
    pub fn step(&mut self, number: u32, text: impl AsRef<str>) {
        self.line(format!("\n[{number}] {}", text.as_ref()));
    }

    pub fn detail(&mut self, text: impl AsRef<str>) {
        self.line(format!("   {}", text.as_ref()));
    }

    pub fn pass(&mut self, text: impl AsRef<str>) {
        self.line(format!("✅ {}", text.as_ref()));
    }

    pub fn fail(&mut self, text: impl AsRef<str>) {
        self.line(format!("❌ {}", text.as_ref()));
    }

    pub fn warn(&mut self, text: impl AsRef<str>) {
        self.line(format!("⚠️ {}", text.as_ref()));
    }

    /// Terminal diagnostic for a failed check.
    pub fn failure(&mut self, err: &VerifyError) {
        self.fail(err.to_string());
        if let VerifyError::NotListed { listing, .. } = err {
            self.line(format!("Listing: {listing}"));
        }
    }

    pub fn done(&mut self, text: impl AsRef<str>) {
        self.line(format!("\n🎉 {}", text.as_ref()));
    }
}

impl Console<Vec<u8>> {
    /// Captured output, for tests.
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}
