use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    InvalidSignature,
    Truncated,
    Layout,
    InvalidSlot,
    Catalog,
}

impl CoreErrorCode {
    /// True for failures caused by the save bytes themselves.
    pub fn is_save_format(self) -> bool {
        matches!(
            self,
            CoreErrorCode::InvalidSignature | CoreErrorCode::Truncated | CoreErrorCode::Layout
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn truncated(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Truncated, message)
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Catalog, message)
    }

    pub fn invalid_slot(index: usize, slot_count: usize) -> Self {
        Self::new(
            CoreErrorCode::InvalidSlot,
            format!(
                "invalid slot index {index}, expected 0-{}",
                slot_count.saturating_sub(1)
            ),
        )
    }

    /// Prefixes the message with the file it came from, keeping the code.
    pub fn in_file(self, path: &Path) -> Self {
        Self {
            code: self.code,
            message: format!("{}: {}", path.display(), self.message),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
