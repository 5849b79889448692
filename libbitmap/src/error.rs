use std::{fmt, io};

/// Error type for bitmap encoding.
#[derive(Debug, thiserror::Error)]
pub enum BitmapError {
    /// The image can't be represented as a bitmap, nothing was written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing to the sink failed or came up short. Bytes written before the failure stay written.
    #[error("couldn't write {section}")]
    Io {
        section: Section,
        #[source]
        source: io::Error,
    },
}

/// Result type for bitmap encoding.
pub type BitmapResult<T> = Result<T, BitmapError>;

impl BitmapError {
    pub(crate) fn io(section: Section) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { section, source }
    }
}

/// The part of the output that was being produced when an IO error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Create,
    FileHeader,
    InfoHeader,
    Palette,
    PixelData,
    Flush,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Create => "the output file",
            Section::FileHeader => "the bitmap file header",
            Section::InfoHeader => "the bitmap information header",
            Section::Palette => "the color palette",
            Section::PixelData => "the pixel data",
            Section::Flush => "buffered output",
        };

        f.write_str(name)
    }
}
