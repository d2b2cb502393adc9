//! Outbound message units - what a handler asks the platform to post

use std::fmt;
use std::path::PathBuf;

/// Embed thumbnail, taken from a file attached to the same message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    filename: String,
}

impl Thumbnail {
    pub fn attachment(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("attachment://{}", self.filename)
    }
}

/// Structured rich-content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub thumbnail: Option<Thumbnail>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Thumbnail) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }
}

/// Where a file to upload lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentSource {
    pub path: PathBuf,
    /// Name the file is uploaded under; embeds reference it as `attachment://<filename>`
    pub filename: String,
}

impl AttachmentSource {
    pub fn new(path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }

    /// Read the file now. Nothing is cached between calls.
    pub fn load(&self) -> std::io::Result<Attachment> {
        let data = std::fs::read(&self.path)?;
        Ok(Attachment {
            filename: self.filename.clone(),
            data,
        })
    }
}

/// File contents uploaded alongside a message
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn thumbnail(&self) -> Thumbnail {
        Thumbnail::attachment(self.filename.clone())
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// One message to post: text, an embed, or either combined with a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundMessage {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub attachment: Option<Attachment>,
}

impl OutboundMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embed: Some(embed),
            ..Self::default()
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}
