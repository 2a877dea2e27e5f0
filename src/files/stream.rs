//! Streaming file transfer.

use std::path::Path;

use bytes::BytesMut;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::mime;
use crate::http::response::StatusCode;
use crate::http::writer;

/// Chunk size for streaming reads.
const BUFFER_SIZE: usize = 64 * 1024;

/// An open file ready to be streamed as a response body.
///
/// The handle is opened before any response byte is written, so an open
/// failure can still produce a fresh error response. Once `send` has
/// written the head, the status is committed; a failure past that point
/// must abort the connection instead.
pub struct StreamedFile {
    file: File,
    len: u64,
    content_type: String,
}

impl StreamedFile {
    pub async fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        let content_type = mime::from_path(path);

        Ok(Self {
            file,
            len,
            content_type,
        })
    }

    /// Writes the 200 head, then copies the file in bounded chunks. The
    /// whole file is never held in memory.
    ///
    /// Consumes the handle, so it is released on every exit path,
    /// including a client abort partway through.
    pub async fn send<W: AsyncWrite + Unpin>(mut self, out: &mut W) -> anyhow::Result<()> {
        let content_length = self.len.to_string();
        let head = writer::serialize_head(
            StatusCode::Ok,
            &[
                ("Content-Type", self.content_type.as_str()),
                ("Content-Length", content_length.as_str()),
            ],
        );
        out.write_all(&head).await?;

        let mut buf = BytesMut::with_capacity(BUFFER_SIZE);
        loop {
            let n = self.file.read_buf(&mut buf).await?;
            if n == 0 {
                break;
            }

            out.write_all(&buf).await?;
            buf.clear();
        }

        out.flush().await?;

        Ok(())
    }
}
