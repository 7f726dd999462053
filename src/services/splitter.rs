//! Text splitting for building retrieval nodes
//!
//! Documents are split into overlapping chunks snapped to whitespace word
//! boundaries. Offsets are character positions within the source document.

use crate::error::{DocuChatError, Result};
use crate::models::{Document, Node};

pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        // Defaults are validated, construction cannot fail
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP).unwrap()
    }
}

impl TextSplitter {
    /// Create a splitter. The overlap must be strictly smaller than the
    /// chunk size or splitting could never advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DocuChatError::validation(
                "chunk_size",
                "must be greater than zero",
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(DocuChatError::validation(
                "chunk_overlap",
                "must be smaller than chunk_size",
            ));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split a document into retrieval nodes.
    pub fn split_document(&self, document: &Document) -> Vec<Node> {
        let chars: Vec<char> = document.text.chars().collect();

        self.split_spans(&chars)
            .into_iter()
            .map(|(start, end)| {
                let text: String = chars[start..end].iter().collect();
                Node::new(
                    document.id,
                    document.file_name.clone(),
                    text,
                    start,
                    end,
                )
            })
            .collect()
    }

    /// Split many documents, preserving document order.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Node> {
        documents
            .iter()
            .flat_map(|document| self.split_document(document))
            .collect()
    }

    /// Compute chunk spans as half-open character ranges.
    ///
    /// Whitespace-only spans are dropped. Every non-whitespace character of
    /// the input is covered by at least one span.
    fn split_spans(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let total = chars.len();
        let mut spans = Vec::new();
        let mut start = 0usize;

        while start < total {
            let mut end = (start + self.chunk_size).min(total);

            if end < total {
                // Backtrack to the last whitespace inside the window so words
                // are not cut; a window with no whitespace is cut hard.
                if let Some(ws) = (start..end).rev().find(|&i| chars[i].is_whitespace()) {
                    if ws > start {
                        end = ws + 1;
                    }
                }
            }

            if chars[start..end].iter().any(|c| !c.is_whitespace()) {
                spans.push((start, end));
            }

            if end >= total {
                break;
            }

            // Step back by the overlap, then snap forward to a word start
            let mut next = end.saturating_sub(self.chunk_overlap);
            while next < end && next > 0 && !chars[next - 1].is_whitespace() {
                next += 1;
            }
            if next <= start {
                next = end;
            }
            start = next;
        }

        spans
    }
}
