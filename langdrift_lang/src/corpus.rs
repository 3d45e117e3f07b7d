// A corpus: the ordered, immutable list of candidate sentences.
//
// Built from raw texts through `tokenize::sentences_from_text`, or from
// files with `from_paths`. Reading files is a convenience for the demo
// binary; the engine itself only ever sees an in-memory `Corpus`.

use crate::tokenize::{sentences_from_text, sentences_from_texts};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read corpus file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Candidate sentences in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    sentences: Vec<String>,
}

impl Corpus {
    /// Split raw texts into sentences, concatenating in order.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Corpus {
            sentences: sentences_from_texts(texts),
        }
    }

    /// Wrap sentences that are already split.
    pub fn from_sentences(sentences: Vec<String>) -> Self {
        Corpus { sentences }
    }

    /// Read and split text files, in the order given.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, CorpusError> {
        let mut sentences = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let before = sentences.len();
            sentences.extend(sentences_from_text(&text));
            debug!(
                path = %path.display(),
                sentences = sentences.len() - before,
                "corpus file loaded"
            );
        }
        Ok(Corpus { sentences })
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
