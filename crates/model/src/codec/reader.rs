use std::io::{self, BufRead};

use tracing::debug;

use crate::error::ModelError;
use crate::genre::{GenreModel, ModelCollection};

use super::NUL;

/// Result of reading one NUL-terminated field.
enum Field {
    /// Stream ended before any byte of the field.
    Eof,
    /// Bytes before the terminator (possibly none).
    Value(Vec<u8>),
}

/// Parses the binary model format from a buffered reader.
pub struct ModelReader<R: BufRead> {
    inner: R,
    offset: u64,
}

impl<R: BufRead> ModelReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next genre record, or `None` at a clean end of stream.
    ///
    /// The boolean is true when the record's word list was closed by EOF
    /// instead of a lone NUL; nothing may follow such a record.
    pub fn next_genre(&mut self) -> Result<Option<(GenreModel, bool)>, ModelError> {
        let record_start = self.offset;
        let name = match self.read_field("genre name")? {
            Field::Eof => return Ok(None),
            Field::Value(bytes) if bytes.is_empty() => {
                return Err(ModelError::malformed(record_start, "empty genre name"));
            }
            Field::Value(bytes) => self.utf8(bytes, record_start, "genre name")?,
        };

        let prior_at = self.offset;
        let prior_probability = f64::from_le_bytes(self.read_array("prior probability")?);
        if !(0.0..=1.0).contains(&prior_probability) {
            return Err(ModelError::malformed(
                prior_at,
                format!("prior probability {} of {:?} out of range", prior_probability, name),
            ));
        }

        let total_at = self.offset;
        let total = i32::from_le_bytes(self.read_array("total word count")?);
        let total_words_in_genre = u32::try_from(total).map_err(|_| {
            ModelError::malformed(total_at, format!("negative word count {} for {:?}", total, name))
        })?;

        let mut genre = GenreModel {
            name,
            prior_probability,
            total_words_in_genre,
            ..GenreModel::default()
        };

        loop {
            let token_at = self.offset;
            let token = match self.read_field("token")? {
                Field::Eof => return Ok(Some((genre, true))),
                Field::Value(bytes) if bytes.is_empty() => break,
                Field::Value(bytes) => self.utf8(bytes, token_at, "token")?,
            };

            let probability_at = self.offset;
            let probability = f64::from_le_bytes(self.read_array("word probability")?);
            if !(probability > 0.0 && probability <= 1.0) {
                return Err(ModelError::malformed(
                    probability_at,
                    format!("probability {} of {:?} out of range", probability, token),
                ));
            }
            genre.word_probabilities.insert(token, probability);
        }

        Ok(Some((genre, false)))
    }

    /// Read every remaining record into a collection.
    pub fn read_collection(&mut self) -> Result<ModelCollection, ModelError> {
        let mut collection = ModelCollection::new();
        loop {
            let record_start = self.offset;
            let Some((genre, hit_eof)) = self.next_genre()? else {
                break;
            };
            if collection.contains(&genre.name) {
                return Err(ModelError::malformed(
                    record_start,
                    format!("duplicate genre {:?}", genre.name),
                ));
            }
            collection.insert(genre);
            if hit_eof {
                break;
            }
        }
        Ok(collection)
    }

    fn read_field(&mut self, what: &str) -> Result<Field, ModelError> {
        let start = self.offset;
        let mut buf = Vec::new();
        let n = self.inner.read_until(NUL, &mut buf)?;
        self.offset += n as u64;

        if n == 0 {
            return Ok(Field::Eof);
        }
        if buf.last() != Some(&NUL) {
            return Err(ModelError::malformed(start, format!("{} truncated", what)));
        }
        buf.pop();
        Ok(Field::Value(buf))
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], ModelError> {
        let mut buf = [0u8; N];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => {
                self.offset += N as u64;
                Ok(buf)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(ModelError::malformed(self.offset, format!("{} truncated", what)))
            }
            Err(e) => Err(ModelError::Io(e)),
        }
    }

    fn utf8(&self, bytes: Vec<u8>, at: u64, what: &str) -> Result<String, ModelError> {
        String::from_utf8(bytes)
            .map_err(|e| ModelError::malformed(at, format!("{} is not UTF-8: {}", what, e)))
    }
}

/// Decode a whole model from a buffered reader.
pub fn decode<R: BufRead>(input: R) -> Result<ModelCollection, ModelError> {
    let mut reader = ModelReader::new(input);
    let collection = reader.read_collection()?;
    debug!(bytes = reader.offset(), genres = collection.len(), "Model decoded");
    Ok(collection)
}
