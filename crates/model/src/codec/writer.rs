use std::io::{self, Write};

use crate::error::ModelError;
use crate::genre::{GenreModel, ModelCollection};

use super::NUL;

/// Streams genre records in the binary model format.
pub struct ModelWriter<W: Write> {
    inner: W,
    bytes_written: u64,
    genres_written: usize,
}

impl<W: Write> ModelWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
            genres_written: 0,
        }
    }

    /// Append one genre record, including its word-list terminator.
    pub fn write_genre(&mut self, genre: &GenreModel) -> Result<(), ModelError> {
        if genre.name.is_empty() {
            return Err(invalid("genre name must not be empty"));
        }
        let total = i32::try_from(genre.total_words_in_genre).map_err(|_| ModelError::Overflow {
            genre: genre.name.clone(),
            max: i32::MAX,
        })?;

        self.write_cstr(&genre.name)?;
        self.write_bytes(&genre.prior_probability.to_le_bytes())?;
        self.write_bytes(&total.to_le_bytes())?;

        for (token, probability) in &genre.word_probabilities {
            if token.is_empty() {
                return Err(invalid("token must not be empty"));
            }
            self.write_cstr(token)?;
            self.write_bytes(&probability.to_le_bytes())?;
        }
        self.write_bytes(&[NUL])?;

        self.genres_written += 1;
        Ok(())
    }

    /// Flush and return the underlying writer with the byte count.
    pub fn finish(mut self) -> Result<(W, u64), ModelError> {
        self.inner.flush()?;
        Ok((self.inner, self.bytes_written))
    }

    pub fn genres_written(&self) -> usize {
        self.genres_written
    }

    fn write_cstr(&mut self, s: &str) -> Result<(), ModelError> {
        if s.as_bytes().contains(&NUL) {
            return Err(invalid(format!("{:?} contains a NUL byte", s)));
        }
        self.write_bytes(s.as_bytes())?;
        self.write_bytes(&[NUL])
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ModelError> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ModelError {
    ModelError::Io(io::Error::new(io::ErrorKind::InvalidInput, reason.into()))
}

/// Encode a whole collection, returning the number of bytes written.
pub fn encode<W: Write>(collection: &ModelCollection, out: W) -> Result<u64, ModelError> {
    let mut writer = ModelWriter::new(out);
    for genre in collection.iter() {
        writer.write_genre(genre)?;
    }
    let (_, bytes) = writer.finish()?;
    Ok(bytes)
}
