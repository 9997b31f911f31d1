/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use thiserror::Error;

/// Boxed underlying cause carried by [`NetworkError`] variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure kinds surfaced to callers of the acquisition service.
///
/// The display strings are what a presentation layer shows to the user, so
/// they stay stable.
#[derive(Error, Debug)]
pub enum NetworkError {
  /// Response arrived but could not be interpreted as an HTTP response
  #[error("Invalid response from server")]
  InvalidResponse,

  /// Server answered with a non-2xx status
  #[error("HTTP error with status code: {status_code}")]
  Http { status_code: u16 },

  /// Body did not match the expected wire shape
  #[error("Failed to decode response: {0}")]
  Decoding(#[source] BoxError),

  /// Connectivity failure or a request that could not be constructed
  #[error("Network error: {0}")]
  Network(#[source] BoxError),
}

impl NetworkError {
  /// Wrap any error as a [`NetworkError::Network`]
  pub fn network<E>(cause: E) -> Self
  where
    E: Into<BoxError>,
  {
    NetworkError::Network(cause.into())
  }

  /// Wrap any error as a [`NetworkError::Decoding`]
  pub fn decoding<E>(cause: E) -> Self
  where
    E: Into<BoxError>,
  {
    NetworkError::Decoding(cause.into())
  }

  /// Status code for [`NetworkError::Http`], `None` otherwise
  pub fn status_code(&self) -> Option<u16> {
    match self {
      NetworkError::Http { status_code } => Some(*status_code),
      _ => None,
    }
  }
}

/// Result type alias for tc-* crates
pub type Result<T> = std::result::Result<T, NetworkError>;
