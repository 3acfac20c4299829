/*
 * Copyright 2025 Vijaykumar Singh
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! JSON request body extractor separating missing from malformed content

use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::FromRequest,
    http::{Request, StatusCode},
    BoxError,
};
use serde::de::DeserializeOwned;

use crate::core::MazeError;

/// Decoded JSON body. Rejects an empty body with `MissingContent`, an
/// undecodable one with `MalformedContent` and one over the body limit with
/// `ContentTooLarge`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for JsonBody<T>
where
    T: DeserializeOwned,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = MazeError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => MazeError::ContentTooLarge(rejection.body_text()),
                _ => MazeError::MalformedContent(rejection.body_text()),
            })?;

        decode_body(&bytes).map(JsonBody)
    }
}

pub fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, MazeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(MazeError::MissingContent);
    }
    serde_json::from_slice(bytes).map_err(|e| MazeError::MalformedContent(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Origin;

    #[test]
    fn test_empty_body_is_missing_content() {
        assert!(matches!(decode_body::<Origin>(b""), Err(MazeError::MissingContent)));
        assert!(matches!(decode_body::<Origin>(b"  \n"), Err(MazeError::MissingContent)));
    }

    #[test]
    fn test_truncated_body_is_malformed_content() {
        let result = decode_body::<Origin>(br#"{"x_origin": 1.0,"#);
        assert!(matches!(result, Err(MazeError::MalformedContent(_))));
    }

    #[test]
    fn test_wrong_types_are_malformed_content() {
        let result = decode_body::<Origin>(br#"{"x_origin": "east"}"#);
        assert!(matches!(result, Err(MazeError::MalformedContent(_))));
    }

    #[test]
    fn test_valid_body_decodes() {
        let origin = decode_body::<Origin>(br#"{"x_origin": 1.5, "y_origin": -2}"#).unwrap();
        assert_eq!(origin, Origin::new(1.5, -2.0));
    }
}
