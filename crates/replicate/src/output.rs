//! Normalization of the service's heterogeneous output shapes.
//!
//! A succeeded prediction's `output` field is not uniform across models:
//! it has been observed as a list of URLs, a bare URL string, and an
//! object with an `image` field. [`PredictionOutput`] models the observed
//! shapes as an explicit sum type with one exhaustive normalization
//! function; anything else is a decode-time or normalize-time error
//! rather than a silent pass-through.

use serde::Deserialize;

use crate::api::ReplicateError;

/// The output field of a succeeded prediction, one variant per observed
/// shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    /// A list of image URLs; the first element is the artifact.
    Many(Vec<String>),
    /// A single image URL.
    One(String),
    /// An object wrapping the image URL.
    Object {
        image: String,
    },
}

impl PredictionOutput {
    /// Normalize any recognized shape to the single image URL.
    ///
    /// An empty list is an error: the prediction claims success but
    /// carries no artifact.
    pub fn into_image_url(self) -> Result<String, ReplicateError> {
        match self {
            PredictionOutput::Many(urls) => urls.into_iter().next().ok_or_else(|| {
                ReplicateError::UnrecognizedOutput("empty output list".to_string())
            }),
            PredictionOutput::One(url) => Ok(url),
            PredictionOutput::Object { image } => Ok(image),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const URL: &str = "https://cdn/out.jpg";

    #[test]
    fn list_shape_takes_first_element() {
        let output: PredictionOutput =
            serde_json::from_str(r#"["https://cdn/out.jpg","https://cdn/alt.jpg"]"#).unwrap();
        assert_eq!(output.into_image_url().unwrap(), URL);
    }

    #[test]
    fn bare_string_shape() {
        let output: PredictionOutput = serde_json::from_str(r#""https://cdn/out.jpg""#).unwrap();
        assert_eq!(output.into_image_url().unwrap(), URL);
    }

    #[test]
    fn object_shape_with_image_field() {
        let output: PredictionOutput =
            serde_json::from_str(r#"{"image":"https://cdn/out.jpg"}"#).unwrap();
        assert_eq!(output.into_image_url().unwrap(), URL);
    }

    #[test]
    fn all_three_shapes_normalize_identically() {
        let shapes = [
            r#"["https://cdn/out.jpg"]"#,
            r#""https://cdn/out.jpg""#,
            r#"{"image":"https://cdn/out.jpg"}"#,
        ];
        for json in shapes {
            let output: PredictionOutput = serde_json::from_str(json).unwrap();
            assert_eq!(output.into_image_url().unwrap(), URL, "shape: {json}");
        }
    }

    #[test]
    fn empty_list_is_an_explicit_error() {
        let output: PredictionOutput = serde_json::from_str("[]").unwrap();
        assert_matches!(
            output.into_image_url(),
            Err(ReplicateError::UnrecognizedOutput(_))
        );
    }

    #[test]
    fn unknown_object_shape_fails_to_decode() {
        let result: Result<PredictionOutput, _> =
            serde_json::from_str(r#"{"frames":["https://cdn/out.jpg"]}"#);
        assert!(result.is_err());
    }
}
