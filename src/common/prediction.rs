use serde::{Deserialize, Serialize};

/// Request body for `POST /predict`.
///
/// Field names are serialized exactly as the prediction service expects them,
/// including the mixed casing of `District_Name`, `Soil_color` and `pH`.
/// Numeric fields are not validated; a `NaN` is serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "District_Name")]
    pub district_name: String,
    #[serde(rename = "Soil_color")]
    pub soil_color: String,
    #[serde(rename = "Nitrogen")]
    pub nitrogen: f64,
    #[serde(rename = "Phosphorus")]
    pub phosphorus: f64,
    #[serde(rename = "Potassium")]
    pub potassium: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    #[serde(rename = "Rainfall")]
    pub rainfall: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Crop")]
    pub crop: String,
}

/// Successful response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Recommended fertilizer name.
    pub fertilizer: String,
    /// Confidence as a percentage, expected within 0-100 but not enforced.
    pub confidence: f64,
    /// Human readable summary, if the server sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    /// Status reported when the service could not be asked at all.
    pub fn degraded() -> Self {
        Self {
            status: "error".to_string(),
            model_loaded: false,
        }
    }
}

/// Error body the service may attach to a non-2xx response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The message to show, if the server sent a usable one.
    ///
    /// Any scalar counts except empty strings, `false`, `0` and `null`.
    /// Arrays and objects are ignored.
    pub fn into_message(self) -> Option<String> {
        use serde_json::Value;

        match self.message? {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            district_name: "Kolhapur".to_string(),
            soil_color: "Black".to_string(),
            nitrogen: 75.0,
            phosphorus: 50.0,
            potassium: 100.0,
            ph: 6.5,
            rainfall: 1000.0,
            temperature: 25.0,
            crop: "Sugarcane".to_string(),
        }
    }

    #[test]
    fn test_request_field_names() {
        let value = serde_json::to_value(sample_request()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        keys.sort();

        assert_eq!(
            keys,
            vec![
                "Crop",
                "District_Name",
                "Nitrogen",
                "Phosphorus",
                "Potassium",
                "Rainfall",
                "Soil_color",
                "Temperature",
                "pH",
            ]
        );
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let mut request = sample_request();
        request.nitrogen = f64::NAN;
        request.ph = f64::NAN;

        let value = serde_json::to_value(&request).unwrap();
        assert!(value["Nitrogen"].is_null());
        assert!(value["pH"].is_null());
        assert_eq!(value["Rainfall"], serde_json::json!(1000.0));
    }

    #[test]
    fn test_error_body_message() {
        let message = |body: &str| {
            serde_json::from_str::<ErrorBody>(body)
                .unwrap()
                .into_message()
        };

        assert_eq!(message(r#"{"message":"Invalid crop"}"#).as_deref(), Some("Invalid crop"));
        assert_eq!(message(r#"{"message":42}"#).as_deref(), Some("42"));
        assert_eq!(message(r#"{"message":true}"#).as_deref(), Some("true"));

        for body in [
            r#"{"message":""}"#,
            r#"{"message":0}"#,
            r#"{"message":false}"#,
            r#"{"message":null}"#,
            r#"{"message":{"code":1}}"#,
            r#"{"error":"Prediction error"}"#,
        ] {
            assert_eq!(message(body), None, "{}", body);
        }
    }

    #[test]
    fn test_response_extra_fields() {
        let response: PredictionResponse = serde_json::from_str(
            r#"{"success":true,"fertilizer":"Urea","confidence":87.5,"message":"Recommended fertilizer: Urea","extra":1}"#,
        )
        .unwrap();
        assert_eq!(response.fertilizer, "Urea");
        assert_eq!(response.confidence, 87.5);
        assert_eq!(response.success, Some(true));

        // bare minimum is accepted as well
        let response: PredictionResponse =
            serde_json::from_str(r#"{"fertilizer":"DAP","confidence":40}"#).unwrap();
        assert_eq!(response.message, None);
    }
}
