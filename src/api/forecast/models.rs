use serde::{Deserialize, Serialize};

/// Request body for POST /train
#[derive(Debug, Clone, Serialize)]
pub struct TrainRequest<'a> {
    pub cryptocurrency: &'a str,
}

/// Request body for POST /predict
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest<'a> {
    pub cryptocurrency: &'a str,
    pub days_since: u32,
}

/// Success body of POST /train. The body is free-form; only `message` is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body of POST /predict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies_match_service_contract() {
        let train = serde_json::to_value(TrainRequest { cryptocurrency: "bitcoin" }).unwrap();
        assert_eq!(train, serde_json::json!({"cryptocurrency": "bitcoin"}));

        let predict = serde_json::to_value(PredictRequest {
            cryptocurrency: "bitcoin",
            days_since: 8,
        })
        .unwrap();
        assert_eq!(predict, serde_json::json!({"cryptocurrency": "bitcoin", "days_since": 8}));
    }

    #[test]
    fn test_predict_response_requires_price() {
        assert!(serde_json::from_str::<PredictResponse>(r#"{"price": 1.0}"#).is_err());
        let ok: PredictResponse = serde_json::from_str(r#"{"predicted_price": 12345.678}"#).unwrap();
        assert_eq!(ok.predicted_price, 12345.678);
    }
}
