use tracing::{error, info};

use crate::api::ModelService;
use crate::utils::PipelineError;

/// Shown when the service fails without an `error` message
pub const GENERIC_TRAINING_FAILURE: &str = "Failed to train model.";

/// Ask the model service to (re)train its model for `asset_id`.
///
/// Resolves once the service answers. A non-success answer becomes
/// `PipelineError::Training` carrying the service's `error` field.
pub async fn train<S>(service: &S, asset_id: &str) -> Result<(), PipelineError>
where
    S: ModelService + ?Sized,
{
    match service.train(asset_id).await {
        Ok(response) => {
            info!(
                "Training finished for {}: {}",
                asset_id,
                response.message.as_deref().unwrap_or("ok")
            );
            Ok(())
        }
        Err(e) => {
            error!("Error training model for {}: {}", asset_id, e);
            let message = e
                .service_message()
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_TRAINING_FAILURE.to_string());
            Err(PipelineError::Training(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::FakeModels;

    #[tokio::test]
    async fn test_success_sends_only_the_asset_id() {
        let models = FakeModels::new();
        assert!(train(&models, "bitcoin").await.is_ok());
        assert_eq!(models.train_calls(), vec!["bitcoin".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_carries_service_message() {
        let models = FakeModels::new().with_train_error(
            "doge",
            ApiError::from_status(400, r#"{"error": "insufficient data"}"#),
        );

        assert_eq!(
            train(&models, "doge").await,
            Err(PipelineError::Training("insufficient data".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_generic_text() {
        let models = FakeModels::new()
            .with_train_error("doge", ApiError::Request("connection refused".to_string()));

        assert_eq!(
            train(&models, "doge").await,
            Err(PipelineError::Training(GENERIC_TRAINING_FAILURE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_malformed_error_body_uses_generic_text() {
        let models = FakeModels::new()
            .with_train_error("doge", ApiError::from_status(500, "Internal Server Error"));

        let err = train(&models, "doge").await.unwrap_err();
        assert_eq!(err.message(), GENERIC_TRAINING_FAILURE);
    }
}
