pub mod catalog_service;
pub mod chart_service;
pub mod history_service;
pub mod prediction_service;
pub mod selection_service;
pub mod training_service;
