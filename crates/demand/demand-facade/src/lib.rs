//! Demand Forecasting Facade
//!
//! High-level API for demand forecasting. Re-exports all public types from
//! the demand stack for convenient usage.
//!
//! # Example
//!
//! ```ignore
//! use demand_facade::prelude::*;
//!
//! let engine = ForecastEngine::with_defaults();
//! engine.train(&history, ModelKey::for_product("SKU-1"))?;
//! let forecast = engine.forecast(&ModelKey::for_product("SKU-1"), 14, false)?;
//! println!("P90 series: {:?}", forecast.p90_series());
//! ```

// Re-export everything from core (which includes API and SPI)
pub use demand_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Traits
    pub use demand_spi::{DemandModel, QuantileEstimator};

    // Configuration
    pub use demand_api::{CrossValidationConfig, EngineConfig, QuantileMethod};

    // Model types
    pub use demand_spi::{
        normalize_observations, AccuracyMetrics, DateRange, DemandError, ForecastPoint, ModelKey,
        QuantileBands, QuantileForecast, Result, SalesObservation, TrainingResult, UpdateResult,
    };

    // Implementations
    pub use demand_core::{
        fit_demand_model, BootstrapEstimator, ForecastEngine, NormalApproximationEstimator,
        SeasonalSmoothing, TrendSmoothing,
    };
}
