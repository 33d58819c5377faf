//! Player analytics dashboard: turns analysis-service responses into canonical player
//! records and paints movement heatmaps.

pub mod analysis_fetch;
pub mod attributes;
pub mod combine;
pub mod config;
pub mod display;
pub mod fake_analysis;
pub mod gauge;
pub mod heatmap;
pub mod http_client;
pub mod mock_data;
pub mod normalize;
pub mod pitch_widget;
pub mod provider;
pub mod state;
