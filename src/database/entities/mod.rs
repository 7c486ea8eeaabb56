pub mod app_tags;
pub mod apps;
pub mod feature_tags;
pub mod features;
pub mod repositories;
pub mod repository_tags;
pub mod sample_tags;
pub mod samples;
pub mod tags;
