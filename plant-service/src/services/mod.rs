pub mod diagnosis;
pub mod leaf_image;
pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod reply;
