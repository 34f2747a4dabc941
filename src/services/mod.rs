pub mod github;
pub mod metadata;
pub mod output;
pub mod release_assets;
pub mod resolver;
