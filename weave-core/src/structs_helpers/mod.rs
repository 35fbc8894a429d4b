mod enhancer;
pub use self::enhancer::EnhancerMetadata;
