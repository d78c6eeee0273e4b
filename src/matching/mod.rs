pub mod fingerprint;
pub mod score;
pub mod sequence;
