// Small numeric helpers
pub mod maths_utils;
