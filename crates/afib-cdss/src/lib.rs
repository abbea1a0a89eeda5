//! Anticoagulation decision support for atrial fibrillation.
//!
//! The engine under [`workflows::anticoagulation`] turns intake fields and
//! clinician selections into a CHA₂DS₂-VASc score, a contraindication verdict,
//! PPI and bleeding-risk gate flags, and a final recommendation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
