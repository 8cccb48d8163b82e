//! # labelscan-ref
//!
//! Reference runtime for the labelscan ingredient risk engine.
//!
//! Demonstrates three label-scan scenarios end to end through the real
//! pipeline, engine, and verifier, with stand-in collaborators:
//!
//! 1. **Allergy Alert** — a peanut-allergic shopper scans a snack made with
//!    peanut oil.
//! 2. **Diet & Condition Conflicts** — a vegan shopper managing diabetes and
//!    blood pressure scans a baked good.
//! 3. **Anonymous Scan** — a signed-out user scans a soft drink and asks for
//!    the summary to be read aloud.
//!
//! All labels and profiles are hardcoded and fictional. No external services
//! are contacted.

pub mod mock_data;
pub mod scenarios;
