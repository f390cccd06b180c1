//! End-to-end user journeys

pub mod admin_journey_test;
pub mod student_journey_test;
