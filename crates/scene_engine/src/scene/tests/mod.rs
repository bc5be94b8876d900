//! Scenario tests that drive the scene graph through whole editing sessions

mod bounds_scenarios;
