//! Integration Tests Module
//!
//! End-to-end tests for the answer pipeline, persona loading and analytics.
//! Generation is scripted; nothing here talks to a real backend.

// Scripted generator, failing store and fixtures shared by the tests
mod support;

// Prompt → generate → validate → record → store, per persona
mod pipeline_test;

// Persona descriptors and activity logs on disk
mod persona_test;

// Aggregation and export over stored responses
mod analytics_test;
