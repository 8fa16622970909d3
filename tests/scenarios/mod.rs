//! Scenario-based tests for bettermd

mod batch;
mod config;
mod html_input;
mod markdown_input;
mod rst_output;
