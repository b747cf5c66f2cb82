mod common;
mod orchestrator;
mod staging;
