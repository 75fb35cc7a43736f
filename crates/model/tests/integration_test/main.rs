/// Integration tests for the genre model covering training, persistence
/// round-trips through the store, and classification scenarios.

mod helpers;
mod persistence;
mod scenarios;
