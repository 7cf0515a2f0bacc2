/// Integration test target: engine state persisted through the SQLite
/// snapshot store
mod persistence_tests;
