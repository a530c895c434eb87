//! Unit tests for the source heuristics.
