//! Integration tests for the bayfuse workspace live in `tests/`.
