//! End-to-end discovery runs against scripted collaborators.

#[cfg(test)]
mod discovery;
