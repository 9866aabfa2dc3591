pub(crate) mod composite;
pub(crate) mod stepped;

#[cfg(test)]
#[path = "../tests/unit/pattern.rs"]
mod tests;
