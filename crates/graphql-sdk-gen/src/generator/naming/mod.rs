pub mod identifiers;
mod reserved;

#[cfg(test)]
mod tests;

pub use reserved::ReservedNames;
