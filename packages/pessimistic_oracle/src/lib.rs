pub mod asset;
pub mod common;
pub mod feed;
pub mod oracle;
pub mod pair;
pub mod querier;
pub mod vault;

#[cfg(test)]
mod testing;
