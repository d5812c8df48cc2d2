pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod flow;
pub mod scenario;
pub mod sim;
pub mod topo;

#[cfg(test)]
mod test;
