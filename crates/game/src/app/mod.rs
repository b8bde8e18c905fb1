mod bootstrap;
mod config;
mod level;
mod loop_runner;

#[cfg(test)]
mod tests;

pub(crate) use bootstrap::build_app;
pub(crate) use loop_runner::run;
