mod assets;
mod bootstrap;
mod loop_runner;
mod scenes;
mod tuning;
mod ui;

pub(crate) use loop_runner::run;
