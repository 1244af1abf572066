mod config;
mod suppress;
