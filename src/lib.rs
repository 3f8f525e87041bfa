pub mod chars;
pub mod config;
pub mod dataset;
pub mod logplot;
pub mod models;
pub mod my_utils;
